//! End-to-end tests of the storage client against an HTTP document store.

use chrono::{TimeZone, Utc};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trackboard_core::forms::ActivityDraft;
use trackboard_core::models::{Activity, Certificate, SharedDocument};
use trackboard_core::{
    FileCache, HttpMirror, LocalCache, OfflineMirror, RemoteMirror, StorageClient, SyncOutcome,
};

const BIN_PATH: &str = "/v3/b/progress";

fn mirror_for(server: &MockServer) -> HttpMirror {
    HttpMirror::new(format!("{}{}", server.uri(), BIN_PATH))
        .unwrap()
        .with_auth("X-Master-Key", "test-key")
        .unwrap()
}

fn sample_document() -> SharedDocument {
    serde_json::from_value(json!({
        "certificates": [{
            "id": "1700000000000",
            "name": "Security+",
            "provider": "CompTIA",
            "status": "earned",
            "progress": 100,
            "dateEarned": "2023-11-14",
            "studyMaterials": [],
            "notes": "",
            "files": []
        }],
        "finalProjects": [],
        "miniProjects": [],
        "dailyActivities": [{
            "id": "1705000000000",
            "date": "2024-01-11",
            "topic": "OSINT",
            "duration": "1 hour",
            "description": "Recon drills",
            "skills": ["Maltego"],
            "progress": 0,
            "objectives": [],
            "resources": [],
            "files": []
        }],
        "lastUpdated": "2024-01-11T12:00:00.000Z"
    }))
    .unwrap()
}

#[tokio::test]
async fn test_initial_load_from_remote_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/latest", BIN_PATH)))
        .and(header("X-Master-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "record": sample_document(),
            "metadata": {"private": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let cache = FileCache::new(dir.path().to_path_buf()).unwrap();
    let mut client = StorageClient::new(cache, mirror_for(&server));

    assert_eq!(client.refresh().await.unwrap(), SyncOutcome::Synced);
    let certs = client.get_certificates().await.unwrap();
    assert_eq!(certs.len(), 1);
    assert_eq!(certs[0].progress, 100);

    // Mirrored into the local cache for offline use
    let cached: Vec<Activity> = client.cache().read("dailyActivities").unwrap();
    assert_eq!(cached[0].topic, "OSINT");
}

#[tokio::test]
async fn test_round_trip_through_remote() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(BIN_PATH))
        .and(header("X-Master-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let mirror = mirror_for(&server);
    let original = sample_document();
    mirror.replace_all(&original).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let sent: serde_json::Value = requests[0].body_json().unwrap();
    assert!(sent.get("lastUpdated").is_some());
    assert_eq!(sent["certificates"][0]["dateEarned"], "2023-11-14");

    Mock::given(method("GET"))
        .and(path(format!("{}/latest", BIN_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "record": sent })))
        .mount(&server)
        .await;

    let fetched = mirror.fetch_all().await.unwrap();
    assert!(fetched.same_records(&original));
}

#[tokio::test]
async fn test_server_error_falls_back_to_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let cache = FileCache::new(dir.path().to_path_buf()).unwrap();
    let before = vec![Activity {
        id: "1".to_string(),
        date: "2024-01-01".to_string(),
        topic: "Cached".to_string(),
        duration: "30 minutes".to_string(),
        description: String::new(),
        skills: vec![],
        progress: 0,
        objectives: vec![],
        resources: vec![],
        files: vec![],
    }];
    cache.write("dailyActivities", &before).unwrap();

    let mut client = StorageClient::new(cache, mirror_for(&server));
    assert_eq!(client.refresh().await.unwrap(), SyncOutcome::LocalOnly);
    assert_eq!(client.get_daily_activities().await.unwrap(), before.as_slice());
}

#[tokio::test]
async fn test_malformed_remote_body_falls_back_to_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let cache = FileCache::new(dir.path().to_path_buf()).unwrap();
    let mut client = StorageClient::new(cache, mirror_for(&server));
    assert_eq!(client.refresh().await.unwrap(), SyncOutcome::LocalOnly);
    assert!(client.get_certificates().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_remote_save_is_local_only() {
    let server = MockServer::start().await;
    let mirror = mirror_for(&server);
    drop(server);

    let dir = TempDir::new().unwrap();
    let cache = FileCache::new(dir.path().to_path_buf()).unwrap();
    let mut client = StorageClient::new(cache, mirror);

    let cert: Certificate = serde_json::from_value(json!({
        "id": "1", "name": "CySA+", "provider": "CompTIA"
    }))
    .unwrap();
    let outcome = client.add(cert).await.unwrap();
    assert_eq!(outcome, SyncOutcome::LocalOnly);

    // A fresh client over the same directory sees the record
    let cache = FileCache::new(dir.path().to_path_buf()).unwrap();
    let mut reopened = StorageClient::new(cache, OfflineMirror);
    let certs = reopened.get_certificates().await.unwrap();
    assert_eq!(certs.len(), 1);
    assert_eq!(certs[0].name, "CySA+");
}

#[tokio::test]
async fn test_logged_activity_is_first_on_next_read() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/latest", BIN_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "record": sample_document() })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(BIN_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let cache = FileCache::new(dir.path().to_path_buf()).unwrap();
    let mut client = StorageClient::new(cache, mirror_for(&server));

    let activity = ActivityDraft {
        date: "2024-01-15".to_string(),
        topic: "Network Scanning".to_string(),
        duration: "2 hours".to_string(),
        description: "SYN and UDP scans against the lab".to_string(),
        skills: "Nmap, Wireshark".to_string(),
        ..Default::default()
    }
    .build(Utc.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap())
    .unwrap();

    assert_eq!(client.add(activity).await.unwrap(), SyncOutcome::Synced);

    let activities = client.get_daily_activities().await.unwrap();
    assert_eq!(activities.len(), 2);
    assert_eq!(activities[0].topic, "Network Scanning");
    assert_eq!(activities[0].skills, vec!["Nmap", "Wireshark"]);

    // The PUT carried the whole document, new record first
    let requests = server.received_requests().await.unwrap();
    let put = requests.iter().find(|r| r.method.as_str() == "PUT").unwrap();
    let sent: SharedDocument = put.body_json().unwrap();
    assert_eq!(sent.daily_activities[0].topic, "Network Scanning");
    assert_eq!(sent.certificates.len(), 1);
}
