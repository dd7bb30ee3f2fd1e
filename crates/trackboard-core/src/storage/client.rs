use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::StorageError;
use crate::cache::LocalCache;
use crate::models::{
    Activity, Certificate, DashboardSummary, MiniProject, Project, Record, RecordKind,
    SharedDocument,
};
use crate::remote::RemoteMirror;

/// What happened to the remote copy during an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The remote document was read or written.
    Synced,
    /// The remote was unavailable; the local cache was used instead.
    LocalOnly,
    /// Neither the remote nor the local cache accepted the write.
    Failed,
}

impl SyncOutcome {
    pub fn is_shared(&self) -> bool {
        matches!(self, SyncOutcome::Synced)
    }
}

impl std::fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncOutcome::Synced => write!(f, "synced"),
            SyncOutcome::LocalOnly => write!(f, "saved locally only"),
            SyncOutcome::Failed => write!(f, "not saved"),
        }
    }
}

#[derive(Debug)]
enum ClientState {
    Uninitialized,
    Ready(SharedDocument),
}

/// Generic storage client over a local cache and a remote mirror.
///
/// Construct one per process and hand it to whatever needs persistence.
/// The first accessor call initializes it; after that the in-memory document
/// is authoritative until `refresh` is called.
#[derive(Debug)]
pub struct StorageClient<C, M> {
    cache: C,
    mirror: M,
    state: ClientState,
}

impl<C: LocalCache, M: RemoteMirror> StorageClient<C, M> {
    pub fn new(cache: C, mirror: M) -> Self {
        Self {
            cache,
            mirror,
            state: ClientState::Uninitialized,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ClientState::Ready(_))
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn mirror(&self) -> &M {
        &self.mirror
    }

    /// The in-memory document, if the client has been initialized.
    pub fn document(&self) -> Option<&SharedDocument> {
        match &self.state {
            ClientState::Ready(doc) => Some(doc),
            ClientState::Uninitialized => None,
        }
    }

    /// Re-run the initial load unconditionally.
    pub async fn refresh(&mut self) -> Result<SyncOutcome, StorageError> {
        self.load().await
    }

    async fn load(&mut self) -> Result<SyncOutcome, StorageError> {
        match self.mirror.fetch_all().await {
            Ok(doc) => {
                info!(
                    mirror = %self.mirror.describe(),
                    records = doc.total_records(),
                    "Shared document loaded"
                );
                self.write_local(&doc);
                self.state = ClientState::Ready(doc);
                Ok(SyncOutcome::Synced)
            }
            Err(e) => {
                warn!(
                    mirror = %self.mirror.describe(),
                    error = %e,
                    "Remote unavailable, loading from local cache"
                );
                let doc = self.read_local()?;
                self.state = ClientState::Ready(doc);
                Ok(SyncOutcome::LocalOnly)
            }
        }
    }

    async fn ensure_ready(&mut self) -> Result<&mut SharedDocument, StorageError> {
        if !self.is_ready() {
            self.load().await?;
        }
        match &mut self.state {
            ClientState::Ready(doc) => Ok(doc),
            ClientState::Uninitialized => Err(StorageError::NotReady),
        }
    }

    fn read_local(&self) -> Result<SharedDocument, StorageError> {
        let mut doc = SharedDocument::empty();
        doc.certificates = self.cache.read(RecordKind::Certificates.key())?;
        doc.final_projects = self.cache.read(RecordKind::FinalProjects.key())?;
        doc.mini_projects = self.cache.read(RecordKind::MiniProjects.key())?;
        doc.daily_activities = self.cache.read(RecordKind::DailyActivities.key())?;
        debug!(records = doc.total_records(), "Loaded document from local cache");
        Ok(doc)
    }

    /// Mirror every list into the local cache. Failures are logged, not raised.
    fn write_local(&self, doc: &SharedDocument) -> bool {
        let results = [
            (
                RecordKind::Certificates,
                self.cache.write(RecordKind::Certificates.key(), &doc.certificates),
            ),
            (
                RecordKind::FinalProjects,
                self.cache.write(RecordKind::FinalProjects.key(), &doc.final_projects),
            ),
            (
                RecordKind::MiniProjects,
                self.cache.write(RecordKind::MiniProjects.key(), &doc.mini_projects),
            ),
            (
                RecordKind::DailyActivities,
                self.cache.write(RecordKind::DailyActivities.key(), &doc.daily_activities),
            ),
        ];

        let mut ok = true;
        for (kind, result) in results {
            if let Err(e) = result {
                warn!(key = kind.key(), error = %e, "Failed to write local cache");
                ok = false;
            }
        }
        ok
    }

    // ===== Generic accessors =====

    /// All records of one kind, newest first.
    pub async fn get<R: Record>(&mut self) -> Result<&[R], StorageError> {
        let doc = self.ensure_ready().await?;
        Ok(R::list(doc).as_slice())
    }

    /// Replace the list for one kind and persist the whole document.
    pub async fn save<R: Record>(&mut self, records: Vec<R>) -> Result<SyncOutcome, StorageError> {
        {
            let doc = self.ensure_ready().await?;
            *R::list_mut(doc) = records;
            doc.touch();
        }

        let doc = self.document().ok_or(StorageError::NotReady)?;
        let remote = self.mirror.replace_all(doc).await;
        let local_ok = self.write_local(doc);

        let outcome = match remote {
            Ok(()) => {
                info!(key = R::KIND.key(), "Saved to shared document");
                SyncOutcome::Synced
            }
            Err(e) if local_ok => {
                warn!(key = R::KIND.key(), error = %e, "Remote save failed, data saved locally only");
                SyncOutcome::LocalOnly
            }
            Err(e) => {
                warn!(key = R::KIND.key(), error = %e, "Remote save failed and local cache rejected the write");
                SyncOutcome::Failed
            }
        };
        Ok(outcome)
    }

    /// Prepend one record to its list and persist.
    ///
    /// A record whose id collides with an existing one gets the next free id.
    pub async fn add<R: Record>(&mut self, mut record: R) -> Result<SyncOutcome, StorageError> {
        let current = self.get::<R>().await?;
        let existing: HashSet<&str> = current.iter().map(|r| r.id()).collect();
        let id = unique_id(&existing, record.id());
        if id != record.id() {
            debug!(from = record.id(), to = %id, "Record id collided, reassigned");
        }

        let mut records = Vec::with_capacity(current.len() + 1);
        record.set_id(id);
        records.push(record);
        records.extend(current.iter().cloned());

        self.save(records).await
    }

    pub async fn summary(&mut self) -> Result<DashboardSummary, StorageError> {
        let doc = self.ensure_ready().await?;
        Ok(DashboardSummary::from_document(doc))
    }

    // ===== Certificates =====

    pub async fn get_certificates(&mut self) -> Result<&[Certificate], StorageError> {
        self.get().await
    }

    pub async fn save_certificates(
        &mut self,
        certificates: Vec<Certificate>,
    ) -> Result<SyncOutcome, StorageError> {
        self.save(certificates).await
    }

    // ===== Final Projects =====

    pub async fn get_final_projects(&mut self) -> Result<&[Project], StorageError> {
        self.get().await
    }

    pub async fn save_final_projects(
        &mut self,
        projects: Vec<Project>,
    ) -> Result<SyncOutcome, StorageError> {
        self.save(projects).await
    }

    // ===== Mini Projects =====

    pub async fn get_mini_projects(&mut self) -> Result<&[MiniProject], StorageError> {
        self.get().await
    }

    pub async fn save_mini_projects(
        &mut self,
        projects: Vec<MiniProject>,
    ) -> Result<SyncOutcome, StorageError> {
        self.save(projects).await
    }

    // ===== Daily Activities =====

    pub async fn get_daily_activities(&mut self) -> Result<&[Activity], StorageError> {
        self.get().await
    }

    pub async fn save_daily_activities(
        &mut self,
        activities: Vec<Activity>,
    ) -> Result<SyncOutcome, StorageError> {
        self.save(activities).await
    }
}

/// First id not in `existing`, starting from `id`.
/// Timestamp ids step forward one millisecond; anything else, or a timestamp
/// with no room left, gets a suffix.
fn unique_id(existing: &HashSet<&str>, id: &str) -> String {
    if !existing.contains(id) {
        return id.to_string();
    }
    if let Ok(mut millis) = id.parse::<i64>() {
        while let Some(next) = millis.checked_add(1) {
            millis = next;
            let candidate = millis.to_string();
            if !existing.contains(candidate.as_str()) {
                return candidate;
            }
        }
    }
    (1..)
        .map(|n| format!("{}-{}", id, n))
        .find(|candidate| !existing.contains(candidate.as_str()))
        .unwrap_or_else(|| id.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::cache::{CacheError, MemoryCache};
    use crate::remote::MirrorError;

    /// In-process stand-in for the remote store.
    #[derive(Default)]
    struct FakeMirror {
        doc: Mutex<Option<SharedDocument>>,
        offline: AtomicBool,
        fetches: AtomicUsize,
        writes: AtomicUsize,
    }

    impl FakeMirror {
        fn online(doc: SharedDocument) -> Self {
            let mirror = Self::default();
            *mirror.doc.lock().unwrap() = Some(doc);
            mirror
        }

        fn offline() -> Self {
            let mirror = Self::default();
            mirror.offline.store(true, Ordering::SeqCst);
            mirror
        }

        fn stored(&self) -> Option<SharedDocument> {
            self.doc.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RemoteMirror for FakeMirror {
        async fn fetch_all(&self) -> Result<SharedDocument, MirrorError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.offline.load(Ordering::SeqCst) {
                return Err(MirrorError::Offline);
            }
            Ok(self.stored().unwrap_or_default())
        }

        async fn replace_all(&self, doc: &SharedDocument) -> Result<(), MirrorError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.offline.load(Ordering::SeqCst) {
                return Err(MirrorError::Offline);
            }
            *self.doc.lock().unwrap() = Some(doc.clone());
            Ok(())
        }

        fn describe(&self) -> String {
            "fake".to_string()
        }
    }

    /// Cache that refuses every write.
    struct ReadOnlyCache;

    impl LocalCache for ReadOnlyCache {
        fn read_raw(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Ok(None)
        }

        fn write_raw(&self, key: &str, _value: &str) -> Result<(), CacheError> {
            Err(CacheError::Io {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    fn remote_doc() -> SharedDocument {
        let mut doc = SharedDocument::empty();
        doc.certificates = vec![Certificate::sample("10", "Security+")];
        doc.daily_activities = vec![Activity::sample("20", "OSINT")];
        doc
    }

    #[tokio::test]
    async fn test_lazy_initialization() {
        let mut client = StorageClient::new(MemoryCache::new(), FakeMirror::online(remote_doc()));
        assert!(!client.is_ready());
        assert_eq!(client.mirror().fetches.load(Ordering::SeqCst), 0);

        let certs = client.get_certificates().await.unwrap();
        assert_eq!(certs.len(), 1);
        assert!(client.is_ready());

        // Later reads do not re-fetch
        client.get_daily_activities().await.unwrap();
        client.get_mini_projects().await.unwrap();
        assert_eq!(client.mirror().fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_remote_load_is_mirrored_to_cache() {
        let mut client = StorageClient::new(MemoryCache::new(), FakeMirror::online(remote_doc()));
        assert_eq!(client.refresh().await.unwrap(), SyncOutcome::Synced);

        let cached: Vec<Certificate> = client.cache().read("certificates").unwrap();
        assert_eq!(cached, remote_doc().certificates);
        let cached: Vec<Project> = client.cache().read("finalProjects").unwrap();
        assert!(cached.is_empty());
        assert!(client.cache().read_raw("finalProjects").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_fallback_returns_exactly_the_cache() {
        let cached = vec![Activity::sample("2", "Recon"), Activity::sample("1", "OSINT")];
        let cache = MemoryCache::new();
        cache.write("dailyActivities", &cached).unwrap();

        let mut client = StorageClient::new(cache, FakeMirror::offline());
        assert_eq!(client.refresh().await.unwrap(), SyncOutcome::LocalOnly);
        assert_eq!(client.get_daily_activities().await.unwrap(), cached.as_slice());
        assert!(client.get_certificates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_cache_surfaces_from_accessor() {
        let cache = MemoryCache::new().with_entry("certificates", "not json");
        let mut client = StorageClient::new(cache, FakeMirror::offline());

        let result = client.get_certificates().await;
        assert!(matches!(result, Err(StorageError::Cache(CacheError::Malformed { .. }))));
        assert!(!client.is_ready());
    }

    #[tokio::test]
    async fn test_add_prepends() {
        let mut client = StorageClient::new(MemoryCache::new(), FakeMirror::online(remote_doc()));
        let outcome = client.add(Activity::sample("30", "Network Scanning")).await.unwrap();
        assert_eq!(outcome, SyncOutcome::Synced);

        let activities = client.get_daily_activities().await.unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].topic, "Network Scanning");
        assert_eq!(activities[1].topic, "OSINT");
    }

    #[tokio::test]
    async fn test_save_writes_full_document_to_remote_and_cache() {
        let mut client = StorageClient::new(MemoryCache::new(), FakeMirror::online(remote_doc()));
        let before = client.document().map(|d| d.last_updated);
        assert!(before.is_none());

        client
            .save_mini_projects(vec![MiniProject::sample("5", "Port scanner")])
            .await
            .unwrap();

        let stored = client.mirror().stored().unwrap();
        // Untouched kinds travel with every write
        assert_eq!(stored.certificates.len(), 1);
        assert_eq!(stored.daily_activities.len(), 1);
        assert_eq!(stored.mini_projects.len(), 1);

        let cached: Vec<MiniProject> = client.cache().read("miniProjects").unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].title, "Port scanner");
    }

    #[tokio::test]
    async fn test_save_offline_is_local_only() {
        let mut client = StorageClient::new(MemoryCache::new(), FakeMirror::offline());
        let outcome = client
            .add(Certificate::sample("1", "CySA+"))
            .await
            .unwrap();
        assert_eq!(outcome, SyncOutcome::LocalOnly);
        assert!(!outcome.is_shared());

        let cached: Vec<Certificate> = client.cache().read("certificates").unwrap();
        assert_eq!(cached[0].name, "CySA+");
        assert_eq!(client.mirror().writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_save_failed_when_nothing_persists() {
        let mut client = StorageClient::new(ReadOnlyCache, FakeMirror::offline());
        let outcome = client.add(Activity::sample("1", "Recon")).await.unwrap();
        assert_eq!(outcome, SyncOutcome::Failed);
        // The in-memory copy still holds the record
        assert_eq!(client.get_daily_activities().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remote_success_with_failing_cache_is_synced() {
        let mut client = StorageClient::new(ReadOnlyCache, FakeMirror::online(SharedDocument::empty()));
        let outcome = client.add(Activity::sample("1", "Recon")).await.unwrap();
        assert_eq!(outcome, SyncOutcome::Synced);
    }

    #[tokio::test]
    async fn test_refresh_is_idempotent() {
        let mut client = StorageClient::new(MemoryCache::new(), FakeMirror::online(remote_doc()));
        client.refresh().await.unwrap();
        let first = client.document().cloned().unwrap();
        client.refresh().await.unwrap();
        let second = client.document().cloned().unwrap();
        assert!(first.same_records(&second));
    }

    #[tokio::test]
    async fn test_refresh_picks_up_remote_changes() {
        let mut client = StorageClient::new(MemoryCache::new(), FakeMirror::online(remote_doc()));
        assert_eq!(client.get_certificates().await.unwrap().len(), 1);

        let mut changed = remote_doc();
        changed.certificates.clear();
        *client.mirror().doc.lock().unwrap() = Some(changed);

        // Still the in-memory copy until refreshed
        assert_eq!(client.get_certificates().await.unwrap().len(), 1);
        client.refresh().await.unwrap();
        assert!(client.get_certificates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_reassigns_colliding_id() {
        let mut client = StorageClient::new(MemoryCache::new(), FakeMirror::online(remote_doc()));
        client.add(Activity::sample("20", "Duplicate")).await.unwrap();

        let activities = client.get_daily_activities().await.unwrap();
        assert_eq!(activities[0].id, "21");
        assert_eq!(activities[1].id, "20");
    }

    #[tokio::test]
    async fn test_summary() {
        let mut client = StorageClient::new(MemoryCache::new(), FakeMirror::online(remote_doc()));
        let summary = client.summary().await.unwrap();
        assert_eq!(summary.total(), 2);
    }

    #[test]
    fn test_unique_id() {
        let existing: HashSet<&str> = ["100", "101", "abc"].into_iter().collect();
        assert_eq!(unique_id(&existing, "99"), "99");
        assert_eq!(unique_id(&existing, "100"), "102");
        assert_eq!(unique_id(&existing, "abc"), "abc-1");
    }

    #[test]
    fn test_unique_id_at_max_timestamp_uses_suffix() {
        let max = i64::MAX.to_string();
        let existing: HashSet<&str> = [max.as_str()].into_iter().collect();
        assert_eq!(unique_id(&existing, &max), format!("{}-1", max));
    }
}
