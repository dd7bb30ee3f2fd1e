//! Command handlers. Each one takes the storage client built in `main`.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use trackboard_core::auth::CredentialStore;
use trackboard_core::forms::{ActivityDraft, CertificateDraft, MiniProjectDraft, ProjectDraft};
use trackboard_core::models::{
    filter_by_status, CertificateStatus, MiniProjectStatus, ProjectStatus, Record, RecordKind,
};
use trackboard_core::utils::{format_optional, truncate_string};
use trackboard_core::{Config, FileCache, LocalCache, RemoteMirror, StorageClient, SyncOutcome};

use crate::cli::{file_names, AddCommand, ConfigCommand, KindArg, ListArgs};

pub type Client = StorageClient<FileCache, Box<dyn RemoteMirror>>;

/// Column width for titles in list output
const TITLE_WIDTH: usize = 40;

fn print_outcome(action: &str, outcome: SyncOutcome) {
    if outcome.is_shared() {
        println!("{} (synced)", action);
    } else if outcome == SyncOutcome::LocalOnly {
        println!("{} (saved locally only - remote unavailable)", action);
    } else {
        eprintln!("{} in memory only - nothing was persisted", action);
    }
}

pub async fn list(client: &mut Client, args: ListArgs) -> Result<()> {
    match args.kind {
        KindArg::Activities => {
            let records = client.get_daily_activities().await?;
            if args.json {
                return print_json(records);
            }
            print_empty_hint(records.is_empty(), RecordKind::DailyActivities);
            for a in records {
                println!(
                    "{:<12} {:<40} {:>10} {:>4}%  {}",
                    a.date,
                    truncate_string(&a.topic, TITLE_WIDTH),
                    a.duration,
                    a.progress,
                    a.skills_display()
                );
            }
        }
        KindArg::Certificates => {
            let status = parse_status::<CertificateStatus>(args.status.as_deref())?;
            let records = client.get_certificates().await?;
            let records = filter_by_status(records, status);
            if args.json {
                return print_json(&records);
            }
            print_empty_hint(records.is_empty(), RecordKind::Certificates);
            for c in records {
                println!(
                    "{:<40} {:<16} {:<12} {:>4}%  earned {}",
                    truncate_string(&c.name, TITLE_WIDTH),
                    c.provider,
                    c.status.to_string(),
                    c.progress,
                    c.earned_display()
                );
            }
        }
        KindArg::Projects => {
            let status = parse_status::<ProjectStatus>(args.status.as_deref())?;
            let records = client.get_final_projects().await?;
            let records = filter_by_status(records, status);
            if args.json {
                return print_json(&records);
            }
            print_empty_hint(records.is_empty(), RecordKind::FinalProjects);
            for p in records {
                println!(
                    "{:<40} {:<12} {:>4}%  phases {}/{}  repo {}",
                    truncate_string(&p.title, TITLE_WIDTH),
                    p.status.to_string(),
                    p.progress,
                    p.completed_phases(),
                    p.phases.len(),
                    format_optional(&p.repository, "-")
                );
            }
        }
        KindArg::Mini => {
            let status = parse_status::<MiniProjectStatus>(args.status.as_deref())?;
            let records = client.get_mini_projects().await?;
            let records = filter_by_status(records, status);
            if args.json {
                return print_json(&records);
            }
            print_empty_hint(records.is_empty(), RecordKind::MiniProjects);
            for p in records {
                println!(
                    "{:<40} {:<12} {:<13} {}",
                    truncate_string(&p.title, TITLE_WIDTH),
                    p.status.to_string(),
                    p.difficulty.to_string(),
                    p.time_spent
                );
            }
        }
    }
    Ok(())
}

/// `None` and "all" both mean no filter.
fn parse_status<S>(value: Option<&str>) -> Result<Option<S>>
where
    S: std::str::FromStr,
    S::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        None => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => Ok(Some(v.parse::<S>()?)),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_empty_hint(empty: bool, kind: RecordKind) {
    if empty {
        println!("No {} recorded yet", kind.to_string().to_lowercase());
    }
}

pub async fn add(client: &mut Client, command: AddCommand) -> Result<()> {
    let now = Utc::now();
    let (label, outcome) = match command {
        AddCommand::Activity(args) => {
            let record = ActivityDraft {
                date: args.date,
                topic: args.topic,
                duration: args.duration,
                description: args.description,
                skills: args.skills,
                progress: args.progress,
                objectives: args.objectives.join("\n"),
                resources: args.resources.join("\n"),
                files: file_names(&args.files),
            }
            .build(now)?;
            add_record(client, record).await?
        }
        AddCommand::Certificate(args) => {
            let record = CertificateDraft {
                name: args.name,
                provider: args.provider,
                status: args.status,
                progress: args.progress,
                date_earned: args.date_earned,
                expiry_date: args.expiry_date,
                credential_id: args.credential_id,
                study_materials: args.study_materials.join("\n"),
                notes: args.notes,
                files: file_names(&args.files),
            }
            .build(now)?;
            add_record(client, record).await?
        }
        AddCommand::Project(args) => {
            let record = ProjectDraft {
                title: args.title,
                description: args.description,
                status: args.status,
                start_date: args.start_date,
                end_date: args.end_date,
                technologies: args.technologies,
                objectives: args.objectives.join("\n"),
                phases: args.phases.join("\n"),
                achievements: args.achievements.join("\n"),
                challenges: args.challenges.join("\n"),
                repository: args.repository,
                demo_url: args.demo_url,
                progress: args.progress,
                files: file_names(&args.files),
            }
            .build(now)?;
            add_record(client, record).await?
        }
        AddCommand::Mini(args) => {
            let record = MiniProjectDraft {
                title: args.title,
                description: args.description,
                status: args.status,
                difficulty: args.difficulty,
                date_completed: args.date_completed,
                technologies: args.technologies,
                learning_outcomes: args.learning_outcomes.join("\n"),
                repository: args.repository,
                demo_url: args.demo_url,
                time_spent: args.time_spent,
                files: file_names(&args.files),
            }
            .build(now)?;
            add_record(client, record).await?
        }
    };

    print_outcome(&label, outcome);
    Ok(())
}

async fn add_record<R: Record>(client: &mut Client, record: R) -> Result<(String, SyncOutcome)> {
    let outcome = client.add(record).await?;
    let id = client
        .get::<R>()
        .await?
        .first()
        .map(|r| r.id().to_string())
        .unwrap_or_default();
    info!(key = R::KIND.key(), id = %id, outcome = %outcome, "Record added");
    Ok((format!("Added to {} as {}", R::KIND, id), outcome))
}

pub async fn refresh(client: &mut Client) -> Result<()> {
    let outcome = client.refresh().await?;
    let total = client.document().map(|d| d.total_records()).unwrap_or(0);
    match outcome {
        SyncOutcome::Synced => println!("Refreshed {} records from {}", total, client.mirror().describe()),
        _ => println!("Remote unavailable; showing {} records from the local cache", total),
    }
    Ok(())
}

pub async fn status(client: &mut Client) -> Result<()> {
    println!("Remote:  {}", client.mirror().describe());
    println!("Cache:   {}", client.cache().dir().display());

    let ages = client.cache().ages();
    let summary = client.summary().await?;
    println!();
    for kind in &summary.kinds {
        let progress = kind
            .average_progress
            .map(|p| format!("{:>3}% avg", p))
            .unwrap_or_else(|| "        ".to_string());
        println!(
            "{:<18} {:>4} total {:>4} done  {}  cached {}",
            kind.kind.to_string(),
            kind.count,
            kind.completed,
            progress,
            ages.get(kind.kind).unwrap_or("never")
        );
    }
    println!();
    println!("{} records, last cached {}", summary.total(), ages.last_updated());
    Ok(())
}

pub fn config(command: ConfigCommand) -> Result<()> {
    let mut config = Config::load()?;
    match command {
        ConfigCommand::Show => {
            println!("Config file: {}", Config::config_path()?.display());
            println!("Remote URL:  {}", config.remote_url().unwrap_or_else(|| "(none)".to_string()));
            println!("Auth header: {}", config.auth_header());
            println!("Cache dir:   {}", config.cache_dir()?.display());
        }
        ConfigCommand::SetRemote { url, header, no_key } => {
            let url = url.trim().trim_end_matches('/').to_string();
            if !no_key {
                let key = rpassword::prompt_password("API key (leave empty for none): ")
                    .context("Failed to read API key")?;
                if !key.is_empty() {
                    CredentialStore::store(&url, &key)?;
                }
            }
            config.remote_url = Some(url.clone());
            if header.is_some() {
                config.auth_header = header;
            }
            config.save()?;
            println!("Remote set to {}", url);
        }
        ConfigCommand::ClearRemote => {
            if let Some(url) = config.remote_url.take() {
                // Missing keychain entries are fine here
                let _ = CredentialStore::delete(&url);
                config.save()?;
                println!("Remote {} removed", url);
            } else {
                println!("No remote configured");
            }
        }
    }
    Ok(())
}
