//! Command-line structure for the `trackboard` binary.

use std::path::Path;

use clap::{Args, Parser, Subcommand, ValueEnum};
use trackboard_core::models::{CertificateStatus, Difficulty, MiniProjectStatus, ProjectStatus};

/// trackboard - log training activities, certifications and projects
///
/// Records are kept in a local cache and mirrored to a shared remote
/// document when one is configured.
#[derive(Debug, Parser)]
#[command(name = "trackboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Ignore the configured remote and use only the local cache
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List records of one kind, newest first
    List(ListArgs),

    /// Log a new record
    #[command(subcommand)]
    Add(AddCommand),

    /// Re-fetch the shared document
    Refresh,

    /// Show sync configuration, cache ages and totals
    Status,

    /// View or modify configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Activities,
    Certificates,
    Projects,
    Mini,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    pub kind: KindArg,

    /// Only show records with this status (ignored for activities)
    #[arg(long)]
    pub status: Option<String>,

    /// Print raw JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum AddCommand {
    /// Log a daily training activity
    Activity(ActivityArgs),
    /// Track a certification
    Certificate(CertificateArgs),
    /// Start a final project
    Project(ProjectArgs),
    /// Log a mini project
    Mini(MiniProjectArgs),
}

#[derive(Debug, Args)]
pub struct ActivityArgs {
    #[arg(long)]
    pub date: String,
    #[arg(long)]
    pub topic: String,
    #[arg(long)]
    pub duration: String,
    #[arg(long)]
    pub description: String,
    /// Comma separated, e.g. "Nmap, Wireshark"
    #[arg(long, default_value = "")]
    pub skills: String,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub progress: i64,
    /// Repeat for each objective
    #[arg(long = "objective")]
    pub objectives: Vec<String>,
    /// Repeat for each resource
    #[arg(long = "resource")]
    pub resources: Vec<String>,
    /// Attach a file by name (only the name is recorded)
    #[arg(long = "file")]
    pub files: Vec<String>,
}

#[derive(Debug, Args)]
pub struct CertificateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub provider: String,
    #[arg(long, default_value = "planned")]
    pub status: CertificateStatus,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub progress: i64,
    #[arg(long = "earned", default_value = "")]
    pub date_earned: String,
    #[arg(long = "expires", default_value = "")]
    pub expiry_date: String,
    #[arg(long, default_value = "")]
    pub credential_id: String,
    /// Repeat for each study material
    #[arg(long = "material")]
    pub study_materials: Vec<String>,
    #[arg(long, default_value = "")]
    pub notes: String,
    #[arg(long = "file")]
    pub files: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    #[arg(long = "start")]
    pub start_date: String,
    #[arg(long = "end", default_value = "")]
    pub end_date: String,
    #[arg(long, default_value = "planning")]
    pub status: ProjectStatus,
    /// Comma separated
    #[arg(long = "tech", default_value = "")]
    pub technologies: String,
    #[arg(long = "objective")]
    pub objectives: Vec<String>,
    /// Repeat for each phase, in order
    #[arg(long = "phase")]
    pub phases: Vec<String>,
    #[arg(long = "achievement")]
    pub achievements: Vec<String>,
    #[arg(long = "challenge")]
    pub challenges: Vec<String>,
    #[arg(long = "repo", default_value = "")]
    pub repository: String,
    #[arg(long = "demo", default_value = "")]
    pub demo_url: String,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub progress: i64,
    #[arg(long = "file")]
    pub files: Vec<String>,
}

#[derive(Debug, Args)]
pub struct MiniProjectArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub time_spent: String,
    #[arg(long, default_value = "planned")]
    pub status: MiniProjectStatus,
    #[arg(long, default_value = "beginner")]
    pub difficulty: Difficulty,
    #[arg(long = "completed", default_value = "")]
    pub date_completed: String,
    /// Comma separated
    #[arg(long = "tech", default_value = "")]
    pub technologies: String,
    #[arg(long = "outcome")]
    pub learning_outcomes: Vec<String>,
    #[arg(long = "repo", default_value = "")]
    pub repository: String,
    #[arg(long = "demo", default_value = "")]
    pub demo_url: String,
    #[arg(long = "file")]
    pub files: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the current configuration
    Show,
    /// Point at a remote document; prompts for its API key
    SetRemote {
        url: String,
        /// Header the API key is sent in
        #[arg(long)]
        header: Option<String>,
        /// Do not prompt for an API key
        #[arg(long)]
        no_key: bool,
    },
    /// Forget the remote document and its stored API key
    ClearRemote,
}

/// Keep only the file name of each attachment path.
pub fn file_names(paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            Path::new(p)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.clone())
        })
        .collect()
}
