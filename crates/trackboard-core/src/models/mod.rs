//! Data models for trackboard records.
//!
//! This module contains the four record types a learner logs, plus the
//! shared document that bundles them for the remote mirror:
//!
//! - `Activity`: a daily training session
//! - `Certificate`: a certification that is planned, in progress or earned
//! - `Project`: a final/capstone project with phases
//! - `MiniProject`: a small practice project
//! - `SharedDocument`: all four lists plus a last-updated timestamp
//!
//! Every record type implements [`Record`], which is what lets the storage
//! client stay generic over the record kind.

pub mod activity;
pub mod certificate;
pub mod document;
pub mod mini_project;
pub mod project;
pub mod summary;

use serde::{de::DeserializeOwned, Serialize};

pub use activity::Activity;
pub use certificate::{Certificate, CertificateStatus};
pub use document::SharedDocument;
pub use mini_project::{Difficulty, MiniProject, MiniProjectStatus};
pub use project::{Phase, PhaseStatus, Project, ProjectStatus};
pub use summary::{DashboardSummary, KindSummary};

/// Upper bound for every progress value.
pub const MAX_PROGRESS: u8 = 100;

/// The four record collections, each stored under one fixed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordKind {
    Certificates,
    FinalProjects,
    MiniProjects,
    DailyActivities,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Certificates,
        RecordKind::FinalProjects,
        RecordKind::MiniProjects,
        RecordKind::DailyActivities,
    ];

    /// Storage key, identical to the field name in the shared document.
    pub fn key(&self) -> &'static str {
        match self {
            RecordKind::Certificates => "certificates",
            RecordKind::FinalProjects => "finalProjects",
            RecordKind::MiniProjects => "miniProjects",
            RecordKind::DailyActivities => "dailyActivities",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Certificates => write!(f, "Certificates"),
            RecordKind::FinalProjects => write!(f, "Final Projects"),
            RecordKind::MiniProjects => write!(f, "Mini Projects"),
            RecordKind::DailyActivities => write!(f, "Daily Activities"),
        }
    }
}

/// A persisted unit of domain data.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: RecordKind;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// The list holding records of this kind inside a shared document.
    fn list(doc: &SharedDocument) -> &Vec<Self>;

    fn list_mut(doc: &mut SharedDocument) -> &mut Vec<Self>;

    /// Progress in percent, for kinds that track it.
    fn progress(&self) -> Option<u8> {
        None
    }

    /// Whether the record counts as finished (earned, completed, 100%).
    fn is_complete(&self) -> bool;
}

/// Records that carry a closed status enumeration.
pub trait HasStatus {
    type Status: Copy + PartialEq;

    fn status(&self) -> Self::Status;
}

/// Keep only records with the given status, or all of them when `status` is `None`.
pub fn filter_by_status<R>(records: &[R], status: Option<R::Status>) -> Vec<&R>
where
    R: HasStatus,
{
    records
        .iter()
        .filter(|r| status.map_or(true, |s| r.status() == s))
        .collect()
}

/// Returned when a status or difficulty string is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Normalise user input like "In Progress" or "in_progress" to "in-progress".
pub(crate) fn normalize_variant(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .replace(|c: char| c == ' ' || c == '_', "-")
}

/// Clamp a raw progress value into `0..=100`.
pub fn clamp_progress(value: i64) -> u8 {
    value.clamp(0, MAX_PROGRESS as i64) as u8
}
