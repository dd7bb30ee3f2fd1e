use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{normalize_variant, HasStatus, ParseEnumError, Record, RecordKind, SharedDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    Completed,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Planning => write!(f, "Planning"),
            ProjectStatus::InProgress => write!(f, "In Progress"),
            ProjectStatus::Completed => write!(f, "Completed"),
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "planning" => Ok(ProjectStatus::Planning),
            "in-progress" => Ok(ProjectStatus::InProgress),
            "completed" => Ok(ProjectStatus::Completed),
            _ => Err(ParseEnumError {
                field: "project status",
                value: s.to_string(),
                expected: "planning, in-progress, completed",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum PhaseStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// One named phase of a final project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Phase {
    pub name: String,
    #[serde(default)]
    pub status: PhaseStatus,
    #[serde(default)]
    pub description: String,
}

impl Phase {
    /// New phases always start pending with no description.
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: PhaseStatus::Pending,
            description: String::new(),
        }
    }
}

/// A final (capstone) project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub files: Vec<String>,
}

impl Project {
    /// Number of phases marked completed, for "2/5 phases" style display.
    pub fn completed_phases(&self) -> usize {
        self.phases
            .iter()
            .filter(|p| p.status == PhaseStatus::Completed)
            .count()
    }
}

impl Record for Project {
    const KIND: RecordKind = RecordKind::FinalProjects;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn list(doc: &SharedDocument) -> &Vec<Self> {
        &doc.final_projects
    }

    fn list_mut(doc: &mut SharedDocument) -> &mut Vec<Self> {
        &mut doc.final_projects
    }

    fn progress(&self) -> Option<u8> {
        Some(self.progress)
    }

    fn is_complete(&self) -> bool {
        self.status == ProjectStatus::Completed
    }
}

impl HasStatus for Project {
    type Status = ProjectStatus;

    fn status(&self) -> ProjectStatus {
        self.status
    }
}

#[cfg(test)]
impl Project {
    pub(crate) fn sample(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            status: ProjectStatus::Planning,
            start_date: "2024-02-01".to_string(),
            end_date: None,
            technologies: Vec::new(),
            objectives: Vec::new(),
            phases: Vec::new(),
            achievements: Vec::new(),
            challenges: Vec::new(),
            repository: None,
            demo_url: None,
            progress: 0,
            files: Vec::new(),
        }
    }
}
