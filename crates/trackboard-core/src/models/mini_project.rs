use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{normalize_variant, HasStatus, ParseEnumError, Record, RecordKind, SharedDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum MiniProjectStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
}

impl std::fmt::Display for MiniProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MiniProjectStatus::Planned => write!(f, "Planned"),
            MiniProjectStatus::InProgress => write!(f, "In Progress"),
            MiniProjectStatus::Completed => write!(f, "Completed"),
        }
    }
}

impl FromStr for MiniProjectStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "planned" => Ok(MiniProjectStatus::Planned),
            "in-progress" => Ok(MiniProjectStatus::InProgress),
            "completed" => Ok(MiniProjectStatus::Completed),
            _ => Err(ParseEnumError {
                field: "mini project status",
                value: s.to_string(),
                expected: "planned, in-progress, completed",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced => write!(f, "Advanced"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(ParseEnumError {
                field: "difficulty",
                value: s.to_string(),
                expected: "beginner, intermediate, advanced",
            }),
        }
    }
}

/// A small practice project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct MiniProject {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: MiniProjectStatus,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_completed: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub learning_outcomes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub time_spent: String,
    #[serde(default)]
    pub files: Vec<String>,
}

impl Record for MiniProject {
    const KIND: RecordKind = RecordKind::MiniProjects;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn list(doc: &SharedDocument) -> &Vec<Self> {
        &doc.mini_projects
    }

    fn list_mut(doc: &mut SharedDocument) -> &mut Vec<Self> {
        &mut doc.mini_projects
    }

    fn is_complete(&self) -> bool {
        self.status == MiniProjectStatus::Completed
    }
}

impl HasStatus for MiniProject {
    type Status = MiniProjectStatus;

    fn status(&self) -> MiniProjectStatus {
        self.status
    }
}

#[cfg(test)]
impl MiniProject {
    pub(crate) fn sample(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            status: MiniProjectStatus::Planned,
            difficulty: Difficulty::Beginner,
            date_completed: None,
            technologies: Vec::new(),
            learning_outcomes: Vec::new(),
            repository: None,
            demo_url: None,
            time_spent: "3 hours".to_string(),
            files: Vec::new(),
        }
    }
}
