use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Activity, Certificate, MiniProject, Project};

/// Everything the dashboard stores, in the shape the remote mirror holds it.
///
/// The remote side is overwritten wholesale, so this is the unit of every
/// remote write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedDocument {
    #[serde(default)]
    pub certificates: Vec<Certificate>,
    #[serde(default)]
    pub final_projects: Vec<Project>,
    #[serde(default)]
    pub mini_projects: Vec<MiniProject>,
    #[serde(default)]
    pub daily_activities: Vec<Activity>,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl Default for SharedDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl SharedDocument {
    pub fn empty() -> Self {
        Self {
            certificates: Vec::new(),
            final_projects: Vec::new(),
            mini_projects: Vec::new(),
            daily_activities: Vec::new(),
            last_updated: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    /// Compare record content only, ignoring `last_updated`.
    pub fn same_records(&self, other: &SharedDocument) -> bool {
        self.certificates == other.certificates
            && self.final_projects == other.final_projects
            && self.mini_projects == other.mini_projects
            && self.daily_activities == other.daily_activities
    }

    pub fn total_records(&self) -> usize {
        self.certificates.len()
            + self.final_projects.len()
            + self.mini_projects.len()
            + self.daily_activities.len()
    }
}
