use serde::{Deserialize, Serialize};

use super::{Record, RecordKind, SharedDocument, MAX_PROGRESS};

/// One logged day of training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub date: String,
    pub topic: String,
    pub duration: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

impl Activity {
    pub fn skills_display(&self) -> String {
        if self.skills.is_empty() {
            "-".to_string()
        } else {
            self.skills.join(", ")
        }
    }
}

impl Record for Activity {
    const KIND: RecordKind = RecordKind::DailyActivities;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn list(doc: &SharedDocument) -> &Vec<Self> {
        &doc.daily_activities
    }

    fn list_mut(doc: &mut SharedDocument) -> &mut Vec<Self> {
        &mut doc.daily_activities
    }

    fn progress(&self) -> Option<u8> {
        Some(self.progress)
    }

    fn is_complete(&self) -> bool {
        self.progress >= MAX_PROGRESS
    }
}

#[cfg(test)]
impl Activity {
    pub(crate) fn sample(id: &str, topic: &str) -> Self {
        Self {
            id: id.to_string(),
            date: "2024-01-15".to_string(),
            topic: topic.to_string(),
            duration: "1 hour".to_string(),
            description: String::new(),
            skills: Vec::new(),
            progress: 0,
            objectives: Vec::new(),
            resources: Vec::new(),
            files: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lists_serialize_as_arrays() {
        let activity = Activity::sample("1705276800000", "Network Scanning");
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["skills"], serde_json::json!([]));
        assert_eq!(json["objectives"], serde_json::json!([]));
        assert_eq!(json["resources"], serde_json::json!([]));
        assert_eq!(json["files"], serde_json::json!([]));
    }

    #[test]
    fn test_parse_missing_lists_default_empty() {
        let json = r#"{"id":"1","date":"2024-01-15","topic":"Recon","duration":"2 hours","progress":100}"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert!(activity.skills.is_empty());
        assert!(activity.files.is_empty());
        assert_eq!(activity.progress, 100);
        assert!(activity.is_complete());
    }

    #[test]
    fn test_skills_display() {
        let mut activity = Activity::sample("1", "Recon");
        assert_eq!(activity.skills_display(), "-");
        activity.skills = vec!["Nmap".to_string(), "Wireshark".to_string()];
        assert_eq!(activity.skills_display(), "Nmap, Wireshark");
    }
}
