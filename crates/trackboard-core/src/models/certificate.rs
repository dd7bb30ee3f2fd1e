use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{normalize_variant, HasStatus, ParseEnumError, Record, RecordKind, SharedDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum CertificateStatus {
    Earned,
    InProgress,
    #[default]
    Planned,
}

impl std::fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CertificateStatus::Earned => write!(f, "Earned"),
            CertificateStatus::InProgress => write!(f, "In Progress"),
            CertificateStatus::Planned => write!(f, "Planned"),
        }
    }
}

impl FromStr for CertificateStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "earned" => Ok(CertificateStatus::Earned),
            "in-progress" => Ok(CertificateStatus::InProgress),
            "planned" => Ok(CertificateStatus::Planned),
            _ => Err(ParseEnumError {
                field: "certificate status",
                value: s.to_string(),
                expected: "earned, in-progress, planned",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    pub name: String,
    pub provider: String,
    #[serde(default)]
    pub status: CertificateStatus,
    #[serde(default)]
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_earned: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(default)]
    pub study_materials: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub files: Vec<String>,
}

impl Certificate {
    /// Earned date, or "-" when the certificate has not been earned.
    pub fn earned_display(&self) -> &str {
        self.date_earned.as_deref().unwrap_or("-")
    }
}

impl Record for Certificate {
    const KIND: RecordKind = RecordKind::Certificates;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn list(doc: &SharedDocument) -> &Vec<Self> {
        &doc.certificates
    }

    fn list_mut(doc: &mut SharedDocument) -> &mut Vec<Self> {
        &mut doc.certificates
    }

    fn progress(&self) -> Option<u8> {
        Some(self.progress)
    }

    fn is_complete(&self) -> bool {
        self.status == CertificateStatus::Earned
    }
}

impl HasStatus for Certificate {
    type Status = CertificateStatus;

    fn status(&self) -> CertificateStatus {
        self.status
    }
}

#[cfg(test)]
impl Certificate {
    pub(crate) fn sample(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            provider: "CompTIA".to_string(),
            status: CertificateStatus::Planned,
            progress: 0,
            date_earned: None,
            expiry_date: None,
            credential_id: None,
            study_materials: Vec::new(),
            notes: String::new(),
            files: Vec::new(),
        }
    }
}
