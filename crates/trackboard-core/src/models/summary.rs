//! Dashboard counters derived from a shared document.

use serde::Serialize;

use super::{Record, RecordKind, SharedDocument};

/// Totals for one record kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindSummary {
    pub kind: RecordKind,
    pub count: usize,
    pub completed: usize,
    /// Mean progress rounded to the nearest percent; `None` for kinds
    /// without progress or with no records.
    pub average_progress: Option<u8>,
}

impl KindSummary {
    fn of<R: Record>(records: &[R]) -> Self {
        let progress: Vec<u32> = records
            .iter()
            .filter_map(|r| r.progress())
            .map(u32::from)
            .collect();
        let average_progress = if progress.is_empty() {
            None
        } else {
            let total: u32 = progress.iter().sum();
            let count = progress.len() as u32;
            Some(((total + count / 2) / count) as u8)
        };

        Self {
            kind: R::KIND,
            count: records.len(),
            completed: records.iter().filter(|r| r.is_complete()).count(),
            average_progress,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub kinds: Vec<KindSummary>,
}

impl DashboardSummary {
    pub fn from_document(doc: &SharedDocument) -> Self {
        Self {
            kinds: vec![
                KindSummary::of(&doc.daily_activities),
                KindSummary::of(&doc.certificates),
                KindSummary::of(&doc.final_projects),
                KindSummary::of(&doc.mini_projects),
            ],
        }
    }

    pub fn get(&self, kind: RecordKind) -> Option<&KindSummary> {
        self.kinds.iter().find(|k| k.kind == kind)
    }

    pub fn total(&self) -> usize {
        self.kinds.iter().map(|k| k.count).sum()
    }
}
