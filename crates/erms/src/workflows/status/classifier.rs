use serde::{Deserialize, Serialize};

use super::descriptor::FieldSet;

/// Derived progress of a case within one workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Pending,
    Processing,
    Completed,
}

impl CaseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
        }
    }
}

/// Tally of a case's field fill-state against a workflow field set.
///
/// `touched` counts fields carrying any real value; `completable` counts
/// the subset whose value also advances the case toward completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionReport {
    pub total: usize,
    pub touched: usize,
    pub completable: usize,
}

impl CompletionReport {
    /// Integer completion percentage, 0 for an empty field set.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        (self.completable * 100 / self.total) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.status() == CaseStatus::Completed
    }

    pub fn status(&self) -> CaseStatus {
        if self.total == 0 || self.touched == 0 {
            CaseStatus::Pending
        } else if self.completable == self.total {
            CaseStatus::Completed
        } else {
            CaseStatus::Processing
        }
    }
}

/// Tallies `values` against the descriptor.
///
/// A field is touched when its value is present, non-empty after trimming,
/// and not one of the blank-equivalent markers. A touched field counts
/// toward completion unless its value is a negative marker such as
/// `"Not Available"`. Values beyond the descriptor's field list are
/// ignored; missing trailing values count as unfilled.
pub fn completion(values: &[Option<String>], field_set: &FieldSet) -> CompletionReport {
    let total = field_set.fields.len();
    let mut touched = 0;
    let mut completable = 0;

    for value in values.iter().take(total) {
        let Some(raw) = value else { continue };
        let trimmed = raw.trim();
        if trimmed.is_empty() || field_set.ignored_for_pending.contains(&trimmed) {
            continue;
        }
        touched += 1;
        if !field_set.excluded_from_completion.contains(&trimmed) {
            completable += 1;
        }
    }

    CompletionReport {
        total,
        touched,
        completable,
    }
}

/// Classifies a case from its raw field values. Total and deterministic.
pub fn classify(values: &[Option<String>], field_set: &FieldSet) -> CaseStatus {
    completion(values, field_set).status()
}
