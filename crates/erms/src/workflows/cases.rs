use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one employee's retirement case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CaseId(pub String);

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a user who can hold custody of a case file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustodianId(pub String);

impl fmt::Display for CustodianId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error enumeration for the external case field store.
#[derive(Debug, thiserror::Error)]
pub enum FieldStoreError {
    #[error("case not found")]
    NotFound,
    #[error("field store unavailable: {0}")]
    Unavailable(String),
}
