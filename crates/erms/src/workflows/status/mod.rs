//! Derived case status classification.
//!
//! Every dashboard in the retirement office answers the same question over
//! a different fixed set of fields: has this case not been touched yet, is
//! it somewhere in the middle, or is every mandatory entry filled in? The
//! classifier here is that rule extracted once, parameterized by a
//! per-workflow [`FieldSet`] descriptor instead of copied per screen.

pub mod classifier;
pub mod descriptor;
pub mod service;

pub use classifier::{classify, completion, CaseStatus, CompletionReport};
pub use descriptor::{FieldSet, Workflow};
pub use service::{CaseFieldStore, CaseStatusService, DerivedStatusStore};
