use crate::workflows::cases::CaseId;

use super::domain::{Assignment, AssignmentId, AssignmentStatus, HistoryEvent};

/// One routing transition, applied as a unit: supersede the active
/// assignment, create its successor, and append the history event.
/// Either all three land or none do.
#[derive(Debug, Clone)]
pub struct RoutingTransition {
    pub case_id: CaseId,
    pub supersede: Option<Supersession>,
    pub create: Option<Assignment>,
    pub event: HistoryEvent,
}

/// Flips the named active assignment to its terminal status.
///
/// Carrying the assignment identity lets the store reject a transition
/// when the active assignment changed underneath the caller.
#[derive(Debug, Clone)]
pub struct Supersession {
    pub assignment_id: AssignmentId,
    pub status: AssignmentStatus,
}

/// Storage abstraction so the routing service can be exercised in
/// isolation. Any store with per-row read/write and a transaction
/// primitive suffices; tests use an in-memory map behind a mutex.
pub trait RoutingRepository: Send + Sync {
    /// Applies the whole transition atomically.
    ///
    /// Must reject with [`RepositoryError::Conflict`] when the transition
    /// would leave two active assignments for one case, and with
    /// [`RepositoryError::ConcurrentModification`] when the supersession
    /// names an assignment that is no longer the active one.
    fn commit(&self, transition: RoutingTransition) -> Result<(), RepositoryError>;

    /// The case's assignment currently in `assigned` status, if any.
    fn active_assignment(&self, case_id: &CaseId) -> Result<Option<Assignment>, RepositoryError>;

    /// The most recent assignment regardless of status.
    fn latest_assignment(&self, case_id: &CaseId) -> Result<Option<Assignment>, RepositoryError>;

    /// History events for the case, newest first.
    fn history(&self, case_id: &CaseId) -> Result<Vec<HistoryEvent>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("an active assignment already exists")]
    Conflict,
    #[error("assignment not found")]
    NotFound,
    #[error("active assignment changed while the transition was in flight")]
    ConcurrentModification,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
