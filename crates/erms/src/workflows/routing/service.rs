use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::workflows::cases::{CaseId, CustodianId, FieldStoreError};
use crate::workflows::status::{completion, CaseFieldStore, Workflow};

use super::domain::{
    Assignment, AssignmentId, AssignmentStatus, Custodian, CustodianLevel, HistoryEvent,
    RoutingAction,
};
use super::repository::{RepositoryError, RoutingRepository, RoutingTransition, Supersession};

/// Advances a case through the custody hierarchy while maintaining the
/// single active assignment and the append-only history ledger.
///
/// All assignment and history writes in the system funnel through this
/// service; nothing else is allowed to touch those records.
pub struct FileRoutingService<R, S> {
    repository: Arc<R>,
    fields: Arc<S>,
    gate: Workflow,
}

static ASSIGNMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assignment_id() -> AssignmentId {
    let id = ASSIGNMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssignmentId(format!("asg-{id:06}"))
}

/// The three holder-initiated moves share one transition shape and differ
/// only in target level, superseded status, and logged action.
#[derive(Debug, Clone, Copy)]
enum Move {
    Forward,
    Revert,
    Reassign,
}

impl Move {
    fn target_level(self, current: CustodianLevel) -> CustodianLevel {
        match self {
            Move::Forward => current.next(),
            Move::Revert => current.previous(),
            Move::Reassign => current,
        }
    }

    fn superseded_status(self) -> AssignmentStatus {
        match self {
            Move::Forward => AssignmentStatus::Completed,
            Move::Revert => AssignmentStatus::Reverted,
            Move::Reassign => AssignmentStatus::Reassigned,
        }
    }

    fn action(self) -> RoutingAction {
        match self {
            Move::Forward => RoutingAction::Forwarded,
            Move::Revert => RoutingAction::Reverted,
            Move::Reassign => RoutingAction::Reassigned,
        }
    }
}

impl<R, S> FileRoutingService<R, S>
where
    R: RoutingRepository + 'static,
    S: CaseFieldStore + 'static,
{
    pub fn new(repository: Arc<R>, fields: Arc<S>) -> Self {
        Self::with_gate(repository, fields, Workflow::FileTracking)
    }

    /// Overrides the workflow whose field set gates entry into routing.
    pub fn with_gate(repository: Arc<R>, fields: Arc<S>, gate: Workflow) -> Self {
        Self {
            repository,
            fields,
            gate,
        }
    }

    /// Opens routing for a case: a clerk hands the file to an officer.
    ///
    /// The case must be 100% complete against the gate field set; the
    /// first assignment lands at the officer level.
    pub fn start_routing(
        &self,
        case_id: &CaseId,
        initiator: &Custodian,
        assign_to: &CustodianId,
        comments: Option<String>,
    ) -> Result<Assignment, RoutingError> {
        if initiator.level != CustodianLevel::Clerk {
            return Err(RoutingError::InvalidRole {
                level: initiator.level,
                operation: "start routing",
            });
        }

        let values = self.fields.fields(case_id, self.gate)?;
        let report = completion(&values, self.gate.field_set());
        if !report.is_complete() {
            return Err(RoutingError::IncompleteCase {
                case_id: case_id.clone(),
                percent: report.percent(),
            });
        }

        let assignment = Assignment {
            assignment_id: next_assignment_id(),
            case_id: case_id.clone(),
            assigned_to: assign_to.clone(),
            assigned_by: initiator.id.clone(),
            assigned_at: Utc::now(),
            level: CustodianLevel::Officer,
            status: AssignmentStatus::Assigned,
            comments: comments.clone(),
        };
        let event = HistoryEvent {
            case_id: case_id.clone(),
            from_custodian: Some(initiator.id.clone()),
            to_custodian: Some(assign_to.clone()),
            from_level: Some(initiator.level),
            to_level: Some(assignment.level),
            action: RoutingAction::Assigned,
            comments,
            created_at: assignment.assigned_at,
        };

        self.repository.commit(RoutingTransition {
            case_id: case_id.clone(),
            supersede: None,
            create: Some(assignment.clone()),
            event,
        })?;

        info!(%case_id, assigned_to = %assignment.assigned_to, "routing opened");
        Ok(assignment)
    }

    /// Hands the case up one level. Saturates at the top of the hierarchy.
    pub fn forward(
        &self,
        case_id: &CaseId,
        actor: &CustodianId,
        target: &CustodianId,
        comments: Option<String>,
    ) -> Result<Assignment, RoutingError> {
        self.advance(case_id, actor, target, comments, Move::Forward)
    }

    /// Sends the case back down one level. Saturates at the bottom.
    pub fn revert(
        &self,
        case_id: &CaseId,
        actor: &CustodianId,
        target: &CustodianId,
        comments: Option<String>,
    ) -> Result<Assignment, RoutingError> {
        self.advance(case_id, actor, target, comments, Move::Revert)
    }

    /// Changes the custodian at the current level.
    pub fn reassign(
        &self,
        case_id: &CaseId,
        actor: &CustodianId,
        target: &CustodianId,
        comments: Option<String>,
    ) -> Result<Assignment, RoutingError> {
        self.advance(case_id, actor, target, comments, Move::Reassign)
    }

    fn advance(
        &self,
        case_id: &CaseId,
        actor: &CustodianId,
        target: &CustodianId,
        comments: Option<String>,
        movement: Move,
    ) -> Result<Assignment, RoutingError> {
        let active = self.active_held_by(case_id, actor)?;
        let level = movement.target_level(active.level);

        let assignment = Assignment {
            assignment_id: next_assignment_id(),
            case_id: case_id.clone(),
            assigned_to: target.clone(),
            assigned_by: actor.clone(),
            assigned_at: Utc::now(),
            level,
            status: AssignmentStatus::Assigned,
            comments: comments.clone(),
        };
        let event = HistoryEvent {
            case_id: case_id.clone(),
            from_custodian: Some(actor.clone()),
            to_custodian: Some(target.clone()),
            from_level: Some(active.level),
            to_level: Some(level),
            action: movement.action(),
            comments,
            created_at: assignment.assigned_at,
        };

        self.repository.commit(RoutingTransition {
            case_id: case_id.clone(),
            supersede: Some(Supersession {
                assignment_id: active.assignment_id,
                status: movement.superseded_status(),
            }),
            create: Some(assignment.clone()),
            event,
        })?;

        info!(
            %case_id,
            action = movement.action().label(),
            level = assignment.level.label(),
            "routing transition committed"
        );
        Ok(assignment)
    }

    /// Closes routing on the case. Only admin and superadmin holders may
    /// complete; no successor assignment is created.
    pub fn complete(
        &self,
        case_id: &CaseId,
        actor: &CustodianId,
        comments: Option<String>,
    ) -> Result<(), RoutingError> {
        let active = self.active_held_by(case_id, actor)?;
        if !active.level.is_senior() {
            return Err(RoutingError::InvalidRole {
                level: active.level,
                operation: "complete routing",
            });
        }

        let event = HistoryEvent {
            case_id: case_id.clone(),
            from_custodian: Some(actor.clone()),
            to_custodian: None,
            from_level: Some(active.level),
            to_level: None,
            action: RoutingAction::Completed,
            comments,
            created_at: Utc::now(),
        };

        self.repository.commit(RoutingTransition {
            case_id: case_id.clone(),
            supersede: Some(Supersession {
                assignment_id: active.assignment_id,
                status: AssignmentStatus::Completed,
            }),
            create: None,
            event,
        })?;

        info!(%case_id, "routing completed");
        Ok(())
    }

    /// Most recent assignment regardless of status, for display even
    /// after routing has closed.
    pub fn current_assignment(&self, case_id: &CaseId) -> Result<Option<Assignment>, RoutingError> {
        Ok(self.repository.latest_assignment(case_id)?)
    }

    /// History events for the case, newest first.
    pub fn history(&self, case_id: &CaseId) -> Result<Vec<HistoryEvent>, RoutingError> {
        Ok(self.repository.history(case_id)?)
    }

    fn active_held_by(
        &self,
        case_id: &CaseId,
        actor: &CustodianId,
    ) -> Result<Assignment, RoutingError> {
        let active = self
            .repository
            .active_assignment(case_id)?
            .ok_or_else(|| RoutingError::NoActiveAssignment(case_id.clone()))?;
        if active.assigned_to != *actor {
            return Err(RoutingError::NotCurrentHolder {
                case_id: case_id.clone(),
                actor: actor.clone(),
            });
        }
        Ok(active)
    }
}

/// Error raised by the routing service.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("case {case_id} is only {percent}% complete; routing requires every mandatory field")]
    IncompleteCase { case_id: CaseId, percent: u8 },
    #[error("custodian {actor} does not hold the active assignment for case {case_id}")]
    NotCurrentHolder { case_id: CaseId, actor: CustodianId },
    #[error("case {0} has no active assignment")]
    NoActiveAssignment(CaseId),
    #[error("{operation} is not permitted at the {} level", .level.label())]
    InvalidRole {
        level: CustodianLevel,
        operation: &'static str,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    FieldStore(#[from] FieldStoreError),
}
