use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::workflows::cases::{CaseId, CustodianId, FieldStoreError};
use crate::workflows::routing::domain::{
    Assignment, AssignmentStatus, Custodian, CustodianLevel, HistoryEvent,
};
use crate::workflows::routing::repository::{
    RepositoryError, RoutingRepository, RoutingTransition,
};
use crate::workflows::routing::service::FileRoutingService;
use crate::workflows::status::{CaseFieldStore, Workflow};

#[derive(Default)]
struct RoutingState {
    assignments: HashMap<CaseId, Vec<Assignment>>,
    history: HashMap<CaseId, Vec<HistoryEvent>>,
}

/// Map-backed repository. A single mutex makes each commit atomic.
#[derive(Default)]
pub(super) struct MemoryRoutingRepository {
    state: Mutex<RoutingState>,
}

impl MemoryRoutingRepository {
    pub(super) fn assignment_count(&self, case_id: &CaseId) -> usize {
        let state = self.state.lock().expect("repository mutex poisoned");
        state
            .assignments
            .get(case_id)
            .map(Vec::len)
            .unwrap_or_default()
    }
}

impl RoutingRepository for MemoryRoutingRepository {
    fn commit(&self, transition: RoutingTransition) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        let assignments = state
            .assignments
            .entry(transition.case_id.clone())
            .or_default();
        let active_index = assignments
            .iter()
            .position(|assignment| assignment.status == AssignmentStatus::Assigned);

        // Validate before touching anything so a rejected transition
        // leaves no partial writes.
        match (&transition.supersede, active_index) {
            (Some(supersession), Some(index)) => {
                if assignments[index].assignment_id != supersession.assignment_id {
                    return Err(RepositoryError::ConcurrentModification);
                }
            }
            (Some(_), None) => return Err(RepositoryError::NotFound),
            (None, Some(_)) if transition.create.is_some() => {
                return Err(RepositoryError::Conflict)
            }
            _ => {}
        }

        if let (Some(supersession), Some(index)) = (&transition.supersede, active_index) {
            assignments[index].status = supersession.status;
        }
        if let Some(assignment) = transition.create {
            assignments.push(assignment);
        }
        state
            .history
            .entry(transition.case_id)
            .or_default()
            .push(transition.event);
        Ok(())
    }

    fn active_assignment(&self, case_id: &CaseId) -> Result<Option<Assignment>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        Ok(state.assignments.get(case_id).and_then(|assignments| {
            assignments
                .iter()
                .find(|assignment| assignment.status == AssignmentStatus::Assigned)
                .cloned()
        }))
    }

    fn latest_assignment(&self, case_id: &CaseId) -> Result<Option<Assignment>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        Ok(state
            .assignments
            .get(case_id)
            .and_then(|assignments| assignments.last().cloned()))
    }

    fn history(&self, case_id: &CaseId) -> Result<Vec<HistoryEvent>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        Ok(state
            .history
            .get(case_id)
            .map(|events| events.iter().rev().cloned().collect())
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub(super) struct MemoryFieldStore {
    cases: Mutex<HashMap<CaseId, Vec<Option<String>>>>,
}

impl MemoryFieldStore {
    pub(super) fn seed(&self, case_id: &CaseId, values: Vec<Option<String>>) {
        self.cases
            .lock()
            .expect("field store mutex poisoned")
            .insert(case_id.clone(), values);
    }
}

impl CaseFieldStore for MemoryFieldStore {
    fn fields(
        &self,
        case_id: &CaseId,
        _workflow: Workflow,
    ) -> Result<Vec<Option<String>>, FieldStoreError> {
        self.cases
            .lock()
            .expect("field store mutex poisoned")
            .get(case_id)
            .cloned()
            .ok_or(FieldStoreError::NotFound)
    }
}

pub(super) fn case(raw: &str) -> CaseId {
    CaseId(raw.to_string())
}

pub(super) fn custodian(raw: &str) -> CustodianId {
    CustodianId(raw.to_string())
}

pub(super) fn clerk(raw: &str) -> Custodian {
    Custodian {
        id: custodian(raw),
        level: CustodianLevel::Clerk,
    }
}

pub(super) fn filled_fields(filled: usize) -> Vec<Option<String>> {
    let total = Workflow::FileTracking.field_set().fields.len();
    (0..total)
        .map(|index| {
            if index < filled {
                Some(format!("2025-06-{:02}", index + 1))
            } else {
                None
            }
        })
        .collect()
}

pub(super) fn build_service() -> (
    FileRoutingService<MemoryRoutingRepository, MemoryFieldStore>,
    Arc<MemoryRoutingRepository>,
    Arc<MemoryFieldStore>,
) {
    let repository = Arc::new(MemoryRoutingRepository::default());
    let fields = Arc::new(MemoryFieldStore::default());
    let service = FileRoutingService::new(repository.clone(), fields.clone());
    (service, repository, fields)
}

/// Seeds a complete case and opens routing, handing it to `holder`.
pub(super) fn routed_case(
    service: &FileRoutingService<MemoryRoutingRepository, MemoryFieldStore>,
    fields: &MemoryFieldStore,
    case_id: &CaseId,
    holder: &str,
) -> Assignment {
    fields.seed(case_id, filled_fields(10));
    service
        .start_routing(case_id, &clerk("clerk-1"), &custodian(holder), None)
        .expect("routing opens for a complete case")
}
