use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use erms::workflows::cases::{CaseId, FieldStoreError};
use erms::workflows::routing::{
    Assignment, AssignmentStatus, HistoryEvent, RepositoryError, RoutingRepository,
    RoutingTransition,
};
use erms::workflows::status::{CaseFieldStore, CaseStatus, DerivedStatusStore, Workflow};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct RoutingState {
    assignments: HashMap<CaseId, Vec<Assignment>>,
    history: HashMap<CaseId, Vec<HistoryEvent>>,
}

/// Map-backed assignment/history store. A single mutex makes each commit
/// atomic, which is all the routing engine asks of a backing store.
#[derive(Default)]
pub(crate) struct InMemoryRoutingRepository {
    state: Mutex<RoutingState>,
}

impl RoutingRepository for InMemoryRoutingRepository {
    fn commit(&self, transition: RoutingTransition) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        let assignments = state
            .assignments
            .entry(transition.case_id.clone())
            .or_default();
        let active_index = assignments
            .iter()
            .position(|assignment| assignment.status == AssignmentStatus::Assigned);

        // Reject before mutating so a failed transition leaves no trace.
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

/// Seedable stand-in for the relational field store backing the
/// dashboards.
#[derive(Default)]
pub(crate) struct InMemoryCaseFieldStore {
    cases: Mutex<HashMap<(CaseId, Workflow), Vec<Option<String>>>>,
}

impl InMemoryCaseFieldStore {
    pub(crate) fn seed(&self, case_id: &CaseId, workflow: Workflow, values: Vec<Option<String>>) {
        self.cases
            .lock()
            .expect("field store mutex poisoned")
            .insert((case_id.clone(), workflow), values);
    }
}

impl CaseFieldStore for InMemoryCaseFieldStore {
    fn fields(
        &self,
        case_id: &CaseId,
        workflow: Workflow,
    ) -> Result<Vec<Option<String>>, FieldStoreError> {
        self.cases
            .lock()
            .expect("field store mutex poisoned")
            .get(&(case_id.clone(), workflow))
            .cloned()
            .ok_or(FieldStoreError::NotFound)
    }
}

/// Records the most recent derived status per case and workflow.
#[derive(Default)]
pub(crate) struct InMemoryStatusLedger {
    statuses: Mutex<HashMap<(CaseId, Workflow), CaseStatus>>,
}

impl DerivedStatusStore for InMemoryStatusLedger {
    fn record_status(
        &self,
        case_id: &CaseId,
        workflow: Workflow,
        status: CaseStatus,
    ) -> Result<(), FieldStoreError> {
        self.statuses
            .lock()
            .expect("ledger mutex poisoned")
            .insert((case_id.clone(), workflow), status);
        Ok(())
    }
}

pub(crate) fn parse_workflow(raw: &str) -> Result<Workflow, String> {
    Workflow::from_slug(raw).ok_or_else(|| {
        format!(
            "unknown workflow '{raw}'; expected one of retirement_benefits, pay_commission, \
             group_insurance, retirement_progress, file_tracking"
        )
    })
}

/// Fills every field of the workflow's descriptor with a dated entry.
pub(crate) fn complete_field_values(workflow: Workflow) -> Vec<Option<String>> {
    workflow
        .field_set()
        .fields
        .iter()
        .enumerate()
        .map(|(index, _)| Some(format!("2025-08-{:02}", index + 1)))
        .collect()
}
