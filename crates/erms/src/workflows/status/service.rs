use std::sync::Arc;

use crate::workflows::cases::{CaseId, FieldStoreError};

use super::classifier::{completion, CaseStatus, CompletionReport};
use super::descriptor::Workflow;

/// Read-side collaborator owning the raw case field values.
///
/// Values come back in descriptor order for the requested workflow. The
/// core never writes case fields.
pub trait CaseFieldStore: Send + Sync {
    fn fields(
        &self,
        case_id: &CaseId,
        workflow: Workflow,
    ) -> Result<Vec<Option<String>>, FieldStoreError>;
}

/// Write-side collaborator recording the derived status for dashboards.
pub trait DerivedStatusStore: Send + Sync {
    fn record_status(
        &self,
        case_id: &CaseId,
        workflow: Workflow,
        status: CaseStatus,
    ) -> Result<(), FieldStoreError>;
}

/// Computes and, on request, records derived case status.
///
/// Reads never write: recomputation happens only through the explicit
/// [`CaseStatusService::reconcile`] call.
pub struct CaseStatusService<S, W> {
    fields: Arc<S>,
    derived: Arc<W>,
}

impl<S, W> CaseStatusService<S, W>
where
    S: CaseFieldStore + 'static,
    W: DerivedStatusStore + 'static,
{
    pub fn new(fields: Arc<S>, derived: Arc<W>) -> Self {
        Self { fields, derived }
    }

    /// Current status of the case, computed from live field values.
    pub fn status(&self, case_id: &CaseId, workflow: Workflow) -> Result<CaseStatus, FieldStoreError> {
        Ok(self.completion(case_id, workflow)?.status())
    }

    /// Full fill-state tally for the case.
    pub fn completion(
        &self,
        case_id: &CaseId,
        workflow: Workflow,
    ) -> Result<CompletionReport, FieldStoreError> {
        let values = self.fields.fields(case_id, workflow)?;
        Ok(completion(&values, workflow.field_set()))
    }

    /// Recomputes the derived status and records it. Idempotent.
    pub fn reconcile(
        &self,
        case_id: &CaseId,
        workflow: Workflow,
    ) -> Result<CaseStatus, FieldStoreError> {
        let status = self.status(case_id, workflow)?;
        self.derived.record_status(case_id, workflow, status)?;
        Ok(status)
    }
}
