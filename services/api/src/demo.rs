use crate::infra::{
    complete_field_values, parse_workflow, InMemoryCaseFieldStore, InMemoryRoutingRepository,
    InMemoryStatusLedger,
};
use chrono::Local;
use clap::Args;
use std::sync::Arc;

use erms::error::AppError;
use erms::workflows::cases::{CaseId, CustodianId};
use erms::workflows::routing::{Assignment, Custodian, CustodianLevel, FileRoutingService};
use erms::workflows::status::{CaseStatusService, Workflow};

#[derive(Args, Debug)]
pub(crate) struct StatusReportArgs {
    /// Case identifier to report on
    #[arg(long, default_value = "erms-demo-001")]
    pub(crate) case_id: String,
    /// Workflow whose field set to classify against
    #[arg(long, default_value = "file_tracking", value_parser = parse_workflow)]
    pub(crate) workflow: Workflow,
    /// Number of fields to leave blank when seeding the demo case
    #[arg(long, default_value_t = 0)]
    pub(crate) blank_fields: usize,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Case identifier used for the scripted lifecycle
    #[arg(long, default_value = "erms-demo-001")]
    pub(crate) case_id: String,
}

pub(crate) fn run_status_report(args: StatusReportArgs) -> Result<(), AppError> {
    let fields = Arc::new(InMemoryCaseFieldStore::default());
    let ledger = Arc::new(InMemoryStatusLedger::default());
    let service = CaseStatusService::new(fields.clone(), ledger);

    let case_id = CaseId(args.case_id);
    let mut values = complete_field_values(args.workflow);
    let blank = args.blank_fields.min(values.len());
    for slot in values.iter_mut().rev().take(blank) {
        *slot = None;
    }
    fields.seed(&case_id, args.workflow, values);

    let report = service.completion(&case_id, args.workflow)?;
    let status = service.reconcile(&case_id, args.workflow)?;

    println!("Case {} ({})", case_id, args.workflow.label());
    println!(
        "  {} of {} fields filled ({}%)",
        report.completable,
        report.total,
        report.percent()
    );
    println!("  derived status: {}", status.label());

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryRoutingRepository::default());
    let fields = Arc::new(InMemoryCaseFieldStore::default());
    let service = FileRoutingService::new(repository, fields.clone());

    let case_id = CaseId(args.case_id);
    fields.seed(
        &case_id,
        Workflow::FileTracking,
        complete_field_values(Workflow::FileTracking),
    );

    println!("== Retirement file routing demo ({}) ==", Local::now().date_naive());
    println!("Case {case_id}: all mandatory fields filled, entering routing.\n");

    let clerk = Custodian {
        id: CustodianId("clerk-anita".to_string()),
        level: CustodianLevel::Clerk,
    };
    let opened = service.start_routing(
        &case_id,
        &clerk,
        &CustodianId("officer-jane".to_string()),
        Some("papers verified at counter".to_string()),
    )?;
    print_assignment("Opened", &opened);

    let forwarded = service.forward(
        &case_id,
        &CustodianId("officer-jane".to_string()),
        &CustodianId("admin-raj".to_string()),
        Some("service verification complete".to_string()),
    )?;
    print_assignment("Forwarded", &forwarded);

    service.complete(
        &case_id,
        &CustodianId("admin-raj".to_string()),
        Some("PPO sanctioned and dispatched".to_string()),
    )?;
    println!("Completed: routing closed by admin-raj.\n");

    println!("History (newest first):");
    for event in service.history(&case_id)? {
        let target = event
            .to_custodian
            .map(|custodian| custodian.0)
            .unwrap_or_else(|| "(closed)".to_string());
        println!(
            "  [{}] {} -> {}",
            event.action.label(),
            event
                .from_custodian
                .map(|custodian| custodian.0)
                .unwrap_or_default(),
            target
        );
    }

    Ok(())
}

fn print_assignment(step: &str, assignment: &Assignment) {
    println!(
        "{step}: {} now holds the file at the {} level.",
        assignment.assigned_to,
        assignment.level.label()
    );
}
