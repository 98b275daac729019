//! Black-box specifications for the status classifier across the five
//! tracked workflows.

use erms::workflows::status::{classify, completion, CaseStatus, Workflow};

fn values(raw: &[Option<&str>]) -> Vec<Option<String>> {
    raw.iter()
        .map(|value| value.map(|inner| inner.to_string()))
        .collect()
}

fn filled(total: usize, count: usize) -> Vec<Option<String>> {
    (0..total)
        .map(|index| {
            if index < count {
                Some(format!("entry-{index}"))
            } else {
                None
            }
        })
        .collect()
}

#[test]
fn pending_iff_nothing_is_filled() {
    for workflow in Workflow::ordered() {
        let field_set = workflow.field_set();
        let total = field_set.fields.len();

        assert_eq!(classify(&filled(total, 0), field_set), CaseStatus::Pending);
        for count in 1..total {
            assert_ne!(classify(&filled(total, count), field_set), CaseStatus::Pending);
        }
    }
}

#[test]
fn completed_iff_everything_is_filled() {
    for workflow in Workflow::ordered() {
        let field_set = workflow.field_set();
        let total = field_set.fields.len();

        assert_eq!(
            classify(&filled(total, total), field_set),
            CaseStatus::Completed
        );
        for count in 0..total {
            assert_ne!(
                classify(&filled(total, count), field_set),
                CaseStatus::Completed
            );
        }
    }
}

#[test]
fn anything_in_between_is_processing() {
    let field_set = Workflow::RetirementBenefits.field_set();
    let total = field_set.fields.len();
    for count in 1..total {
        assert_eq!(
            classify(&filled(total, count), field_set),
            CaseStatus::Processing
        );
    }
}

#[test]
fn classification_ignores_field_order() {
    let field_set = Workflow::PayCommission.field_set();
    let mut entries = values(&[
        Some("2025-02-01"),
        None,
        Some("2025-02-03"),
        None,
        Some("VC/22"),
        None,
    ]);
    let before = classify(&entries, field_set);
    entries.rotate_left(3);
    assert_eq!(classify(&entries, field_set), before);
    entries.reverse();
    assert_eq!(classify(&entries, field_set), before);
}

#[test]
fn whitespace_only_values_are_blank() {
    let field_set = Workflow::RetirementProgress.field_set();
    let entries = values(&[Some("   "), Some("\t"), None, None, None, None]);
    assert_eq!(classify(&entries, field_set), CaseStatus::Pending);
}

#[test]
fn group_insurance_marked_not_available_never_completes() {
    let field_set = Workflow::GroupInsurance.field_set();
    let total = field_set.fields.len();
    let all_negative = vec![Some("Not Available".to_string()); total];

    let report = completion(&all_negative, field_set);
    assert_eq!(report.touched, total);
    assert_eq!(report.completable, 0);
    assert_eq!(report.status(), CaseStatus::Processing);
}

#[test]
fn group_insurance_single_negative_field_blocks_completion() {
    let field_set = Workflow::GroupInsurance.field_set();
    let entries = values(&[
        Some("2025-01-05"),
        Some("2025-01-08"),
        Some("2025-01-09"),
        Some("GIS/2025/17"),
        Some("2025-01-15"),
        Some("Not Available"),
    ]);
    assert_eq!(classify(&entries, field_set), CaseStatus::Processing);
}

#[test]
fn completion_percent_tracks_the_gate() {
    let field_set = Workflow::FileTracking.field_set();
    let total = field_set.fields.len();
    assert_eq!(total, 10);

    assert_eq!(completion(&filled(total, 0), field_set).percent(), 0);
    assert_eq!(completion(&filled(total, 3), field_set).percent(), 30);
    assert_eq!(completion(&filled(total, 10), field_set).percent(), 100);
    assert!(completion(&filled(total, 10), field_set).is_complete());
}

#[test]
fn workflow_slugs_round_trip() {
    for workflow in Workflow::ordered() {
        let slug = serde_json::to_value(workflow).expect("serializes");
        let slug = slug.as_str().expect("string slug");
        assert_eq!(Workflow::from_slug(slug), Some(workflow));
    }
    assert_eq!(Workflow::from_slug("unknown"), None);
}
