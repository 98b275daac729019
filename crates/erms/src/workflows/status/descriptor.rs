use serde::{Deserialize, Serialize};

/// The parallel tracking workflows a retirement case moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Workflow {
    RetirementBenefits,
    PayCommission,
    GroupInsurance,
    RetirementProgress,
    FileTracking,
}

impl Workflow {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::RetirementBenefits,
            Self::PayCommission,
            Self::GroupInsurance,
            Self::RetirementProgress,
            Self::FileTracking,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RetirementBenefits => "Retirement Benefits",
            Self::PayCommission => "Pay Commission",
            Self::GroupInsurance => "Group Insurance",
            Self::RetirementProgress => "Retirement Progress",
            Self::FileTracking => "File Tracking",
        }
    }

    /// Parses the snake_case slug used in CLI flags and query strings.
    pub fn from_slug(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "retirement_benefits" => Some(Self::RetirementBenefits),
            "pay_commission" => Some(Self::PayCommission),
            "group_insurance" => Some(Self::GroupInsurance),
            "retirement_progress" => Some(Self::RetirementProgress),
            "file_tracking" => Some(Self::FileTracking),
            _ => None,
        }
    }

    pub const fn field_set(self) -> &'static FieldSet {
        match self {
            Self::RetirementBenefits => &RETIREMENT_BENEFITS,
            Self::PayCommission => &PAY_COMMISSION,
            Self::GroupInsurance => &GROUP_INSURANCE,
            Self::RetirementProgress => &RETIREMENT_PROGRESS,
            Self::FileTracking => &FILE_TRACKING,
        }
    }
}

/// Fixed field-set descriptor for one workflow.
///
/// Field order matches the order the corresponding store returns values
/// in; classification itself is order-invariant.
#[derive(Debug, Clone, Copy)]
pub struct FieldSet {
    pub workflow: Workflow,
    pub fields: &'static [&'static str],
    /// Markers treated the same as a blank field.
    pub ignored_for_pending: &'static [&'static str],
    /// Markers that count as touched but never toward completion.
    pub excluded_from_completion: &'static [&'static str],
}

const RETIREMENT_BENEFITS: FieldSet = FieldSet {
    workflow: Workflow::RetirementBenefits,
    fields: &[
        "pension_papers_received_on",
        "service_verification_done_on",
        "pension_calculation_done_on",
        "gratuity_sanction_no",
        "gratuity_sanction_date",
        "commutation_sanction_no",
        "ppo_number",
        "ppo_dispatched_on",
    ],
    ignored_for_pending: &[],
    excluded_from_completion: &[],
};

const PAY_COMMISSION: FieldSet = FieldSet {
    workflow: Workflow::PayCommission,
    fields: &[
        "pay_fixation_received_on",
        "option_form_verified_on",
        "fixation_statement_checked_on",
        "arrear_calculated_on",
        "verification_certificate_no",
        "verification_certificate_date",
    ],
    ignored_for_pending: &[],
    excluded_from_completion: &[],
};

// Group insurance entries can be explicitly marked "Not Available" when an
// employee never subscribed; such a case is touched but never complete.
const GROUP_INSURANCE: FieldSet = FieldSet {
    workflow: Workflow::GroupInsurance,
    fields: &[
        "gis_application_received_on",
        "membership_verified_on",
        "subscription_ledger_checked_on",
        "sanction_order_no",
        "sanction_order_date",
        "payment_voucher_no",
    ],
    ignored_for_pending: &["-"],
    excluded_from_completion: &["Not Available"],
};

const RETIREMENT_PROGRESS: FieldSet = FieldSet {
    workflow: Workflow::RetirementProgress,
    fields: &[
        "no_dues_certificate",
        "vigilance_clearance",
        "medical_certificate",
        "office_clearance",
        "library_clearance",
        "quarters_clearance",
    ],
    ignored_for_pending: &[],
    excluded_from_completion: &[],
};

// Mandatory entries a clerk must fill before a file may enter routing.
const FILE_TRACKING: FieldSet = FieldSet {
    workflow: Workflow::FileTracking,
    fields: &[
        "superannuation_order_no",
        "superannuation_order_date",
        "last_working_day",
        "service_book_updated_on",
        "nominee_details_verified_on",
        "bank_mandate_received_on",
        "identification_marks_recorded_on",
        "photograph_attested_on",
        "specimen_signature_attested_on",
        "pension_papers_forwarded_on",
    ],
    ignored_for_pending: &[],
    excluded_from_completion: &[],
};
