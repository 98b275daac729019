use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflows::cases::{CaseId, CustodianId};

/// Rank in the fixed custody hierarchy a file climbs during routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustodianLevel {
    Clerk,
    Officer,
    Admin,
    Superadmin,
}

impl CustodianLevel {
    pub const fn ordered() -> [Self; 4] {
        [Self::Clerk, Self::Officer, Self::Admin, Self::Superadmin]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Clerk => "Clerk",
            Self::Officer => "Officer",
            Self::Admin => "Admin",
            Self::Superadmin => "Superadmin",
        }
    }

    /// Successor level. Saturates: forwarding from the top stays at the top.
    pub const fn next(self) -> Self {
        match self {
            Self::Clerk => Self::Officer,
            Self::Officer => Self::Admin,
            Self::Admin => Self::Superadmin,
            Self::Superadmin => Self::Superadmin,
        }
    }

    /// Predecessor level. Saturates at the bottom of the hierarchy.
    pub const fn previous(self) -> Self {
        match self {
            Self::Clerk => Self::Clerk,
            Self::Officer => Self::Clerk,
            Self::Admin => Self::Officer,
            Self::Superadmin => Self::Admin,
        }
    }

    /// Only senior levels may close routing on a case.
    pub const fn is_senior(self) -> bool {
        matches!(self, Self::Admin | Self::Superadmin)
    }
}

impl fmt::Display for CustodianLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle of one assignment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Assigned,
    Completed,
    Reverted,
    Reassigned,
}

impl AssignmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::Completed => "completed",
            Self::Reverted => "reverted",
            Self::Reassigned => "reassigned",
        }
    }
}

/// What one history event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingAction {
    Assigned,
    Forwarded,
    Reverted,
    Reassigned,
    Completed,
}

impl RoutingAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::Forwarded => "forwarded",
            Self::Reverted => "reverted",
            Self::Reassigned => "reassigned",
            Self::Completed => "completed",
        }
    }
}

/// Identifier wrapper for assignment records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentId(pub String);

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Asserted identity of the user invoking a routing operation. The
/// engine trusts the caller's level; authentication lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Custodian {
    pub id: CustodianId,
    pub level: CustodianLevel,
}

/// Custody record for a case. At most one per case is ever `assigned`;
/// superseded records keep their terminal status and are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub assignment_id: AssignmentId,
    pub case_id: CaseId,
    pub assigned_to: CustodianId,
    pub assigned_by: CustodianId,
    pub assigned_at: DateTime<Utc>,
    pub level: CustodianLevel,
    pub status: AssignmentStatus,
    pub comments: Option<String>,
}

impl Assignment {
    pub fn view(&self) -> AssignmentView {
        AssignmentView {
            assignment_id: self.assignment_id.clone(),
            case_id: self.case_id.clone(),
            assigned_to: self.assigned_to.clone(),
            assigned_by: self.assigned_by.clone(),
            assigned_at: self.assigned_at,
            level: self.level,
            level_label: self.level.label(),
            status: self.status.label(),
            comments: self.comments.clone(),
        }
    }
}

/// Sanitized representation of an assignment for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentView {
    pub assignment_id: AssignmentId,
    pub case_id: CaseId,
    pub assigned_to: CustodianId,
    pub assigned_by: CustodianId,
    pub assigned_at: DateTime<Utc>,
    pub level: CustodianLevel,
    pub level_label: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Append-only record of one routing transition. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub case_id: CaseId,
    pub from_custodian: Option<CustodianId>,
    pub to_custodian: Option<CustodianId>,
    pub from_level: Option<CustodianLevel>,
    pub to_level: Option<CustodianLevel>,
    pub action: RoutingAction,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}
