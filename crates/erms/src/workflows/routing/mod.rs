//! File routing through the clerk → officer → admin → superadmin
//! hierarchy.
//!
//! A case enters routing only once its mandatory field set is fully
//! filled. From there every move supersedes the single active assignment,
//! creates its successor, and appends one immutable history event, all in
//! a single repository transaction.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Assignment, AssignmentId, AssignmentStatus, AssignmentView, Custodian, CustodianLevel,
    HistoryEvent, RoutingAction,
};
pub use repository::{RepositoryError, RoutingRepository, RoutingTransition, Supersession};
pub use router::{routing_router, CompleteRequest, StartRoutingRequest, TransitionRequest};
pub use service::{FileRoutingService, RoutingError};
