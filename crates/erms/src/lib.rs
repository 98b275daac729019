//! Core library for the employee retirement management service.
//!
//! The reusable pieces live under [`workflows`]: derived status
//! classification over the fixed per-workflow field sets, and the file
//! routing engine that walks a case through the custodian hierarchy.
//! Persistence and identity are collaborator traits so the same logic
//! backs the HTTP service, the CLI demo, and the test suites.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
