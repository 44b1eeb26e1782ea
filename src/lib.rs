//! Service self-check toolkit.
//!
//! Two loosely coupled pieces:
//!
//! - a status service answering liveness and auth-capability queries with
//!   static metadata, and
//! - a smoke-test harness that probes a running service's basic endpoints
//!   one at a time and reports pass/fail per probe.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`report`]: Status and capability payloads
//! - [`reporter`]: Report construction
//! - [`api`]: HTTP routes for health and status
//! - [`smoke`]: Probe sequence, runner and results
//! - [`metrics`]: Request and probe metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod reporter;
pub mod smoke;
pub mod utils;

pub use config::Config;
pub use error::{Result, SelfCheckError};
