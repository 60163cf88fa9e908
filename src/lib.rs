//! Quillhost: deployment orchestration for operator-managed cloud instances.
//!
//! This crate validates and stores an operator's provisioning configuration,
//! derives deployment requests from it, hands those requests to an external
//! provisioning service, and tracks each deployment until the service reports
//! back or the record goes stale.
//!
//! # Architecture
//!
//! Quillhost follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, HTTP, memory)
//!
//! # Modules
//!
//! - [`provisioning`]: Operator credentials and provisioning defaults
//! - [`deployment`]: Request derivation, dispatch and status tracking
//! - [`config`]: Runtime settings
//! - [`telemetry`]: Tracing subscriber setup
//! - [`timestamp`]: Stored timestamp precision

pub mod config;
pub mod deployment;
pub mod provisioning;
pub mod telemetry;
pub mod timestamp;

#[cfg(test)]
mod test_clock;
