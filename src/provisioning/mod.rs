//! Operator-level provisioning configuration for Quillhost.
//!
//! This module stores the cloud credentials and default provisioning
//! parameters each operator account deploys with. Validation happens once, at
//! the write boundary, so every reader receives a [`domain::ProvisioningConfig`]
//! that already satisfies the credential length and enumeration rules. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
