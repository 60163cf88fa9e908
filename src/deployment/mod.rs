//! Deployment orchestration for Quillhost.
//!
//! This module turns an operator's deployment choices into an immutable
//! request, hands it to the external provisioning service, and tracks the
//! resulting deployment record until the provider reports back or the record
//! goes stale. The only autonomous state change is the stale-timeout sweep,
//! which moves a `pending` deployment to `failed` through a conditional update
//! so a concurrent completion signal is never overwritten. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
