//! Adapter implementations for provisioning configuration storage.

pub mod memory;
pub mod postgres;
