//! Adapter implementations for deployment persistence and provisioning.

pub mod http;
pub mod memory;
pub mod postgres;
