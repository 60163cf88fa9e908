//! Step definitions for stale deployment sweep scenarios.

pub mod given;
pub mod when;
pub mod world;
