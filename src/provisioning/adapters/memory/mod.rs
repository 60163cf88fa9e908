//! In-memory adapters for provisioning configuration tests.

mod config;

pub use config::InMemoryConfigRepository;
