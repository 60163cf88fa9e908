//! Application services for provisioning configuration.

mod store;

pub use store::{ConfigStoreError, ConfigStoreResult, ConfigStoreService};
