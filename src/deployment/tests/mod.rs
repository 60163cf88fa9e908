//! Unit tests for the deployment module.
