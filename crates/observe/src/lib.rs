//! Logging setup shared by the workspace's binaries and tests.
pub mod config;
pub mod tracing;
