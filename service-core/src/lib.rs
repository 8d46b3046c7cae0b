//! service-core: Shared infrastructure for the outfit workspace.
pub mod config;
pub mod error;
pub mod observability;
