//! Shared types for the courier services
//!
//! Error types, domain models, JSON boundary helpers and small utilities used
//! by the cloud service and its clients.

pub mod error;
pub mod models;
pub mod serde_helpers;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
