//! Agro advisory service
//!
//! A thin advisory relay: accepts soil sensor measurements over HTTP, forwards
//! them to an external prediction service, maps the response into a uniform
//! recommendation shape, and best-effort persists a history record per farmer.

pub mod core;
pub mod error;
pub mod logging;
pub mod server;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;
pub mod web;

// Re-export main types
pub use crate::core::Advisor;
pub use error::{AdvisoryError, AdvisoryResult};
pub use server::AdvisoryServer;
pub use state::{AdvisoryState, StateSnapshot};
pub use types::*;

// Re-export trait definitions
pub use traits::{AdvisoryStore, PredictionClient};

// Re-export service implementations
pub use services::{InMemoryAdvisoryStore, RealPredictionClient, SqliteAdvisoryStore};
