//! Service implementations for the advisory boundaries

pub mod advisory_store;
pub mod prediction_client;

#[cfg(test)]
mod tests;

pub use advisory_store::{InMemoryAdvisoryStore, SqliteAdvisoryStore};
pub use prediction_client::RealPredictionClient;
