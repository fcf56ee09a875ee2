//! Shared helpers for advisory integration tests

pub mod helpers;
