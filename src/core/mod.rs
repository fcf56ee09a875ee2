//! Core business logic for the advisory service

pub mod advisor;

pub use advisor::Advisor;
