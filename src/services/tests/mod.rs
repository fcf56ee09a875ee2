//! Service tests for the advisory boundaries
