//! HTTP surface for the advisory service

pub mod handlers;
