//! Shared helpers for tests

pub mod auth;
