//! Wallet Demo Backend Library

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod log;
pub mod models;
pub mod repository;
pub mod services;
pub mod session;
pub mod siwe;

#[cfg(test)]
pub mod test_utils;

pub use api::create_app;
pub use config::Config;
pub use error::{Error, Result};
