//! Request and response models for the HTTP API

pub mod auth;
pub mod ledger;
pub mod users;
