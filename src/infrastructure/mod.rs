//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP client for the recommendation service,
//! configuration loading, logging setup and file export.

pub mod api;
pub mod config;
pub mod logging;
pub mod persistence;

pub use api::*;
pub use config::*;
pub use persistence::*;
