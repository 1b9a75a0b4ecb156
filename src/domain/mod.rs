//! Domain layer: form data, recommendation records and the rules over them.

pub mod models;
pub mod services;
pub mod validation;
pub mod errors;

pub use models::*;
pub use services::*;
pub use validation::*;
pub use errors::*;
