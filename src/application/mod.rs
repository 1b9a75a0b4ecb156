//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! the form controller, command dispatch, the error surface and the results
//! section.

pub mod state;
pub mod commands;
pub mod notifier;
pub mod results;

pub use state::*;
pub use commands::*;
pub use notifier::*;
pub use results::*;
