//! InternMatch - internship recommendation form
//!
//! Collects education, sector, location and skills, asks the recommendation
//! service for matching internships and renders the results as cards.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
