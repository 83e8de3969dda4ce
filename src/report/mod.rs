//! Report rendering.
//!
//! Text (the default, matching the historical layout) and JSON renderings
//! of a [`crate::models::Summary`].

pub mod generator;

pub use generator::{generate_json_report, generate_text_report, write_report};
