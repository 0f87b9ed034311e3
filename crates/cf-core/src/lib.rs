//! # cf-core
//!
//! Core types, traits and errors shared by the confound crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error taxonomy and `Result` alias.
pub mod error;
/// Model trait.
pub mod traits;
/// Fit result types.
pub mod types;

pub use error::{Error, Result};
pub use traits::Model;
pub use types::{Coefficient, OlsFit};

/// Crate version, reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
