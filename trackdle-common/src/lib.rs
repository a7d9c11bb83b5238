//! # Trackdle Common Library
//!
//! Shared code for the Trackdle daily track-guessing puzzle:
//! - Domain model (puzzles, snippet references, rotation window)
//! - Error taxonomy
//! - Database schema and repositories
//! - Configuration loading
//! - Date/time utilities

pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod time;

pub use error::{Error, Result};
pub use model::{ActiveEntry, DailyInfo, Puzzle, SnippetRef};
