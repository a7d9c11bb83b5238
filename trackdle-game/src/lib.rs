//! # Trackdle Game Engine
//!
//! The daily "guess the track" puzzle engine:
//! - Guess evaluator ([`classify`])
//! - Per-player session state machine ([`session`])
//! - Progressive hint disclosure ([`disclose`])
//! - Daily rotation scheduler ([`rotation`]) and its collaborators
//!   ([`picker`], [`render`])
//! - Session persistence ([`store`])
//!
//! The HTTP surface is owned by the embedding application; this crate
//! exposes the pure game transitions and the rotation job plumbing.

pub mod catalog;
pub mod classify;
pub mod disclose;
pub mod picker;
pub mod render;
pub mod rotation;
pub mod session;
pub mod snippet;
pub mod store;

pub use catalog::{PuzzleCatalog, PuzzleLookup};
pub use classify::{classify, Classification};
pub use disclose::{visible_fields, PuzzleView};
pub use rotation::{advance_day, PuzzlePicker, Rotation, SnippetRenderer};
pub use session::{GuessRecord, Outcome, SessionGame};
