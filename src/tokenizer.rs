//! Streaming SV tokenizer.
//!
//! The tokenizer is split in two layers:
//!
//! - [`state`] - the pure per-character transition function over
//!   [`FieldState`], testable without any I/O
//! - [`session`] - the resumable driver that pulls chunks from a
//!   [`ChunkSource`](crate::source::ChunkSource), applies transitions and
//!   validates rows against the header

pub mod session;
pub mod state;

pub use session::{Batch, Field, Row, SessionState, Tokenizer};
pub use state::{step, Effect, FieldState};
