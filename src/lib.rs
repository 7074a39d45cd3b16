//! # svtable - Streaming SV Table Reader
//!
//! Reads delimiter-separated files too large to hold in memory, tokenizes them
//! chunk by chunk with a resumable quoting state machine, optionally filters
//! rows by a named column and renders them as a fixed-width text table.
//!
//! ## Features
//!
//! - **Bounded Memory**: The file is decoded in fixed-size chunks and parsed in
//!   budgeted batches; no batch holds more than a few chunks of text
//! - **Encoding Detection**: BOM, UTF-16 parity and statistical sniffing before
//!   the first decode
//! - **Strict Structure**: Every row must match the header's field count, with
//!   line-numbered diagnostics for quoting and layout errors
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - Parser settings and dialect
//! - [`source`] - Chunk sources, encoding detection and path validation
//! - [`tokenizer`] - State machine and resumable session
//! - [`pipeline`] - Batch orchestration, filtering and formatting

// Core modules
pub mod config;
pub mod error;

// Components, leaf first
pub mod source;
pub mod tokenizer;
pub mod pipeline;

// Re-export commonly used types for convenience
pub use error::{DataError, DataErrorKind, Result, SvError};

// Public API surface for external usage
pub use config::{Delimiter, EncodingStrategy, ParserConfig};
pub use pipeline::{RowFilter, TableLoader, TablePipeline};
pub use source::{Chunk, ChunkSource, FileChunkReader, StrChunkSource};
pub use tokenizer::{Batch, Row, Tokenizer};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
