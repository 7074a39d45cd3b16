//! Chunked, encoding-aware access to the source text.
//!
//! This module provides the [`ChunkSource`] abstraction the tokenizer pulls
//! from, the file-backed reader with lazy encoding detection, and an in-memory
//! source for text that is already decoded.

pub mod chunk;
pub mod encoding;
pub mod reader;
pub mod validation;

pub use chunk::{Chunk, ChunkSource, StrChunkSource};
pub use encoding::detect_encoding;
pub use reader::FileChunkReader;
pub use validation::validate_file_path;
