//! Parser configuration.
//!
//! There is no configuration file; settings come from the caller (the CLI maps
//! its flags onto [`ParserConfig`]).

use crate::error::{Result, SvError};
use encoding_rs::Encoding;

/// Decoded characters per chunk read
pub const DEFAULT_CHUNK_CAPACITY: usize = 8192;

/// Characters consumed per batch before the tokenizer yields
pub const DEFAULT_BATCH_BUDGET: usize = 30_000;

/// Bytes sampled by the encoding detector
pub const DEFAULT_DETECTION_SAMPLE: usize = 1024 * 1024;

/// Field delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Pipe,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Pipe => '|',
        }
    }

    /// Parse a delimiter name (`comma`, `pipe`) or the literal character
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "comma" | "," => Some(Delimiter::Comma),
            "pipe" | "|" => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

/// How the chunk reader resolves the text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingStrategy {
    /// Sniff the file once before the first decode
    #[default]
    Detect,
    /// Decode with a known encoding
    Fixed(&'static Encoding),
}

impl EncodingStrategy {
    /// Resolve a WHATWG encoding label such as `utf-8`, `latin1` or `utf-16le`
    pub fn from_label(label: &str) -> Result<Self> {
        Encoding::for_label(label.trim().as_bytes())
            .map(EncodingStrategy::Fixed)
            .ok_or_else(|| SvError::InvalidArgument {
                message: format!("Unknown encoding label: {}", label),
            })
    }
}

/// The characters that drive tokenizer transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: char,
    pub quote: char,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Comma.as_char(),
            quote: '"',
        }
    }
}

/// Settings for one parsing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub delimiter: Delimiter,
    pub quote: char,
    pub chunk_capacity: usize,
    pub batch_budget: usize,
    pub detection_sample_limit: usize,
    pub encoding: EncodingStrategy,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            quote: '"',
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            batch_budget: DEFAULT_BATCH_BUDGET,
            detection_sample_limit: DEFAULT_DETECTION_SAMPLE,
            encoding: EncodingStrategy::Detect,
        }
    }
}

impl ParserConfig {
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_chunk_capacity(mut self, chunk_capacity: usize) -> Self {
        self.chunk_capacity = chunk_capacity;
        self
    }

    pub fn with_batch_budget(mut self, batch_budget: usize) -> Self {
        self.batch_budget = batch_budget;
        self
    }

    pub fn with_detection_sample_limit(mut self, limit: usize) -> Self {
        self.detection_sample_limit = limit;
        self
    }

    pub fn with_encoding(mut self, encoding: EncodingStrategy) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn dialect(&self) -> Dialect {
        Dialect {
            delimiter: self.delimiter.as_char(),
            quote: self.quote,
        }
    }

    /// Reject settings the reader or tokenizer cannot honor
    pub fn validate(&self) -> Result<()> {
        // One UTF-16 slot cannot hold a surrogate pair, so the decoder could stall
        if self.chunk_capacity < 2 {
            return Err(SvError::config(format!(
                "chunk capacity must be at least 2, got {}",
                self.chunk_capacity
            )));
        }
        if self.detection_sample_limit == 0 {
            return Err(SvError::config("detection sample limit must be non-zero"));
        }
        if self.quote == self.delimiter.as_char() {
            return Err(SvError::config(
                "quote character must differ from the delimiter",
            ));
        }
        if matches!(self.quote, '\r' | '\n') {
            return Err(SvError::config("quote character cannot be a line break"));
        }
        Ok(())
    }
}
