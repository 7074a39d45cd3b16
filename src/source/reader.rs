//! File-backed chunk reader.
//!
//! Every read opens the file, seeks, decodes one bounded chunk and closes the
//! handle again. Nothing but the resolved encoding survives between reads, so
//! re-seeking to any returned position is always safe.

use crate::config::{EncodingStrategy, ParserConfig};
use crate::error::{Result, SvError};
use crate::source::chunk::{Chunk, ChunkSource};
use crate::source::encoding::detect_encoding;
use encoding_rs::{CoderResult, Encoding};
use log::{info, trace, warn};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Upper bound of source bytes per decoded UTF-16 unit across supported encodings
const MAX_BYTES_PER_UNIT: usize = 4;

/// Chunk reader over a file on disk.
///
/// The encoding is either fixed up front or detected on the first read and
/// cached for the lifetime of the reader.
#[derive(Debug)]
pub struct FileChunkReader {
    path: PathBuf,
    strategy: EncodingStrategy,
    capacity: usize,
    sample_limit: usize,
    encoding: OnceLock<&'static Encoding>,
}

impl FileChunkReader {
    /// Create a reader for `path` using the capacity and encoding settings of `config`
    pub fn new(path: impl Into<PathBuf>, config: &ParserConfig) -> Self {
        Self {
            path: path.into(),
            strategy: config.encoding,
            capacity: config.chunk_capacity,
            sample_limit: config.detection_sample_limit,
            encoding: OnceLock::new(),
        }
    }

    /// The encoding used for decoding, once known
    pub fn current_encoding(&self) -> Option<&'static Encoding> {
        match self.strategy {
            EncodingStrategy::Fixed(encoding) => Some(encoding),
            EncodingStrategy::Detect => self.encoding.get().copied(),
        }
    }

    fn resolve_encoding(&self) -> Result<&'static Encoding> {
        if let Some(encoding) = self.current_encoding() {
            return Ok(encoding);
        }

        let detected = detect_encoding(&self.path, self.sample_limit)?;
        info!(
            "Detected encoding {} for {}",
            detected.name(),
            self.path.display()
        );
        Ok(*self.encoding.get_or_init(|| detected))
    }

    fn open(&self) -> Result<File> {
        File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SvError::FileNotFound {
                path: self.path.clone(),
            },
            std::io::ErrorKind::PermissionDenied => SvError::PermissionDenied {
                path: self.path.clone(),
            },
            _ => SvError::file_error(format!("Failed to open file: {}", self.path.display()), e),
        })
    }
}

impl ChunkSource for FileChunkReader {
    fn read(&self, position: u64) -> Result<Chunk> {
        let encoding = self.resolve_encoding()?;

        let mut file = self.open()?;
        file.seek(SeekFrom::Start(position))
            .map_err(|e| SvError::file_error(format!("Failed to seek to byte {}", position), e))?;

        let window = self.capacity * MAX_BYTES_PER_UNIT;
        let mut bytes = Vec::with_capacity(window);
        file.take(window as u64)
            .read_to_end(&mut bytes)
            .map_err(|e| SvError::file_error("Failed to read chunk", e))?;
        let at_eof = bytes.len() < window;

        let mut decoder = if position == 0 {
            encoding.new_decoder_with_bom_removal()
        } else {
            encoding.new_decoder_without_bom_handling()
        };
        let mut units = vec![0u16; self.capacity];
        let (result, consumed, written, had_replacements) =
            decoder.decode_to_utf16(&bytes, &mut units, at_eof);

        if had_replacements {
            warn!(
                "Malformed {} sequence near byte {} of {}",
                encoding.name(),
                position,
                self.path.display()
            );
        }

        let exhausted = at_eof && matches!(result, CoderResult::InputEmpty);
        if !exhausted && consumed == 0 {
            return Err(SvError::encoding(format!(
                "Decoder made no progress at byte {} using {}",
                position,
                encoding.name()
            )));
        }

        let text: String = char::decode_utf16(units[..written].iter().copied())
            .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect();
        let chars_read = text.chars().count();

        trace!(
            "Read chunk at byte {}: {} bytes -> {} chars{}",
            position,
            consumed,
            chars_read,
            if exhausted { " (end of stream)" } else { "" }
        );

        Ok(Chunk {
            position: position + consumed as u64,
            chars_read,
            text,
            exhausted,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
