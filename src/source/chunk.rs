//! Core chunk access abstraction.
//!
//! A [`ChunkSource`] turns a stream position into one bounded run of decoded
//! characters. Sources keep no cursor of their own; the caller owns the
//! position and may re-read from any position a previous chunk returned.

use crate::error::Result;

/// One bounded decode of source content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Stream position just after the decoded content
    pub position: u64,
    /// Number of characters decoded
    pub chars_read: usize,
    /// The decoded characters
    pub text: String,
    /// No content remains after `position`
    pub exhausted: bool,
}

impl Chunk {
    pub fn chars(&self) -> std::str::Chars<'_> {
        self.text.chars()
    }
}

/// Producer of decoded chunks given a stream position.
///
/// Implementations must be stateless with respect to positions: reading the
/// same position twice yields the same chunk.
pub trait ChunkSource: Send + Sync {
    /// Decode one chunk starting at `position`
    ///
    /// # Arguments
    /// * `position` - 0, or a `Chunk::position` returned by an earlier read
    ///
    /// # Returns
    /// * The decoded characters and the position to resume from
    /// * `exhausted` is set once the end of the stream has been reached
    fn read(&self, position: u64) -> Result<Chunk>;

    /// Short human-readable name of the source, used in log lines
    fn describe(&self) -> String;
}

/// In-memory source over text that is already decoded.
///
/// Positions are byte offsets into the UTF-8 text and always fall on
/// character boundaries.
#[derive(Debug, Clone)]
pub struct StrChunkSource {
    text: String,
    capacity: usize,
}

impl StrChunkSource {
    /// Create a source that yields at most `capacity` characters per chunk
    pub fn new(text: impl Into<String>, capacity: usize) -> Self {
        Self {
            text: text.into(),
            capacity: capacity.max(1),
        }
    }
}

impl ChunkSource for StrChunkSource {
    fn read(&self, position: u64) -> Result<Chunk> {
        let start = (position as usize).min(self.text.len());
        let rest = &self.text[start..];

        let end = rest
            .char_indices()
            .nth(self.capacity)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let text = &rest[..end];

        Ok(Chunk {
            position: (start + end) as u64,
            chars_read: text.chars().count(),
            text: text.to_string(),
            exhausted: start + end >= self.text.len(),
        })
    }

    fn describe(&self) -> String {
        format!("<memory: {} bytes>", self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_source_splits_on_capacity() {
        let source = StrChunkSource::new("abcdefg", 3);

        let first = source.read(0).unwrap();
        assert_eq!(first.text, "abc");
        assert_eq!(first.chars_read, 3);
        assert!(!first.exhausted);

        let second = source.read(first.position).unwrap();
        assert_eq!(second.text, "def");

        let third = source.read(second.position).unwrap();
        assert_eq!(third.text, "g");
        assert!(third.exhausted);
    }

    #[test]
    fn test_str_source_respects_char_boundaries() {
        let source = StrChunkSource::new("añb€", 2);

        let first = source.read(0).unwrap();
        assert_eq!(first.text, "añ");
        assert_eq!(first.position, 3);

        let second = source.read(first.position).unwrap();
        assert_eq!(second.text, "b€");
        assert!(second.exhausted);
    }

    #[test]
    fn test_str_source_rereads_same_position() {
        let source = StrChunkSource::new("x,y\n", 2);
        assert_eq!(source.read(2).unwrap(), source.read(2).unwrap());
    }

    #[test]
    fn test_str_source_empty_text() {
        let chunk = StrChunkSource::new("", 8).read(0).unwrap();
        assert_eq!(chunk.chars_read, 0);
        assert!(chunk.exhausted);
    }
}
