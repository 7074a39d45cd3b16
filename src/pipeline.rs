//! Table pipeline: batch orchestration, filtering and formatting.
//!
//! The pipeline owns one tokenizer session for one file. Every [`load`] runs a
//! single bounded batch on tokio's blocking pool, filters the rows and renders
//! them as fixed-width text. Callers loop until [`end_of_data`].
//!
//! [`load`]: TableLoader::load
//! [`end_of_data`]: TableLoader::end_of_data

pub mod filter;
pub mod format;

pub use filter::RowFilter;
pub use format::{format_field, format_rows, COLUMN_WIDTH};

use crate::config::ParserConfig;
use crate::error::{Result, SvError};
use crate::source::{validate_file_path, ChunkSource, FileChunkReader};
use crate::tokenizer::{Row, Tokenizer};
use async_trait::async_trait;
use encoding_rs::Encoding;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Batch-at-a-time producer of rendered table text.
#[async_trait]
pub trait TableLoader: Send {
    /// Produce the next batch as formatted text
    ///
    /// Returns an empty string once end of data has been reached.
    async fn load(&mut self) -> Result<String>;

    /// No further batches remain
    fn end_of_data(&self) -> bool;

    /// Path of the file being read
    fn file_path(&self) -> &Path;
}

/// Pipeline over one SV file.
pub struct TablePipeline {
    path: PathBuf,
    reader: Arc<FileChunkReader>,
    tokenizer: Option<Tokenizer>,
    filter: Option<RowFilter>,
    end_of_data: bool,
}

impl TablePipeline {
    /// Create a pipeline for `path`
    ///
    /// # Errors
    /// * Invalid configuration
    /// * Missing, unreadable or non-regular file
    pub fn new(
        path: impl Into<PathBuf>,
        config: ParserConfig,
        filter: Option<RowFilter>,
    ) -> Result<Self> {
        let path = path.into();
        config.validate()?;
        validate_file_path(&path)?;

        let reader = Arc::new(FileChunkReader::new(path.clone(), &config));
        let source: Arc<dyn ChunkSource> = reader.clone();
        let tokenizer = Tokenizer::new(source, &config);

        Ok(Self {
            path,
            reader,
            tokenizer: Some(tokenizer),
            filter,
            end_of_data: false,
        })
    }

    /// The encoding the file is decoded with, once resolved
    pub fn file_encoding(&self) -> Option<&'static Encoding> {
        self.reader.current_encoding()
    }

    /// Tokenize and filter the next batch without rendering it
    ///
    /// # Errors
    /// * `EndOfData` when called after the last batch
    /// * Structural and resource errors from the tokenizer
    pub async fn next_rows(&mut self) -> Result<Vec<Row>> {
        let mut tokenizer = self.tokenizer.take().ok_or(SvError::EndOfData)?;

        let joined = tokio::task::spawn_blocking(move || {
            let outcome = tokenizer.next_batch();
            (tokenizer, outcome)
        })
        .await;

        let (tokenizer, outcome) = match joined {
            Ok(done) => done,
            Err(e) => {
                self.end_of_data = true;
                return Err(SvError::worker(e.to_string()));
            }
        };

        self.end_of_data = tokenizer.end_of_data();
        let tokenizer = self.tokenizer.insert(tokenizer);
        let batch = outcome?;

        Ok(match &self.filter {
            Some(filter) => filter.apply(tokenizer.header(), batch),
            None => batch.rows,
        })
    }
}

#[async_trait]
impl TableLoader for TablePipeline {
    async fn load(&mut self) -> Result<String> {
        if self.end_of_data {
            return Ok(String::new());
        }
        let rows = self.next_rows().await?;
        Ok(format_rows(&rows))
    }

    fn end_of_data(&self) -> bool {
        self.end_of_data
    }

    fn file_path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataErrorKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content)
            .expect("Failed to write test content");
        file.flush().expect("Failed to flush test file");
        file
    }

    async fn load_all(pipeline: &mut TablePipeline) -> Result<String> {
        let mut out = String::new();
        while !pipeline.end_of_data() {
            out.push_str(&pipeline.load().await?);
        }
        Ok(out)
    }

    #[tokio::test]
    async fn test_load_formats_whole_file() {
        let file = create_test_file(b"name,age\n\"Al,ice\",30\nBob,25\n");
        let mut pipeline = TablePipeline::new(file.path(), ParserConfig::default(), None).unwrap();

        let text = load_all(&mut pipeline).await.unwrap();
        let expected = format_rows(&[
            vec!["name".into(), "age".into()],
            vec!["Al,ice".into(), "30".into()],
            vec!["Bob".into(), "25".into()],
        ]);
        assert_eq!(text, expected);
        assert_eq!(pipeline.file_encoding(), Some(encoding_rs::UTF_8));
    }

    #[tokio::test]
    async fn test_filter_scenario() {
        let file = create_test_file(b"name,age\n\"Al,ice\",30\nBob,25\n");
        let filter = RowFilter::new("name", "bob");
        let mut pipeline = TablePipeline::new(file.path(), ParserConfig::default(), filter).unwrap();

        let rows = pipeline.next_rows().await.unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["name".to_string(), "age".to_string()],
                vec!["Bob".to_string(), "25".to_string()],
            ]
        );
        assert!(pipeline.end_of_data());
    }

    #[tokio::test]
    async fn test_load_after_end_returns_empty_text() {
        let file = create_test_file(b"a\n1\n");
        let mut pipeline = TablePipeline::new(file.path(), ParserConfig::default(), None).unwrap();
        load_all(&mut pipeline).await.unwrap();

        assert_eq!(pipeline.load().await.unwrap(), "");
        assert!(matches!(pipeline.next_rows().await, Err(SvError::EndOfData)));
    }

    #[tokio::test]
    async fn test_structural_error_surfaces_and_ends_loop() {
        let file = create_test_file(b"a,b\n\nc,d\n");
        let mut pipeline = TablePipeline::new(file.path(), ParserConfig::default(), None).unwrap();

        match pipeline.load().await {
            Err(SvError::InvalidData(err)) => {
                assert_eq!(err.line, 2);
                assert_eq!(err.kind, DataErrorKind::EmptyLine);
            }
            other => panic!("Expected InvalidData, got {:?}", other),
        }
        assert!(pipeline.end_of_data());
    }

    #[test]
    fn test_new_rejects_missing_file() {
        let result = TablePipeline::new(
            "/this/file/does/not/exist.csv",
            ParserConfig::default(),
            None,
        );
        assert!(matches!(result, Err(SvError::FileNotFound { .. })));
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let file = create_test_file(b"a\n");
        let config = ParserConfig::default().with_chunk_capacity(0);
        assert!(matches!(
            TablePipeline::new(file.path(), config, None),
            Err(SvError::ConfigError { .. })
        ));
    }
}
