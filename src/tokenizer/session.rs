//! Resumable tokenizer session.
//!
//! A [`Tokenizer`] is bound to one [`ChunkSource`] for its whole life. Each
//! call to [`Tokenizer::next_batch`] pulls chunks until the source is exhausted
//! or the per-batch character budget is spent, and returns the rows finalized
//! along the way. Partial fields, partial rows and quoting state carry over to
//! the next call.

use crate::config::{Dialect, ParserConfig};
use crate::error::{DataErrorKind, Result, SvError};
use crate::source::{ChunkSource, StrChunkSource};
use crate::tokenizer::state::{step, Effect, FieldState};
use log::debug;
use std::mem;
use std::sync::Arc;

pub type Field = String;
pub type Row = Vec<Field>;

/// Rows finalized during one tokenizer invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    pub rows: Vec<Row>,
    /// 1-based line number of `rows[0]`
    pub first_line: u64,
    /// `rows[0]` is the session header
    pub includes_header: bool,
    /// Characters pulled from the source for this batch
    pub chars_consumed: usize,
}

impl Batch {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parsing state that survives across batches.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    resume_position: u64,
    pending_field: String,
    pending_row: Row,
    field_state: FieldState,
    rows_so_far: u64,
    header: Option<Row>,
    end_of_data: bool,
}

impl SessionState {
    /// Stream position of the next chunk to read
    pub fn resume_position(&self) -> u64 {
        self.resume_position
    }

    /// Quoting state of the field under construction
    pub fn field_state(&self) -> FieldState {
        self.field_state
    }

    /// Characters of the field under construction
    pub fn pending_field(&self) -> &str {
        &self.pending_field
    }

    /// Rows finalized since the session started, header included
    pub fn rows_so_far(&self) -> u64 {
        self.rows_so_far
    }

    /// First row of the session, once read
    pub fn header(&self) -> Option<&Row> {
        self.header.as_ref()
    }

    /// Whether the source is exhausted or the session failed
    pub fn end_of_data(&self) -> bool {
        self.end_of_data
    }

    fn current_line(&self) -> u64 {
        self.rows_so_far + 1
    }

    fn data_error(&self, kind: DataErrorKind) -> SvError {
        SvError::invalid_data(self.current_line(), kind)
    }

    /// Apply one character
    fn feed(&mut self, ch: char, dialect: &Dialect, out: &mut Vec<Row>) -> Result<()> {
        let field_is_empty = self.pending_field.is_empty();
        let (next, effect) = step(self.field_state, ch, field_is_empty, dialect)
            .map_err(|kind| self.data_error(kind))?;
        self.field_state = next;

        match effect {
            Effect::Append(c) => self.pending_field.push(c),
            Effect::Skip => {}
            Effect::EndField => {
                let field = mem::take(&mut self.pending_field);
                self.pending_row.push(field);
            }
            Effect::EndRow => self.finish_row(out)?,
        }
        Ok(())
    }

    /// Close the pending row, validating it against the header
    fn finish_row(&mut self, out: &mut Vec<Row>) -> Result<()> {
        let field = mem::take(&mut self.pending_field);
        self.pending_row.push(field);
        let row = mem::take(&mut self.pending_row);

        match &self.header {
            Some(header) if header.len() != row.len() => {
                return Err(self.data_error(DataErrorKind::WrongFieldCount {
                    found: row.len(),
                    expected: header.len(),
                }));
            }
            Some(_) => {}
            None => self.header = Some(row.clone()),
        }

        self.rows_so_far += 1;
        out.push(row);
        Ok(())
    }

    /// Flush whatever is pending once the source is exhausted
    ///
    /// The end of the source closes the last row like a line feed would, so an
    /// empty trailing field is an empty line here too.
    fn finish_stream(&mut self, out: &mut Vec<Row>) -> Result<()> {
        match self.field_state {
            FieldState::Quoted => Err(self.data_error(DataErrorKind::QuoteExpected)),
            FieldState::Unquoted
                if self.pending_field.is_empty() && self.pending_row.is_empty() =>
            {
                Ok(())
            }
            _ if self.pending_field.is_empty() => {
                Err(self.data_error(DataErrorKind::EmptyLine))
            }
            _ => {
                self.field_state = FieldState::Unquoted;
                self.finish_row(out)
            }
        }
    }
}

/// Resumable tokenizer bound to one chunk source.
///
/// Not meant to be shared: a session has a single thread of control. It is
/// `Send`, so the owner may move it onto a worker thread for a batch.
pub struct Tokenizer {
    source: Arc<dyn ChunkSource>,
    dialect: Dialect,
    batch_budget: usize,
    state: SessionState,
}

impl Tokenizer {
    pub fn new(source: Arc<dyn ChunkSource>, config: &ParserConfig) -> Self {
        Self {
            source,
            dialect: config.dialect(),
            batch_budget: config.batch_budget,
            state: SessionState::default(),
        }
    }

    /// Tokenizer over text already in memory, chunked by `config.chunk_capacity`
    pub fn for_text(text: impl Into<String>, config: &ParserConfig) -> Self {
        let source = StrChunkSource::new(text, config.chunk_capacity);
        Self::new(Arc::new(source), config)
    }

    /// Parsing state carried between batches
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn end_of_data(&self) -> bool {
        self.state.end_of_data
    }

    pub fn header(&self) -> Option<&Row> {
        self.state.header.as_ref()
    }

    pub fn rows_so_far(&self) -> u64 {
        self.state.rows_so_far
    }

    /// Tokenize the next batch of rows
    ///
    /// # Returns
    /// * Rows finalized before the source ran out or the budget was exceeded
    ///
    /// # Errors
    /// * `EndOfData` if the session already reached the end of the source
    /// * `InvalidData` for structural violations; the session is finished afterwards
    /// * Resource errors from the chunk source
    pub fn next_batch(&mut self) -> Result<Batch> {
        if self.state.end_of_data {
            return Err(SvError::EndOfData);
        }

        let first_line = self.state.current_line();
        let header_pending = self.state.header.is_none();
        let mut rows = Vec::new();

        let consumed = match self.fill(&mut rows) {
            Ok(consumed) => consumed,
            Err(err) => {
                self.state.end_of_data = true;
                return Err(err);
            }
        };

        debug!(
            "Batch from {}: {} rows, {} chars, resume at byte {}{}",
            self.source.describe(),
            rows.len(),
            consumed,
            self.state.resume_position,
            if self.state.end_of_data {
                " (end of data)"
            } else {
                ""
            }
        );

        Ok(Batch {
            includes_header: header_pending && !rows.is_empty(),
            rows,
            first_line,
            chars_consumed: consumed,
        })
    }

    /// Tokenize every remaining batch and concatenate the rows
    pub fn collect_remaining(&mut self) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        while !self.state.end_of_data {
            rows.extend(self.next_batch()?.rows);
        }
        Ok(rows)
    }

    fn fill(&mut self, rows: &mut Vec<Row>) -> Result<usize> {
        let mut consumed = 0usize;
        loop {
            let chunk = self.source.read(self.state.resume_position)?;
            for ch in chunk.chars() {
                self.state.feed(ch, &self.dialect, rows)?;
            }
            consumed += chunk.chars_read;
            self.state.resume_position = chunk.position;

            if chunk.exhausted {
                self.state.end_of_data = true;
                self.state.finish_stream(rows)?;
                return Ok(consumed);
            }
            if consumed > self.batch_budget {
                return Ok(consumed);
            }
        }
    }
}
