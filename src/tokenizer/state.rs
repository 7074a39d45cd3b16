//! Per-character transition function of the tokenizer.

use crate::config::Dialect;
use crate::error::DataErrorKind;

/// Quoting state of the field under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    /// Accumulating literal characters
    #[default]
    Unquoted,
    /// Inside a quoted field; delimiters and line breaks are literal
    Quoted,
    /// Just saw a quote inside a quoted field; the next character decides
    /// between an escaped quote and the end of the field
    AwaitingQuoteOrSeparator,
}

/// What the driver must do with the current character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Push the character onto the pending field
    Append(char),
    /// Close the pending field
    EndField,
    /// Close the pending field and the row
    EndRow,
    /// Drop the character
    Skip,
}

/// Compute the transition for one character.
///
/// `field_is_empty` reports whether the pending field holds no characters yet;
/// it decides whether a quote may open a quoted field and whether a line
/// feed is allowed at all.
///
/// # Errors
/// * `EmptyLine` - a line feed while the pending field is empty, in any state
/// * `QuoteNotAllowed` - a quote after literal content in an unquoted field
/// * `QuoteExpected` - anything but a quote, delimiter or line break after a
///   closing quote
pub fn step(
    state: FieldState,
    ch: char,
    field_is_empty: bool,
    dialect: &Dialect,
) -> Result<(FieldState, Effect), DataErrorKind> {
    use FieldState::*;

    if ch == '\n' && field_is_empty {
        return Err(DataErrorKind::EmptyLine);
    }

    match state {
        Unquoted => {
            if ch == dialect.delimiter {
                Ok((Unquoted, Effect::EndField))
            } else if ch == dialect.quote {
                if field_is_empty {
                    Ok((Quoted, Effect::Skip))
                } else {
                    Err(DataErrorKind::QuoteNotAllowed)
                }
            } else {
                match ch {
                    '\r' => Ok((Unquoted, Effect::Skip)),
                    '\n' => Ok((Unquoted, Effect::EndRow)),
                    _ => Ok((Unquoted, Effect::Append(ch))),
                }
            }
        }
        Quoted => {
            if ch == dialect.quote {
                Ok((AwaitingQuoteOrSeparator, Effect::Skip))
            } else {
                Ok((Quoted, Effect::Append(ch)))
            }
        }
        AwaitingQuoteOrSeparator => {
            if ch == dialect.delimiter {
                Ok((Unquoted, Effect::EndField))
            } else if ch == dialect.quote {
                // Doubled quote is one literal quote
                Ok((Quoted, Effect::Append(ch)))
            } else {
                match ch {
                    '\r' => Ok((AwaitingQuoteOrSeparator, Effect::Skip)),
                    '\n' => Ok((Unquoted, Effect::EndRow)),
                    _ => Err(DataErrorKind::QuoteExpected),
                }
            }
        }
    }
}
