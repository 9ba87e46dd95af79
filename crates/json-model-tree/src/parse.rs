use serde_json::Value;
use thiserror::Error;

/// Document text that could not be turned into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} (offset {offset})")]
pub struct SyntaxError {
    /// Byte offset of the offending input.
    pub offset: usize,
    /// Parser message without position information.
    pub reason: String,
}

/// Parses document text into a tree.
///
/// The parser reports positions as line and column; they are converted back to a
/// byte offset into `text` so callers can point at the exact spot. Input that
/// ends early points at the end of `text`.
pub fn parse_document(text: &str) -> Result<Value, SyntaxError> {
    serde_json::from_str(text).map_err(|err| {
        let offset = if err.is_eof() {
            text.len()
        } else {
            byte_offset(text, err.line(), err.column())
        };
        SyntaxError {
            offset,
            reason: bare_reason(&err),
        }
    })
}

/// `serde_json` columns count bytes from the start of the line, starting at 1
/// for the first byte.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start = if line == 1 {
        0
    } else {
        text.match_indices('\n')
            .nth(line - 2)
            .map(|(idx, _)| idx + 1)
            .unwrap_or(text.len())
    };
    (line_start + column.saturating_sub(1)).min(text.len())
}

fn bare_reason(err: &serde_json::Error) -> String {
    let full = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    match full.strip_suffix(&suffix) {
        Some(reason) => reason.to_string(),
        None => full,
    }
}
