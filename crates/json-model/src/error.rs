use json_model_tree::Kind;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Characters shown on each side of a parse error offset.
const SNIPPET_RADIUS: usize = 30;

/// Error returned by model decoding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Document text is not valid JSON.
    #[error(transparent)]
    Malformed(#[from] ParseError),
    /// Document is valid JSON but does not fit the model.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// Decoding in boolean-result mode failed; no diagnostics are collected.
    #[error("document rejected")]
    Rejected,
}

impl Error {
    /// One-line description, identical to `Display`.
    pub fn compact(&self) -> String {
        self.to_string()
    }

    /// Multi-line description with labels and, for parse errors, a caret.
    pub fn prettified(&self) -> String {
        match self {
            Error::Malformed(err) => err.prettified(),
            Error::Schema(err) => err.prettified(),
            Error::Rejected => self.to_string(),
        }
    }

    /// Short, fixed summary of the error category.
    pub fn what(&self) -> &'static str {
        match self {
            Error::Malformed(err) => err.what(),
            Error::Schema(err) => err.what(),
            Error::Rejected => "Document rejected",
        }
    }
}

/// Document text could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot parse json (offset {offset}): {reason}")]
pub struct ParseError {
    offset: usize,
    reason: String,
    snippet: String,
    caret: usize,
}

impl ParseError {
    /// Builds the error and captures a window of `text` around `offset`.
    pub fn new(text: &str, offset: usize, reason: impl Into<String>) -> Self {
        let (snippet, caret) = snippet(text, offset);
        Self {
            offset,
            reason: reason.into(),
            snippet,
            caret,
        }
    }

    /// Byte offset of the offending input.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Parser message.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Window of the input around the offset, newlines escaped.
    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    /// Multi-line form with the snippet and a caret under the offset.
    pub fn prettified(&self) -> String {
        format!(
            "Cannot parse json ({} at {}):\n | {}\n | {}^",
            self.reason,
            self.offset,
            self.snippet,
            " ".repeat(self.caret)
        )
    }

    /// Short, fixed summary.
    pub fn what(&self) -> &'static str {
        "Failed to parse json string"
    }
}

/// Cuts up to `2 * SNIPPET_RADIUS` characters around `offset` and returns the
/// rendered window with the caret column inside it.
fn snippet(text: &str, offset: usize) -> (String, usize) {
    let len = text.len();
    let mut offset = offset.min(len);
    let window = SNIPPET_RADIUS * 2;
    let (mut start, mut end) = if offset < SNIPPET_RADIUS {
        (0, window.min(len))
    } else if len - offset < SNIPPET_RADIUS {
        (len.max(window) - window, len)
    } else {
        (offset - SNIPPET_RADIUS, offset + SNIPPET_RADIUS)
    };
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    while !text.is_char_boundary(end) {
        end += 1;
    }
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }

    let mut rendered = String::with_capacity(end - start + 6);
    let mut caret = 0;
    for (idx, ch) in text[start..end].char_indices() {
        let before_offset = start + idx < offset;
        if ch == '\n' {
            rendered.push_str("\\n");
            if before_offset {
                caret += 2;
            }
        } else {
            rendered.push(ch);
            if before_offset {
                caret += 1;
            }
        }
    }
    if start != 0 {
        rendered.insert_str(0, "...");
        caret += 3;
    }
    if end != len {
        rendered.push_str("...");
    }
    (rendered, caret)
}

/// One step of the path from the document root to a failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    /// Object member name. Rendered verbatim between double quotes; quotes and
    /// backslashes inside the name are not escaped.
    Key(String),
    /// Array position.
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "\"{}\"", key),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Path to a failure, collected while decoding unwinds.
///
/// Segments are pushed deepest first; rendering and iteration are root first.
/// Serializes as a root-first array of keys and indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Segment>", from = "Vec<Segment>")]
pub struct Trace {
    reversed: Vec<Segment>,
}

impl Trace {
    /// Prepends an object member name.
    pub fn push_key(&mut self, key: impl Into<String>) {
        self.reversed.push(Segment::Key(key.into()));
    }

    /// Prepends an array position.
    pub fn push_index(&mut self, index: usize) {
        self.reversed.push(Segment::Index(index));
    }

    /// Segments from the root down to the failure.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.reversed.iter().rev()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.reversed.len()
    }

    /// True when the failure is at the document root.
    pub fn is_empty(&self) -> bool {
        self.reversed.is_empty()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for segment in self.segments() {
            write!(f, "[{}]", segment)?;
        }
        Ok(())
    }
}

impl From<Trace> for Vec<Segment> {
    fn from(trace: Trace) -> Self {
        let mut segments = trace.reversed;
        segments.reverse();
        segments
    }
}

impl From<Vec<Segment>> for Trace {
    fn from(mut segments: Vec<Segment>) -> Self {
        segments.reverse();
        Self { reversed: segments }
    }
}

/// What went wrong at the traced location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaErrorKind {
    /// The node has a different JSON type than the model expects.
    TypeMismatch {
        /// Name of the expected type (`int`, `object`, ...).
        expected: &'static str,
        /// Kind of the node found.
        actual: Kind,
    },
    /// A required member is absent from the object.
    MissingKey {
        /// Name of the missing member.
        key: String,
    },
    /// The document nests deeper than allowed.
    DepthLimitExceeded {
        /// Configured maximum depth.
        limit: usize,
    },
}

/// Document does not fit the model. `Display` is the compact form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    kind: SchemaErrorKind,
    trace: Trace,
}

impl SchemaError {
    /// Creates an error located at the root; callers extend the trace while unwinding.
    pub fn new(kind: SchemaErrorKind) -> Self {
        Self {
            kind,
            trace: Trace::default(),
        }
    }

    /// Shorthand for a type mismatch.
    pub fn type_mismatch(expected: &'static str, actual: Kind) -> Self {
        Self::new(SchemaErrorKind::TypeMismatch { expected, actual })
    }

    /// Shorthand for a missing key.
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::new(SchemaErrorKind::MissingKey { key: key.into() })
    }

    /// What went wrong.
    pub fn kind(&self) -> &SchemaErrorKind {
        &self.kind
    }

    /// Where it went wrong.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Mutable access used while unwinding.
    pub fn trace_mut(&mut self) -> &mut Trace {
        &mut self.trace
    }

    /// Rendered path, e.g. `root["a"][3]`.
    pub fn path(&self) -> String {
        self.trace.to_string()
    }

    /// One-line description.
    pub fn compact(&self) -> String {
        match &self.kind {
            SchemaErrorKind::TypeMismatch { expected, actual } => format!(
                "Type mismatch at '{}' (expected: {}, actual: {})",
                self.trace, expected, actual
            ),
            SchemaErrorKind::MissingKey { key } => {
                format!("Key '{}' missing at '{}'", key, self.trace)
            }
            SchemaErrorKind::DepthLimitExceeded { limit } => format!(
                "Nesting depth limit ({}) exceeded at '{}'",
                limit, self.trace
            ),
        }
    }

    /// Multi-line labeled description.
    pub fn prettified(&self) -> String {
        match &self.kind {
            SchemaErrorKind::TypeMismatch { expected, actual } => format!(
                "Type mismatch:\n  expected: {}\n  which is: {}\n     to be: {}",
                self.trace, actual, expected
            ),
            SchemaErrorKind::MissingKey { key } => format!(
                "Missing required key:\n     expected: {}\n  to have key: {}",
                self.trace, key
            ),
            SchemaErrorKind::DepthLimitExceeded { limit } => format!(
                "Nesting too deep:\n  at: {}\n  limit: {}",
                self.trace, limit
            ),
        }
    }

    /// Short, fixed summary.
    pub fn what(&self) -> &'static str {
        match self.kind {
            SchemaErrorKind::TypeMismatch { .. } => "Type mismatch",
            SchemaErrorKind::MissingKey { .. } => "Missing required key",
            SchemaErrorKind::DepthLimitExceeded { .. } => "Nesting depth limit exceeded",
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compact())
    }
}
