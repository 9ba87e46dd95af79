//! JSON document layer for `json-model`.
//!
//! This crate is the only place that talks to `serde_json` directly. It exposes
//! the narrow surface the codec needs: classifying a node, parsing document text
//! into a tree with byte-accurate error offsets, and a streaming writer that
//! builds a tree and renders compact text.
//!
#![deny(missing_docs)]

/// Node classification and kind names.
pub mod kind;
/// Document text to tree parsing.
pub mod parse;
/// Start/end + key + scalar writer producing a tree.
pub mod writer;

pub use kind::Kind;
pub use parse::{parse_document, SyntaxError};
pub use serde_json::{Map, Number, Value};
pub use writer::TreeWriter;
