//! Strict mapping between typed Rust models and JSON documents.
//!
//! A [`Model`] lists its fields once; every field type is one of a closed set
//! of shapes (see [`JsonType`]). Encoding never fails. Decoding checks every
//! node against the expected shape with no numeric widening, and reports the
//! first violation with its path (`root["objects"][1]`) in fail-fast mode, or
//! just rejects the document in boolean-result mode.
//!
#![deny(missing_docs)]

/// Type classification and shape descriptors.
pub mod classify;
/// Structural decoding and decode options.
pub mod decode;
/// Structural encoding.
pub mod encode;
/// Error kinds, traces, and their renderings.
pub mod error;
/// Field declarations.
pub mod field;
pub mod init;
/// The model contract.
pub mod model;
pub mod variant;

pub use classify::{Alternative, JsonType, Primitive, Shape};
pub use decode::{Decode, DecodeContext, DecodeOptions, Failure, Mode, DEFAULT_MAX_DEPTH};
pub use encode::Encode;
pub use error::{Error, ParseError, SchemaError, SchemaErrorKind, Segment, Trace};
pub use field::{FieldInfo, Fields, Getter, GetterMut};
pub use init::default_of;
pub use json_model_tree::{Kind, Value};
pub use model::Model;
pub use variant::{
    OneOf1, OneOf10, OneOf11, OneOf12, OneOf2, OneOf3, OneOf4, OneOf5, OneOf6, OneOf7, OneOf8,
    OneOf9,
};
