use json_model_tree::{Kind, Number, Value};
use std::collections::{BTreeMap, HashMap};

use crate::classify::{JsonType, Primitive};
use crate::error::{Error, SchemaError, SchemaErrorKind};
use crate::init::default_of;
use crate::model::{decode_object, Model};

/// Default maximum nesting of arrays and objects accepted while decoding.
///
/// Matches the recursion limit of the JSON parser, so any parsed document
/// fits unless the limit is lowered.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// How decode failures are signaled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Stop at the first failure and report it with its full path.
    #[default]
    FailFast,
    /// Stop at the first failure and report only that decoding failed.
    BooleanResult,
}

/// Per-call decode settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Failure signaling discipline.
    pub mode: Mode,
    /// Maximum nesting of arrays and objects.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            mode: Mode::FailFast,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Options with the given mode and the default depth limit.
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Replaces the depth limit.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Outcome of a failed decode step.
#[derive(Debug)]
pub enum Failure {
    /// Fail-fast mode: the error with the path collected so far.
    Reported(Box<SchemaError>),
    /// Boolean-result mode: nothing beyond the fact of failure.
    Rejected,
}

impl Failure {
    /// Records that the failure happened under object member `key`.
    pub fn at_key(self, key: &str) -> Self {
        match self {
            Failure::Reported(mut err) => {
                err.trace_mut().push_key(key);
                Failure::Reported(err)
            }
            Failure::Rejected => Failure::Rejected,
        }
    }

    /// Records that the failure happened at array position `index`.
    pub fn at_index(self, index: usize) -> Self {
        match self {
            Failure::Reported(mut err) => {
                err.trace_mut().push_index(index);
                Failure::Reported(err)
            }
            Failure::Rejected => Failure::Rejected,
        }
    }

    /// Records that the failure happened while decoding variant alternative `index`.
    pub fn at_alternative(self, index: usize) -> Self {
        match self {
            Failure::Reported(mut err) => {
                err.trace_mut().push_key(format!("<variant:{}>", index));
                Failure::Reported(err)
            }
            Failure::Rejected => Failure::Rejected,
        }
    }
}

impl From<Failure> for Error {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::Reported(err) => Error::Schema(*err),
            Failure::Rejected => Error::Rejected,
        }
    }
}

/// State carried down one decode call: the mode and the current nesting depth.
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext {
    mode: Mode,
    depth: usize,
    max_depth: usize,
}

impl DecodeContext {
    /// Context for a new top-level decode.
    pub fn new(options: &DecodeOptions) -> Self {
        Self {
            mode: options.mode,
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    /// Active failure signaling discipline.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Same position, boolean-result signaling. Used for variant trials.
    pub fn trial(&self) -> Self {
        Self {
            mode: Mode::BooleanResult,
            ..*self
        }
    }

    /// Context for the children of an array or object at this level.
    pub fn descend(&self) -> Result<Self, Failure> {
        if self.depth >= self.max_depth {
            return Err(self.fail(SchemaErrorKind::DepthLimitExceeded {
                limit: self.max_depth,
            }));
        }
        Ok(Self {
            depth: self.depth + 1,
            ..*self
        })
    }

    /// Builds a failure in the active mode.
    pub fn fail(&self, kind: SchemaErrorKind) -> Failure {
        match self.mode {
            Mode::FailFast => Failure::Reported(Box::new(SchemaError::new(kind))),
            Mode::BooleanResult => Failure::Rejected,
        }
    }

    /// Failure for a node whose kind differs from `expected`.
    pub fn type_mismatch(&self, expected: &'static str, node: &Value) -> Failure {
        self.fail(SchemaErrorKind::TypeMismatch {
            expected,
            actual: Kind::of(node),
        })
    }

    /// Failure for a required member absent from its object.
    pub fn missing_key(&self, key: &str) -> Failure {
        self.fail(SchemaErrorKind::MissingKey {
            key: key.to_string(),
        })
    }
}

/// Fills a value from a document node, in place.
pub trait Decode {
    /// Decodes `node` into `self`. On failure `self` holds a partially decoded
    /// but structurally valid value.
    fn decode(&mut self, node: &Value, ctx: &DecodeContext) -> Result<(), Failure>;
}

fn scalar<'a, T>(
    node: &'a Value,
    ctx: &DecodeContext,
    primitive: Primitive,
    read: impl FnOnce(&'a Value) -> Option<T>,
) -> Result<T, Failure> {
    read(node).ok_or_else(|| ctx.type_mismatch(primitive.name(), node))
}

/// Accepts any double, and integers only when the conversion is lossless.
fn exact_f64(number: &Number) -> Option<f64> {
    if let Some(value) = number.as_i64() {
        let converted = value as f64;
        return (converted as i128 == i128::from(value)).then_some(converted);
    }
    if let Some(value) = number.as_u64() {
        let converted = value as f64;
        return (converted as u128 == u128::from(value)).then_some(converted);
    }
    number.as_f64()
}

impl Decode for bool {
    fn decode(&mut self, node: &Value, ctx: &DecodeContext) -> Result<(), Failure> {
        *self = scalar(node, ctx, Primitive::Bool, Value::as_bool)?;
        Ok(())
    }
}

impl Decode for f64 {
    fn decode(&mut self, node: &Value, ctx: &DecodeContext) -> Result<(), Failure> {
        *self = scalar(node, ctx, Primitive::Double, |node| match node {
            Value::Number(number) => exact_f64(number),
            _ => None,
        })?;
        Ok(())
    }
}

impl Decode for i32 {
    fn decode(&mut self, node: &Value, ctx: &DecodeContext) -> Result<(), Failure> {
        *self = scalar(node, ctx, Primitive::Int32, |node| {
            node.as_i64().and_then(|value| i32::try_from(value).ok())
        })?;
        Ok(())
    }
}

impl Decode for i64 {
    fn decode(&mut self, node: &Value, ctx: &DecodeContext) -> Result<(), Failure> {
        *self = scalar(node, ctx, Primitive::Int64, Value::as_i64)?;
        Ok(())
    }
}

impl Decode for u32 {
    fn decode(&mut self, node: &Value, ctx: &DecodeContext) -> Result<(), Failure> {
        *self = scalar(node, ctx, Primitive::Uint32, |node| {
            node.as_u64().and_then(|value| u32::try_from(value).ok())
        })?;
        Ok(())
    }
}

impl Decode for u64 {
    fn decode(&mut self, node: &Value, ctx: &DecodeContext) -> Result<(), Failure> {
        *self = scalar(node, ctx, Primitive::Uint64, Value::as_u64)?;
        Ok(())
    }
}

impl Decode for String {
    fn decode(&mut self, node: &Value, ctx: &DecodeContext) -> Result<(), Failure> {
        let text = scalar(node, ctx, Primitive::String, Value::as_str)?;
        self.clear();
        self.push_str(text);
        Ok(())
    }
}

impl Decode for () {
    fn decode(&mut self, node: &Value, ctx: &DecodeContext) -> Result<(), Failure> {
        scalar(node, ctx, Primitive::Null, Value::as_null)
    }
}

// The nested model checks the object shape itself.
impl<M: Model> Decode for Box<M> {
    fn decode(&mut self, node: &Value, ctx: &DecodeContext) -> Result<(), Failure> {
        decode_object(self.as_mut(), node, ctx)
    }
}

impl<T: JsonType> Decode for Vec<T> {
    fn decode(&mut self, node: &Value, ctx: &DecodeContext) -> Result<(), Failure> {
        let items = node
            .as_array()
            .ok_or_else(|| ctx.type_mismatch("array", node))?;
        let inner = ctx.descend()?;
        self.clear();
        self.reserve(items.len());
        for (index, item) in items.iter().enumerate() {
            let mut value: T = default_of();
            let outcome = value.decode(item, &inner);
            self.push(value);
            outcome.map_err(|failure| failure.at_index(index))?;
        }
        Ok(())
    }
}

impl<T: JsonType> Decode for BTreeMap<String, T> {
    fn decode(&mut self, node: &Value, ctx: &DecodeContext) -> Result<(), Failure> {
        self.clear();
        decode_entries(node, ctx, |key, value| {
            self.insert(key.to_string(), value);
        })
    }
}

impl<T: JsonType> Decode for HashMap<String, T> {
    fn decode(&mut self, node: &Value, ctx: &DecodeContext) -> Result<(), Failure> {
        self.clear();
        decode_entries(node, ctx, |key, value| {
            self.insert(key.to_string(), value);
        })
    }
}

/// Decodes object members in document order, handing each successful entry to `insert`.
fn decode_entries<T: JsonType>(
    node: &Value,
    ctx: &DecodeContext,
    mut insert: impl FnMut(&str, T),
) -> Result<(), Failure> {
    let members = node
        .as_object()
        .ok_or_else(|| ctx.type_mismatch("object", node))?;
    let inner = ctx.descend()?;
    for (key, member) in members {
        let mut value: T = default_of();
        value
            .decode(member, &inner)
            .map_err(|failure| failure.at_key(key))?;
        insert(key, value);
    }
    Ok(())
}

/// One way of reading a node as a variant: decode a single alternative.
pub(crate) type Attempt<V> = fn(&Value, &DecodeContext) -> Result<V, Failure>;

/// Resolves a variant by trial.
///
/// All alternatives but the last are attempted in boolean-result mode, each from
/// a fresh default, and the first success wins. The last alternative is decoded
/// in the caller's mode, so when nothing fits its own error is the one surfaced,
/// under an extra `"<variant:N>"` path segment.
pub(crate) fn resolve_variant<V>(
    alternatives: &[Attempt<V>],
    node: &Value,
    ctx: &DecodeContext,
) -> Result<V, Failure> {
    let (last, trials) = match alternatives.split_last() {
        Some(split) => split,
        None => return Err(ctx.type_mismatch("one_of", node)),
    };
    let trial = ctx.trial();
    for (index, attempt) in trials.iter().enumerate() {
        match attempt(node, &trial) {
            Ok(value) => return Ok(value),
            Err(_) => tracing::trace!(
                target: "json_model::variant",
                alternative = index,
                actual = %Kind::of(node),
                mode = ?ctx.mode(),
                "variant alternative rejected"
            ),
        }
    }
    last(node, ctx).map_err(|failure| failure.at_alternative(trials.len()))
}
