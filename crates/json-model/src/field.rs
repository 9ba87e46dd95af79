use json_model_tree::{Map, TreeWriter, Value};
use serde::Serialize;

use crate::classify::{JsonType, Shape};
use crate::decode::{DecodeContext, Failure};
use crate::init::reset;

/// Reads a field of `M`.
pub type Getter<M, T> = fn(&M) -> &T;
/// Writes a field of `M`.
pub type GetterMut<M, T> = fn(&mut M) -> &mut T;

/// Field declaration list of a [`Model`](crate::Model).
///
/// A model names its fields once, in order, inside
/// [`Model::fields`](crate::Model::fields). The same declaration drives
/// encoding, decoding, and [`Model::describe`](crate::Model::describe); the
/// order given is the member order written on encode and the order fields are
/// decoded in.
///
/// ```rust
/// use json_model::{Fields, Model};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Point {
///     x: i64,
///     label: Option<String>,
/// }
///
/// impl Model for Point {
///     fn fields(fields: &mut Fields<Self>) {
///         fields
///             .required("x", |m| &m.x, |m| &mut m.x)
///             .optional("label", |m| &m.label, |m| &mut m.label);
///     }
/// }
///
/// let point = Point::parse(r#"{"x": 3}"#).unwrap();
/// assert_eq!(point, Point { x: 3, label: None });
/// assert_eq!(point.to_json(), r#"{"x":3}"#);
/// ```
pub struct Fields<'a, M> {
    pass: Pass<'a, M>,
}

enum Pass<'a, M> {
    Encode {
        model: &'a M,
        out: &'a mut TreeWriter,
    },
    Decode {
        model: &'a mut M,
        members: &'a Map<String, Value>,
        ctx: &'a DecodeContext,
        outcome: Result<(), Failure>,
    },
    Describe(Vec<FieldInfo>),
}

/// Declared key and shape of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    /// External member name.
    pub key: &'static str,
    /// Shape of the value; [`Shape::Optional`] for optional fields.
    pub shape: Shape,
}

impl FieldInfo {
    /// True unless the field is optional.
    pub fn is_required(&self) -> bool {
        !matches!(self.shape, Shape::Optional(_))
    }
}

impl<'a, M> Fields<'a, M> {
    pub(crate) fn encoding(model: &'a M, out: &'a mut TreeWriter) -> Self {
        Self {
            pass: Pass::Encode { model, out },
        }
    }

    pub(crate) fn decoding(
        model: &'a mut M,
        members: &'a Map<String, Value>,
        ctx: &'a DecodeContext,
    ) -> Self {
        Self {
            pass: Pass::Decode {
                model,
                members,
                ctx,
                outcome: Ok(()),
            },
        }
    }

    pub(crate) fn describing() -> Self {
        Self {
            pass: Pass::Describe(Vec::new()),
        }
    }

    /// Declares a field whose key must be present.
    pub fn required<T: JsonType>(
        &mut self,
        key: &'static str,
        get: Getter<M, T>,
        get_mut: GetterMut<M, T>,
    ) -> &mut Self {
        match &mut self.pass {
            Pass::Encode { model, out } => {
                out.key(key);
                get(*model).encode(out);
            }
            Pass::Decode {
                model,
                members,
                ctx,
                outcome,
            } => {
                if outcome.is_ok() {
                    *outcome = decode_required(get_mut(model), key, members, ctx);
                }
            }
            Pass::Describe(infos) => infos.push(FieldInfo {
                key,
                shape: T::shape(),
            }),
        }
        self
    }

    /// Declares a field whose key may be absent.
    ///
    /// An absent key decodes to `None`, and `None` is encoded by omitting the
    /// key. A present key holding `null` is decoded as `T`, so it is accepted
    /// only when `T` is `()`.
    pub fn optional<T: JsonType>(
        &mut self,
        key: &'static str,
        get: Getter<M, Option<T>>,
        get_mut: GetterMut<M, Option<T>>,
    ) -> &mut Self {
        match &mut self.pass {
            Pass::Encode { model, out } => {
                if let Some(value) = get(*model) {
                    out.key(key);
                    value.encode(out);
                }
            }
            Pass::Decode {
                model,
                members,
                ctx,
                outcome,
            } => {
                if outcome.is_ok() {
                    *outcome = decode_optional(get_mut(model), key, members, ctx);
                }
            }
            Pass::Describe(infos) => infos.push(FieldInfo {
                key,
                shape: Shape::Optional(Box::new(T::shape())),
            }),
        }
        self
    }

    /// Outcome of the decode pass: the first field failure, if any.
    pub(crate) fn finish(self) -> Result<(), Failure> {
        match self.pass {
            Pass::Decode { outcome, .. } => outcome,
            _ => Ok(()),
        }
    }

    pub(crate) fn into_infos(self) -> Vec<FieldInfo> {
        match self.pass {
            Pass::Describe(infos) => infos,
            _ => Vec::new(),
        }
    }
}

fn decode_required<T: JsonType>(
    slot: &mut T,
    key: &str,
    members: &Map<String, Value>,
    ctx: &DecodeContext,
) -> Result<(), Failure> {
    let node = members.get(key).ok_or_else(|| ctx.missing_key(key))?;
    reset(slot);
    slot.decode(node, ctx).map_err(|failure| failure.at_key(key))
}

fn decode_optional<T: JsonType>(
    slot: &mut Option<T>,
    key: &str,
    members: &Map<String, Value>,
    ctx: &DecodeContext,
) -> Result<(), Failure> {
    let Some(node) = members.get(key) else {
        *slot = None;
        return Ok(());
    };
    slot.insert(T::default())
        .decode(node, ctx)
        .map_err(|failure| failure.at_key(key))
}
