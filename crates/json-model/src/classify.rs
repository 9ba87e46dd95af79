use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::decode::Decode;
use crate::encode::Encode;
use crate::model::Model;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// A type the codec knows how to map to and from JSON.
///
/// The set is closed: primitives (`bool`, `f64`, `i32`, `i64`, `u32`, `u64`,
/// `String`, and `()` for `null`), owned nodes (`Box<M>` for any [`Model`]),
/// sequences (`Vec<T>`), mappings (`BTreeMap<String, T>` and
/// `HashMap<String, T>`), and variants (`OneOf1` through `OneOf12`). `Option<T>` is
/// not a `JsonType`; optionality is a property of a field.
///
/// Anything outside the set is rejected when the model is compiled:
///
/// ```compile_fail
/// use json_model::{Fields, Model};
///
/// #[derive(Default)]
/// struct Bad {
///     nested: Option<Option<i32>>,
/// }
///
/// impl Model for Bad {
///     fn fields(fields: &mut Fields<Self>) {
///         fields.optional("nested", |m| &m.nested, |m| &mut m.nested);
///     }
/// }
/// ```
///
/// ```compile_fail
/// use json_model::{Fields, Model};
///
/// #[derive(Default)]
/// struct Bad {
///     items: Vec<Option<i32>>,
/// }
///
/// impl Model for Bad {
///     fn fields(fields: &mut Fields<Self>) {
///         fields.required("items", |m| &m.items, |m| &mut m.items);
///     }
/// }
/// ```
///
/// ```compile_fail
/// use json_model::{Fields, Model};
///
/// #[derive(Default)]
/// struct Bad {
///     small: i16,
/// }
///
/// impl Model for Bad {
///     fn fields(fields: &mut Fields<Self>) {
///         fields.required("small", |m| &m.small, |m| &mut m.small);
///     }
/// }
/// ```
pub trait JsonType: Encode + Decode + Default + sealed::Sealed + 'static {
    /// Describes the JSON shape this type accepts and produces.
    fn shape() -> Shape;
}

/// Types allowed as a variant alternative: every [`JsonType`] except variants.
///
/// ```compile_fail
/// use json_model::{Alternative, OneOf1};
///
/// fn alternative<T: Alternative>() {}
/// alternative::<OneOf1<i32>>();
/// ```
pub trait Alternative: JsonType {}

/// Fixed set of scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    /// `bool`, JSON `true`/`false`.
    Bool,
    /// `f64`, any JSON number exactly representable as a double.
    Double,
    /// `i32`.
    Int32,
    /// `i64`.
    Int64,
    /// `u32`.
    Uint32,
    /// `u64`.
    Uint64,
    /// `String`.
    String,
    /// `()`, JSON `null`.
    Null,
}

impl Primitive {
    /// Name reported as the expected type in mismatches.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Double => "double",
            Primitive::Int32 => "int",
            Primitive::Int64 => "int64",
            Primitive::Uint32 => "uint",
            Primitive::Uint64 => "uint64",
            Primitive::String => "string",
            Primitive::Null => "null",
        }
    }
}

/// Classified shape of a field or value type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "category", content = "of", rename_all = "snake_case")]
pub enum Shape {
    /// A scalar.
    Primitive(Primitive),
    /// An owned nested model, by type name.
    Node(&'static str),
    /// A JSON array of one element shape.
    Sequence(Box<Shape>),
    /// A JSON object with arbitrary keys and one value shape.
    Mapping {
        /// Whether encoding emits keys in sorted order.
        ordered: bool,
        /// Shape of every value.
        value: Box<Shape>,
    },
    /// One of several alternatives, tried in order.
    Variant(Vec<Shape>),
    /// A field that may be absent.
    Optional(Box<Shape>),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Primitive(primitive) => f.write_str(primitive.name()),
            Shape::Node(name) => f.write_str(name),
            Shape::Sequence(element) => write!(f, "array<{}>", element),
            Shape::Mapping { ordered: true, value } => write!(f, "map<{}>", value),
            Shape::Mapping {
                ordered: false,
                value,
            } => write!(f, "unordered_map<{}>", value),
            Shape::Variant(alternatives) => {
                f.write_str("one_of<")?;
                for (idx, alternative) in alternatives.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", alternative)?;
                }
                f.write_str(">")
            }
            Shape::Optional(inner) => write!(f, "optional<{}>", inner),
        }
    }
}

macro_rules! primitive {
    ($ty:ty, $primitive:ident) => {
        impl sealed::Sealed for $ty {}

        impl JsonType for $ty {
            fn shape() -> Shape {
                Shape::Primitive(Primitive::$primitive)
            }
        }

        impl Alternative for $ty {}
    };
}

primitive!(bool, Bool);
primitive!(f64, Double);
primitive!(i32, Int32);
primitive!(i64, Int64);
primitive!(u32, Uint32);
primitive!(u64, Uint64);
primitive!(String, String);
primitive!((), Null);

impl<M: Model> sealed::Sealed for Box<M> {}

impl<M: Model> JsonType for Box<M> {
    fn shape() -> Shape {
        Shape::Node(short_type_name::<M>())
    }
}

impl<M: Model> Alternative for Box<M> {}

impl<T: JsonType> sealed::Sealed for Vec<T> {}

impl<T: JsonType> JsonType for Vec<T> {
    fn shape() -> Shape {
        Shape::Sequence(Box::new(T::shape()))
    }
}

impl<T: JsonType> Alternative for Vec<T> {}

impl<T: JsonType> sealed::Sealed for BTreeMap<String, T> {}

impl<T: JsonType> JsonType for BTreeMap<String, T> {
    fn shape() -> Shape {
        Shape::Mapping {
            ordered: true,
            value: Box::new(T::shape()),
        }
    }
}

impl<T: JsonType> Alternative for BTreeMap<String, T> {}

impl<T: JsonType> sealed::Sealed for HashMap<String, T> {}

impl<T: JsonType> JsonType for HashMap<String, T> {
    fn shape() -> Shape {
        Shape::Mapping {
            ordered: false,
            value: Box::new(T::shape()),
        }
    }
}

impl<T: JsonType> Alternative for HashMap<String, T> {}

/// Last path component of a type name, keeping generic arguments intact.
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
