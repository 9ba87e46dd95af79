use json_model_tree::{parse_document, TreeWriter, Value};

use crate::decode::{DecodeContext, DecodeOptions, Failure, Mode};
use crate::error::{Error, ParseError};
use crate::field::{FieldInfo, Fields};

/// An object-shaped node with a fixed list of fields.
///
/// Implementors declare their fields in [`Model::fields`]; everything else has
/// a default implementation. Nested models are held as `Box<M>` fields.
///
/// ```rust
/// use json_model::{Error, Fields, Model};
///
/// #[derive(Debug, Default)]
/// struct Inner {
///     flag: bool,
/// }
///
/// impl Model for Inner {
///     fn fields(fields: &mut Fields<Self>) {
///         fields.required("flag", |m| &m.flag, |m| &mut m.flag);
///     }
/// }
///
/// #[derive(Debug, Default)]
/// struct Outer {
///     inner: Box<Inner>,
/// }
///
/// impl Model for Outer {
///     fn fields(fields: &mut Fields<Self>) {
///         fields.required("inner", |m| &m.inner, |m| &mut m.inner);
///     }
/// }
///
/// let mut outer = Outer::default();
/// let err = outer.from_json(r#"{"inner": {"flag": 1}}"#).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     r#"Type mismatch at 'root["inner"]["flag"]' (expected: bool, actual: number)"#
/// );
/// assert!(matches!(err, Error::Schema(_)));
/// assert!(!outer.check_json("[]"));
/// ```
pub trait Model: Default + 'static {
    /// Declares the fields, in member order.
    fn fields(fields: &mut Fields<Self>);

    /// Renders the model as compact JSON text.
    fn to_json(&self) -> String {
        let mut out = TreeWriter::new();
        encode_object(self, &mut out);
        out.into_string()
    }

    /// Renders the model as a document tree.
    fn to_value(&self) -> Value {
        let mut out = TreeWriter::new();
        encode_object(self, &mut out);
        out.finish()
    }

    /// Decodes JSON text into `self`, reporting the first failure with its path.
    fn from_json(&mut self, text: &str) -> Result<(), Error> {
        self.from_json_with(text, &DecodeOptions::default())
    }

    /// Decodes JSON text into `self` and reports only whether it fit.
    ///
    /// On failure the fields decoded so far keep their values and the rest keep
    /// their defaults.
    fn check_json(&mut self, text: &str) -> bool {
        self.from_json_with(text, &DecodeOptions::with_mode(Mode::BooleanResult))
            .is_ok()
    }

    /// Decodes JSON text into `self` with explicit options.
    ///
    /// In [`Mode::BooleanResult`] every failure is [`Error::Rejected`].
    fn from_json_with(&mut self, text: &str, options: &DecodeOptions) -> Result<(), Error> {
        let document = match parse_document(text) {
            Ok(document) => document,
            Err(err) => {
                tracing::debug!(
                    target: "json_model::decode",
                    offset = err.offset,
                    reason = %err.reason,
                    "document is not valid json"
                );
                return Err(match options.mode {
                    Mode::FailFast => ParseError::new(text, err.offset, err.reason).into(),
                    Mode::BooleanResult => Error::Rejected,
                });
            }
        };
        self.from_value(&document, options)
    }

    /// Decodes an already parsed document tree into `self`.
    fn from_value(&mut self, value: &Value, options: &DecodeOptions) -> Result<(), Error> {
        let ctx = DecodeContext::new(options);
        decode_object(self, value, &ctx).map_err(|failure| {
            let err = Error::from(failure);
            tracing::debug!(
                target: "json_model::decode",
                model = std::any::type_name::<Self>(),
                error = %err,
                "document does not fit model"
            );
            err
        })
    }

    /// Builds a default model and decodes JSON text into it.
    fn parse(text: &str) -> Result<Self, Error> {
        let mut model = Self::default();
        model.from_json(text)?;
        Ok(model)
    }

    /// True when `text` decodes into this model.
    fn is_valid(text: &str) -> bool {
        Self::default().check_json(text)
    }

    /// Declared fields with their keys and shapes, in member order.
    fn describe() -> Vec<FieldInfo> {
        let mut fields = Fields::describing();
        Self::fields(&mut fields);
        fields.into_infos()
    }
}

/// Writes `model` as an object: every declared field in order.
pub(crate) fn encode_object<M: Model>(model: &M, out: &mut TreeWriter) {
    out.start_object();
    M::fields(&mut Fields::encoding(model, out));
    out.end_object();
}

/// Decodes an object node into `model`, field by field, stopping at the first failure.
pub(crate) fn decode_object<M: Model>(
    model: &mut M,
    node: &Value,
    ctx: &DecodeContext,
) -> Result<(), Failure> {
    let members = node
        .as_object()
        .ok_or_else(|| ctx.type_mismatch("object", node))?;
    let inner = ctx.descend()?;
    let mut fields = Fields::decoding(model, members, &inner);
    M::fields(&mut fields);
    fields.finish()
}
