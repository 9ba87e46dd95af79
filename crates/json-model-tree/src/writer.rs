use serde_json::{Map, Number, Value};

/// Streaming writer that assembles a document tree.
///
/// Calls must be balanced: every `start_*` is closed by the matching `end_*`,
/// and inside an object every value is preceded by [`TreeWriter::key`]. The
/// encoder in `json-model` upholds this by construction; violations are caught
/// by debug assertions.
///
/// # Example
///
/// ```rust
/// use json_model_tree::TreeWriter;
///
/// let mut writer = TreeWriter::new();
/// writer.start_object();
/// writer.key("n");
/// writer.u64(7);
/// writer.end_object();
/// assert_eq!(writer.into_string(), r#"{"n":7}"#);
/// ```
#[derive(Debug, Default)]
pub struct TreeWriter {
    stack: Vec<Frame>,
    root: Option<Value>,
}

#[derive(Debug)]
enum Frame {
    Object {
        members: Map<String, Value>,
        pending_key: Option<String>,
    },
    Array(Vec<Value>),
}

impl TreeWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an object.
    pub fn start_object(&mut self) {
        self.stack.push(Frame::Object {
            members: Map::new(),
            pending_key: None,
        });
    }

    /// Closes the innermost object.
    pub fn end_object(&mut self) {
        match self.stack.pop() {
            Some(Frame::Object { members, .. }) => self.emit(Value::Object(members)),
            other => debug_assert!(false, "end_object does not close an object: {:?}", other),
        }
    }

    /// Opens an array.
    pub fn start_array(&mut self) {
        self.stack.push(Frame::Array(Vec::new()));
    }

    /// Closes the innermost array.
    pub fn end_array(&mut self) {
        match self.stack.pop() {
            Some(Frame::Array(items)) => self.emit(Value::Array(items)),
            other => debug_assert!(false, "end_array does not close an array: {:?}", other),
        }
    }

    /// Names the next value written into the innermost object.
    pub fn key(&mut self, key: &str) {
        match self.stack.last_mut() {
            Some(Frame::Object { pending_key, .. }) => *pending_key = Some(key.to_string()),
            _ => debug_assert!(false, "key {:?} written outside of an object", key),
        }
    }

    /// Writes a boolean.
    pub fn bool(&mut self, value: bool) {
        self.emit(Value::Bool(value));
    }

    /// Writes a double. Non-finite values have no JSON form and are written as `null`.
    pub fn f64(&mut self, value: f64) {
        self.emit(Number::from_f64(value).map_or(Value::Null, Value::Number));
    }

    /// Writes a signed integer.
    pub fn i64(&mut self, value: i64) {
        self.emit(Value::Number(value.into()));
    }

    /// Writes an unsigned integer.
    pub fn u64(&mut self, value: u64) {
        self.emit(Value::Number(value.into()));
    }

    /// Writes a string.
    pub fn string(&mut self, value: &str) {
        self.emit(Value::String(value.to_string()));
    }

    /// Writes `null`.
    pub fn null(&mut self) {
        self.emit(Value::Null);
    }

    /// Returns the finished tree. An empty writer yields `null`.
    pub fn finish(self) -> Value {
        debug_assert!(self.stack.is_empty(), "unbalanced writer: {:?}", self.stack);
        self.root.unwrap_or(Value::Null)
    }

    /// Returns the finished tree rendered as compact text.
    pub fn into_string(self) -> String {
        self.finish().to_string()
    }

    fn emit(&mut self, value: Value) {
        match self.stack.last_mut() {
            None => self.root = Some(value),
            Some(Frame::Array(items)) => items.push(value),
            Some(Frame::Object {
                members,
                pending_key,
            }) => match pending_key.take() {
                Some(key) => {
                    members.insert(key, value);
                }
                None => debug_assert!(false, "object member written without a key"),
            },
        }
    }
}
