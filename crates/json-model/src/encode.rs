use json_model_tree::TreeWriter;
use std::collections::{BTreeMap, HashMap};

use crate::model::{encode_object, Model};

/// Renders a value into a [`TreeWriter`]. Encoding a well-formed value cannot fail.
pub trait Encode {
    /// Writes `self` at the writer's current position.
    fn encode(&self, out: &mut TreeWriter);
}

impl Encode for bool {
    fn encode(&self, out: &mut TreeWriter) {
        out.bool(*self);
    }
}

impl Encode for f64 {
    fn encode(&self, out: &mut TreeWriter) {
        out.f64(*self);
    }
}

impl Encode for i32 {
    fn encode(&self, out: &mut TreeWriter) {
        out.i64(i64::from(*self));
    }
}

impl Encode for i64 {
    fn encode(&self, out: &mut TreeWriter) {
        out.i64(*self);
    }
}

impl Encode for u32 {
    fn encode(&self, out: &mut TreeWriter) {
        out.u64(u64::from(*self));
    }
}

impl Encode for u64 {
    fn encode(&self, out: &mut TreeWriter) {
        out.u64(*self);
    }
}

impl Encode for String {
    fn encode(&self, out: &mut TreeWriter) {
        out.string(self);
    }
}

impl Encode for () {
    fn encode(&self, out: &mut TreeWriter) {
        out.null();
    }
}

impl<M: Model> Encode for Box<M> {
    fn encode(&self, out: &mut TreeWriter) {
        encode_object(self.as_ref(), out);
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, out: &mut TreeWriter) {
        out.start_array();
        for item in self {
            item.encode(out);
        }
        out.end_array();
    }
}

// Sorted key order.
impl<T: Encode> Encode for BTreeMap<String, T> {
    fn encode(&self, out: &mut TreeWriter) {
        encode_entries(self.iter(), out);
    }
}

// Iteration order of the hash map; every entry is emitted exactly once.
impl<T: Encode> Encode for HashMap<String, T> {
    fn encode(&self, out: &mut TreeWriter) {
        encode_entries(self.iter(), out);
    }
}

fn encode_entries<'a, T: Encode + 'a>(
    entries: impl Iterator<Item = (&'a String, &'a T)>,
    out: &mut TreeWriter,
) {
    out.start_object();
    for (key, value) in entries {
        out.key(key);
        value.encode(out);
    }
    out.end_object();
}
