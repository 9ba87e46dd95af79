//! Canonical empty values.
//!
//! Every classified type has a default: zero, `false`, empty string, `null`,
//! an empty container, a freshly built nested model, or a variant holding the
//! default of its first alternative. A slot is reset to that default before
//! each decode attempt, so a failed attempt never leaves half-written state
//! behind in siblings.

use crate::classify::JsonType;

/// Returns the canonical empty value of `T`.
pub fn default_of<T: JsonType>() -> T {
    T::default()
}

/// Replaces `slot` with the canonical empty value of `T`.
pub(crate) fn reset<T: JsonType>(slot: &mut T) {
    *slot = default_of();
}
