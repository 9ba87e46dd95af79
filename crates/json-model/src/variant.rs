//! Untagged variants.
//!
//! `OneOfN` holds exactly one of `N` alternatives. Encoding writes the active
//! alternative with no tag. Decoding tries the alternatives in declaration
//! order and keeps the first that fits, so overlapping alternatives resolve to
//! the lowest index.

use json_model_tree::{TreeWriter, Value};

use crate::classify::{sealed, Alternative, JsonType, Shape};
use crate::decode::{resolve_variant, Attempt, Decode, DecodeContext, Failure};
use crate::encode::Encode;
use crate::init::default_of;

macro_rules! one_of {
    ($name:ident, $doc:expr, $first:ident = $first_idx:literal $(, $alt:ident = $idx:literal)*) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name<$first $(, $alt)*> {
            #[doc = concat!("Alternative ", stringify!($first_idx), "; the default.")]
            $first($first),
            $(
                #[doc = concat!("Alternative ", stringify!($idx), ".")]
                $alt($alt),
            )*
        }

        impl<$first $(, $alt)*> $name<$first $(, $alt)*> {
            /// Zero-based position of the active alternative.
            pub fn index(&self) -> usize {
                match self {
                    $name::$first(_) => $first_idx,
                    $($name::$alt(_) => $idx,)*
                }
            }
        }

        impl<$first: Alternative $(, $alt: Alternative)*> Default for $name<$first $(, $alt)*> {
            fn default() -> Self {
                $name::$first(default_of())
            }
        }

        impl<$first: Alternative $(, $alt: Alternative)*> Encode for $name<$first $(, $alt)*> {
            fn encode(&self, out: &mut TreeWriter) {
                match self {
                    $name::$first(value) => value.encode(out),
                    $($name::$alt(value) => value.encode(out),)*
                }
            }
        }

        impl<$first: Alternative $(, $alt: Alternative)*> Decode for $name<$first $(, $alt)*> {
            fn decode(&mut self, node: &Value, ctx: &DecodeContext) -> Result<(), Failure> {
                let alternatives = [
                    (|node: &Value, ctx: &DecodeContext| -> Result<Self, Failure> {
                        let mut value: $first = default_of();
                        value.decode(node, ctx)?;
                        Ok($name::$first(value))
                    }) as Attempt<Self>,
                    $(
                        (|node: &Value, ctx: &DecodeContext| -> Result<Self, Failure> {
                            let mut value: $alt = default_of();
                            value.decode(node, ctx)?;
                            Ok($name::$alt(value))
                        }) as Attempt<Self>,
                    )*
                ];
                *self = resolve_variant(&alternatives, node, ctx)?;
                Ok(())
            }
        }

        impl<$first: Alternative $(, $alt: Alternative)*> sealed::Sealed for $name<$first $(, $alt)*> {}

        impl<$first: Alternative $(, $alt: Alternative)*> JsonType for $name<$first $(, $alt)*> {
            fn shape() -> Shape {
                Shape::Variant(vec![$first::shape() $(, $alt::shape())*])
            }
        }
    };
}

one_of!(OneOf1, "Variant with a single alternative.", A = 0);
one_of!(OneOf2, "Variant over two alternatives.", A = 0, B = 1);
one_of!(OneOf3, "Variant over three alternatives.", A = 0, B = 1, C = 2);
one_of!(OneOf4, "Variant over four alternatives.", A = 0, B = 1, C = 2, D = 3);
one_of!(
    OneOf5,
    "Variant over five alternatives.",
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4
);
one_of!(
    OneOf6,
    "Variant over six alternatives.",
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5
);
one_of!(
    OneOf7,
    "Variant over seven alternatives.",
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6
);
one_of!(
    OneOf8,
    "Variant over eight alternatives.",
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7
);
one_of!(
    OneOf9,
    "Variant over nine alternatives.",
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    I = 8
);
one_of!(
    OneOf10,
    "Variant over ten alternatives.",
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    I = 8,
    J = 9
);
one_of!(
    OneOf11,
    "Variant over eleven alternatives.",
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    I = 8,
    J = 9,
    K = 10
);
one_of!(
    OneOf12,
    "Variant over twelve alternatives.",
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    I = 8,
    J = 9,
    K = 10,
    L = 11
);
