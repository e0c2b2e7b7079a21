//! Dense, opaque handles used throughout the frontend.
//!
//! Each is a thin `u32` newtype: cheap to copy, ordered (so callers can sort
//! by declaration order), and distinct so one can't be passed where another
//! is expected.

macro_rules! dense_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            #[must_use]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            #[must_use]
            pub const fn index(self) -> u32 {
                self.0
            }

            #[must_use]
            pub fn as_usize(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

dense_id!(
    KeyIdent,
    "A stable, dense integer key assigned to an interned absolute identifier."
);
dense_id!(
    LocalIndex,
    "The 0-based index of a local variable within its enclosing function body."
);
dense_id!(
    TypeParamIndex,
    "The 0-based index of a type parameter within its enclosing template."
);
dense_id!(
    FieldIndex,
    "The 0-based index of a named field within its constructor's declared order."
);
