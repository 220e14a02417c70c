//! [`AppendTo`](crate::AppendTo) for standard library types.
//!
//! Primitives render exactly as [`AppendableLike`](crate::AppendableLike)
//! renders them, so a value appended directly and a value appended through
//! its `AppendTo` impl produce the same text.

mod containers;
mod primitives;
mod tuples;
