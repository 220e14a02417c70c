use crate::{AppendError, AppendableLike};

mod builtin;
mod wrap;

pub use wrap::{FmtAppendable, IoAppendable};

pub type AppendResult<T> = Result<T, AppendError>;

/// Something that can render itself as text into any [`Appendable`].
///
/// Implementations should only fail when `buff` itself fails.
pub trait AppendTo {
    fn append_to(&self, buff: &mut dyn Appendable) -> AppendResult<()>;
}

/// A native view of a sink that supports allocation-free appends.
pub enum FastSink<'s> {
    String(&'s mut String),
    /// UTF-8 text accumulated as raw bytes.
    Bytes(&'s mut Vec<u8>),
}

/// A destination that accumulates characters.
///
/// Only [`Appendable::append_str`] is required. Sinks that are one of the
/// fast kinds expose themselves through [`Appendable::fast_sink`] so that
/// [`AppendableLike`] can skip intermediate text conversions.
pub trait Appendable {
    fn append_str(&mut self, s: &str) -> AppendResult<()>;

    fn append_char(&mut self, c: char) -> AppendResult<()> {
        self.append_str(c.encode_utf8(&mut [0u8; 4]))
    }

    fn fast_sink(&mut self) -> Option<FastSink<'_>> {
        None
    }

    fn append_value<T>(&mut self, value: &T) -> AppendResult<()>
    where
        T: AppendTo + ?Sized,
        Self: Sized,
    {
        value.append_to(self)
    }

    fn append_like(&mut self) -> AppendableLike<'_>
    where
        Self: Sized,
    {
        AppendableLike::new(self)
    }
}
