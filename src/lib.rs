pub mod append;
pub mod callback;
pub mod like;
pub mod repr;

use std::fmt::Display;

#[cfg(feature = "derive")]
pub use appendlike_derive::*;

pub use append::{AppendResult, AppendTo, Appendable, FastSink, FmtAppendable, IoAppendable};
pub use callback::Callback;
pub use like::{AppendableLike, SinkKind, Value};

#[derive(Debug, thiserror::Error)]
enum AppendErrorInner {
    #[error(transparent)]
    Io(std::io::Error),
    #[error("sink was classified as {expected:?} but no longer exposes that view")]
    Inconsistent { expected: SinkKind },
    #[error("range {offset}..{offset}+{len} is out of bounds for {available} chars")]
    OutOfBounds {
        offset: usize,
        len: usize,
        available: usize,
    },
}

/// Which of the failure classes an [`AppendError`] belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AppendErrorKind {
    /// The sink rejected a write.
    Io,
    /// A fast-kind delegation found the sink no longer matches its classification.
    Inconsistent,
    /// A char-array range reached past the end of the array.
    OutOfBounds,
}

#[derive(Debug)]
pub struct AppendError {
    inner: AppendErrorInner,
}
impl AppendError {
    pub(crate) fn inconsistent(expected: SinkKind) -> Self {
        Self {
            inner: AppendErrorInner::Inconsistent { expected },
        }
    }

    pub(crate) fn out_of_bounds(offset: usize, len: usize, available: usize) -> Self {
        Self {
            inner: AppendErrorInner::OutOfBounds {
                offset,
                len,
                available,
            },
        }
    }

    pub fn kind(&self) -> AppendErrorKind {
        match &self.inner {
            AppendErrorInner::Io(_) => AppendErrorKind::Io,
            AppendErrorInner::Inconsistent { .. } => AppendErrorKind::Inconsistent,
            AppendErrorInner::OutOfBounds { .. } => AppendErrorKind::OutOfBounds,
        }
    }

    /// The error the sink reported, if this is an I/O failure.
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match &self.inner {
            AppendErrorInner::Io(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_io_error(self) -> Option<std::io::Error> {
        match self.inner {
            AppendErrorInner::Io(e) => Some(e),
            _ => None,
        }
    }
}
impl From<std::io::Error> for AppendError {
    fn from(value: std::io::Error) -> Self {
        Self {
            inner: AppendErrorInner::Io(value),
        }
    }
}
impl From<std::fmt::Error> for AppendError {
    fn from(value: std::fmt::Error) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, value).into()
    }
}
impl Display for AppendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}
impl std::error::Error for AppendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.inner {
            AppendErrorInner::Io(e) => e.source(),
            _ => None,
        }
    }
}
