use std::fmt;
use std::fmt::Write as _;
use std::io::Write;

use super::{AppendResult, Appendable};

/// Adapts any [`std::io::Write`] into a generic [`Appendable`] by writing
/// text as UTF-8 bytes.
pub struct IoAppendable<'a, Impl: Write + ?Sized>(pub &'a mut Impl);
impl<'a, Impl> Appendable for IoAppendable<'a, Impl>
where
    Impl: Write + ?Sized,
{
    fn append_str(&mut self, s: &str) -> AppendResult<()> {
        self.0.write_all(s.as_bytes())?;
        Ok(())
    }
}

/// Adapts any [`std::fmt::Write`] (a `Formatter`, for one) into a generic
/// [`Appendable`].
pub struct FmtAppendable<'a, Impl: fmt::Write + ?Sized>(pub &'a mut Impl);
impl<'a, Impl> Appendable for FmtAppendable<'a, Impl>
where
    Impl: fmt::Write + ?Sized,
{
    fn append_str(&mut self, s: &str) -> AppendResult<()> {
        self.0.write_str(s)?;
        Ok(())
    }

    fn append_char(&mut self, c: char) -> AppendResult<()> {
        self.0.write_char(c)?;
        Ok(())
    }
}
