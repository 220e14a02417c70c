use super::{AppendResult, AppendTo, Appendable, FastSink};

// sink impls

impl Appendable for String {
    fn append_str(&mut self, s: &str) -> AppendResult<()> {
        self.push_str(s);
        Ok(())
    }

    fn append_char(&mut self, c: char) -> AppendResult<()> {
        self.push(c);
        Ok(())
    }

    fn fast_sink(&mut self) -> Option<FastSink<'_>> {
        Some(FastSink::String(self))
    }
}

impl Appendable for Vec<u8> {
    fn append_str(&mut self, s: &str) -> AppendResult<()> {
        self.extend_from_slice(s.as_bytes());
        Ok(())
    }

    fn fast_sink(&mut self) -> Option<FastSink<'_>> {
        Some(FastSink::Bytes(self))
    }
}

impl<T> Appendable for &mut T
where
    T: Appendable + ?Sized,
{
    #[inline]
    fn append_str(&mut self, s: &str) -> AppendResult<()> {
        T::append_str(self, s)
    }

    #[inline]
    fn append_char(&mut self, c: char) -> AppendResult<()> {
        T::append_char(self, c)
    }

    #[inline]
    fn fast_sink(&mut self) -> Option<FastSink<'_>> {
        T::fast_sink(self)
    }
}

impl<T> AppendTo for &T
where
    T: AppendTo + ?Sized,
{
    fn append_to(&self, buff: &mut dyn Appendable) -> AppendResult<()> {
        T::append_to(self, buff)
    }
}
