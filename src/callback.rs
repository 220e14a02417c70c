/// Something that reacts to a single value.
///
/// Any `FnMut(T)` closure is a callback.
pub trait Callback<T> {
    fn invoke(&mut self, value: T);
}

impl<T, F> Callback<T> for F
where
    F: FnMut(T),
{
    #[inline]
    fn invoke(&mut self, value: T) {
        self(value)
    }
}
