use crate::{append::AppendResult, AppendTo, Appendable, AppendableLike};

macro_rules! declare_impl {
    ($typename:ty) => {
        impl AppendTo for $typename {
            fn append_to(&self, buff: &mut dyn Appendable) -> AppendResult<()> {
                AppendableLike::new(buff).append_object(self)?;
                Ok(())
            }
        }
    };
}
macro_rules! declare_impls {
    () => {};
    ($typename:ty; $($remaining:tt)*) => {
        declare_impl!($typename);
        declare_impls!($($remaining)*);
    };
}
declare_impls!(u8; i8; u16; i16; u32; i32; u64; i64; u128; i128; usize; isize;);
declare_impls!(f32; f64; bool;);

impl AppendTo for char {
    fn append_to(&self, buff: &mut dyn Appendable) -> AppendResult<()> {
        buff.append_char(*self)
    }
}

impl AppendTo for str {
    fn append_to(&self, buff: &mut dyn Appendable) -> AppendResult<()> {
        AppendableLike::new(buff).append_str(self)?;
        Ok(())
    }
}

impl AppendTo for String {
    fn append_to(&self, buff: &mut dyn Appendable) -> AppendResult<()> {
        AppendableLike::new(buff).append_buffer(self)?;
        Ok(())
    }
}
