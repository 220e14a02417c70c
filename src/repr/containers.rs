use crate::{append::AppendResult, AppendTo, Appendable, AppendableLike};

macro_rules! ref_impl {
    ($type:ty) => {
        impl<T> AppendTo for $type where T: AppendTo + ?Sized {
            fn append_to(&self, buff: &mut dyn Appendable) -> AppendResult<()> {
                self.as_ref().append_to(buff)
            }
        }
    };
}

ref_impl!(Box<T>);
ref_impl!(std::rc::Rc<T>);
ref_impl!(std::sync::Arc<T>);

impl<T> AppendTo for Option<T>
where
    T: AppendTo,
{
    fn append_to(&self, buff: &mut dyn Appendable) -> AppendResult<()> {
        AppendableLike::new(buff).append_serializable(self.as_ref().map(|v| v as &dyn AppendTo))?;
        Ok(())
    }
}
