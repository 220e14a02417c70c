use impl_trait_for_tuples::impl_for_tuples;

use crate::{append::AppendResult, AppendTo, Appendable};

impl AppendTo for () {
    fn append_to(&self, _buff: &mut dyn Appendable) -> AppendResult<()> {
        Ok(())
    }
}

#[impl_for_tuples(1, 8)]
#[tuple_types_custom_trait_bound(AppendTo)]
impl AppendTo for Tuple {
    fn append_to(&self, buff: &mut dyn Appendable) -> AppendResult<()> {
        for_tuples!(#(self.Tuple.append_to(buff)?;)*);
        Ok(())
    }
}
