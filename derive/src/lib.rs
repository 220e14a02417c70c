use syn::{parse_macro_input, DeriveInput};

#[macro_use]
extern crate quote;

mod attr;
mod render;
mod util;

/// Derives `appendlike::AppendTo`.
///
/// Structs append their fields in order. Enums append the variant name for
/// unit variants and the variant's fields otherwise. Every field must
/// implement `AppendTo` unless it is skipped.
///
/// Container attributes: `#[append_to(separator = "..", prefix = "..",
/// suffix = "..", field_order = "alphabetical", bound = "T: ..")]`.
/// Field attributes: `#[append_to(skip)]`.
/// Variant attributes: `#[append_to(rename = "..", separator = "..")]`.
#[proc_macro_derive(AppendTo, attributes(append_to))]
pub fn derive_append_to(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let item = parse_macro_input!(item as DeriveInput);
    match render::derive_append_to_impl(&item) {
        Ok(output) => output,
        Err(e) => e.to_compile_error(),
    }
    .into()
}
