mod field_name;
mod where_pred;

pub use field_name::{process_fields, FieldName};
pub use where_pred::{create_where_clause, parse_predicate, WherePredicates};

use syn::{parse_quote, Path};

pub fn trait_path() -> Path {
    parse_quote!(::appendlike::AppendTo)
}

pub trait SynErrorExt {
    fn maybe_combined(self, other: Option<syn::Error>) -> syn::Error;
}
impl SynErrorExt for syn::Error {
    fn maybe_combined(mut self, other: Option<syn::Error>) -> syn::Error {
        if let Some(other) = other {
            self.combine(other);
        }
        self
    }
}
