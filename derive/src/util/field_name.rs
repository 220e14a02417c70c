use crate::attr::FieldOrder;
use proc_macro2::{Ident, Span, TokenStream};
use quote::ToTokens;
use syn::{Field, Fields, LitInt};

pub enum FieldName {
    Ident(Ident),
    Index(LitInt),
}
impl FieldName {
    pub fn output_ident(&self) -> Ident {
        let name = match &self {
            Self::Ident(ident) => ident.to_string(),
            Self::Index(int) => int.to_string(),
        };
        format_ident!("__field_{}", name)
    }
}
impl ToTokens for FieldName {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match &self {
            Self::Ident(ident) => ident.to_tokens(tokens),
            Self::Index(index) => index.to_tokens(tokens),
        }
    }
}

pub type ProcessedFields<'a> = Vec<(FieldName, &'a Field)>;

/// Names every field and orders them for rendering. `None` for unit fields.
pub fn process_fields(fields: &Fields, field_order: FieldOrder) -> Option<ProcessedFields<'_>> {
    let fields: Vec<_> = match fields {
        Fields::Unit => return None,
        Fields::Named(named) => named.named.iter().collect(),
        Fields::Unnamed(unnamed) => unnamed.unnamed.iter().collect(),
    };

    let mut vec: ProcessedFields = fields
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            let name = match &field.ident {
                Some(ident) => FieldName::Ident(ident.clone()),
                None => FieldName::Index(LitInt::new(i.to_string().as_str(), Span::call_site())),
            };
            (name, field)
        })
        .collect();

    if field_order.do_sort() {
        vec.sort_by(|a, b| field_order.cmp(a.1, b.1));
    }

    Some(vec)
}
