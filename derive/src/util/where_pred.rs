use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::{parse_quote, Generics, LitStr, Token, WhereClause, WherePredicate};

pub type WherePredicates = Punctuated<WherePredicate, Token![,]>;

pub fn parse_predicate(str: &LitStr) -> syn::Result<WherePredicates> {
    str.parse_with(WherePredicates::parse_terminated)
}

pub fn create_where_clause(
    bounds: &Option<WherePredicates>,
    required_traits: impl ToTokens,
    generics: &Generics,
) -> Option<WhereClause> {
    let custom_bounds: Vec<WherePredicate> = match bounds {
        Some(bounds) => bounds.iter().cloned().collect(),
        None => generate_bounds(required_traits.to_token_stream(), generics),
    };

    let mut clause = generics.where_clause.clone();
    if custom_bounds.is_empty() {
        return clause;
    }
    if let Some(clause) = &mut clause {
        clause.predicates.extend(custom_bounds);
    } else {
        clause = Some(parse_quote!(where #(#custom_bounds),*));
    }
    clause
}

fn generate_bounds(required_traits: TokenStream, generics: &Generics) -> Vec<WherePredicate> {
    generics
        .type_params()
        .map(|generic| {
            let name = &generic.ident;
            parse_quote!(#name: #required_traits)
        })
        .collect()
}
