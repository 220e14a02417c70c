use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, LitStr, Variant};

use crate::attr::{
    find_and_parse_append_attr, find_and_parse_append_attr_auto, AppendAttrFields, FieldOrder,
};
use crate::util::{self, create_where_clause, process_fields, FieldName, SynErrorExt};

pub fn derive_append_to_impl(input: &DeriveInput) -> Result<TokenStream, Error> {
    let root_attr = find_and_parse_append_attr_auto(&input.attrs, &input.data)?;

    let ident = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();
    let where_clause = create_where_clause(&root_attr.bound, util::trait_path(), &input.generics);
    let field_order = root_attr.field_order.unwrap_or_default();

    let body = match &input.data {
        Data::Struct(model) => {
            let accessor = |name: &FieldName| quote!(&self.#name);
            render_fields(&model.fields, root_attr.separator.as_ref(), field_order, accessor)?
        }
        Data::Enum(model) if model.variants.is_empty() => quote!(match *self {}),
        Data::Enum(model) => {
            let mut error: Option<Error> = None;
            let mut cases = Vec::new();
            for variant in model.variants.iter() {
                match render_variant(variant, root_attr.separator.as_ref(), field_order) {
                    Ok(case) => cases.push(case),
                    Err(e) => error = Some(e.maybe_combined(error)),
                }
            }
            if let Some(error) = error {
                return Err(error);
            }
            quote!(match self { #(#cases)* })
        }
        Data::Union(_) => {
            return Err(Error::new_spanned(
                input,
                "unsupported type - you can only derive AppendTo for structs and enums",
            ))
        }
    };

    let prefix = root_attr.prefix.as_ref().map(|prefix| quote!(buff.append_str(#prefix)?;));
    let suffix = root_attr.suffix.as_ref().map(|suffix| quote!(buff.append_str(#suffix)?;));

    Ok(quote! {
        const _: () = {
            #[automatically_derived]
            impl #impl_generics ::appendlike::AppendTo for #ident #ty_generics #where_clause {
                fn append_to(&self, buff: &mut dyn ::appendlike::Appendable) -> ::appendlike::AppendResult<()> {
                    #prefix
                    #body
                    #suffix
                    Ok(())
                }
            }
        };
    })
}

fn render_variant(
    variant: &Variant,
    separator: Option<&LitStr>,
    field_order: FieldOrder,
) -> Result<TokenStream, Error> {
    let attr = find_and_parse_append_attr(&variant.attrs, AppendAttrFields::enum_variant())?;
    let variant_ident = &variant.ident;

    if let Fields::Unit = variant.fields {
        let name = attr
            .rename
            .clone()
            .unwrap_or_else(|| LitStr::new(&variant_ident.to_string(), variant_ident.span()));
        return Ok(quote!(Self::#variant_ident => {
            buff.append_str(#name)?;
        }));
    }
    if attr.rename.is_some() {
        return Err(Error::new(
            attr.span(),
            "rename only applies to unit variants",
        ));
    }

    let separator = attr.separator.as_ref().or(separator);
    let accessor = |name: &FieldName| name.output_ident();
    let rendered = render_fields(&variant.fields, separator, field_order, accessor)?;
    let pattern = create_pattern_match(&variant.fields)?;

    Ok(quote!(Self::#variant_ident #pattern => {
        #rendered
    }))
}

/// Binds every rendered field by reference; skipped fields are ignored.
fn create_pattern_match(fields: &Fields) -> Result<TokenStream, Error> {
    let processed = match process_fields(fields, FieldOrder::AsSpecified) {
        Some(processed) => processed,
        None => return Ok(quote!()),
    };

    let mut bindings = Vec::new();
    for (name, field) in processed.iter() {
        let field_attr = find_and_parse_append_attr(&field.attrs, AppendAttrFields::field())?;
        let output = name.output_ident();
        bindings.push(match (fields, field_attr.skip) {
            (Fields::Named(_), true) => continue,
            (Fields::Named(_), false) => quote!(#name: #output),
            (_, true) => quote!(_),
            (_, false) => output.into_token_stream(),
        });
    }

    Ok(match fields {
        Fields::Named(_) => quote!({ #(#bindings,)* .. }),
        _ => quote!((#(#bindings),*)),
    })
}

fn render_fields<T>(
    fields: &Fields,
    separator: Option<&LitStr>,
    field_order: FieldOrder,
    accessor: impl Fn(&FieldName) -> T,
) -> Result<TokenStream, Error>
where
    T: ToTokens,
{
    let processed_fields = match process_fields(fields, field_order) {
        Some(vec) => vec,
        None => return Ok(quote!()),
    };

    let mut rendered = Vec::new();
    for (field_name, field) in processed_fields.iter() {
        let field_attr = find_and_parse_append_attr(&field.attrs, AppendAttrFields::field())?;
        if field_attr.skip {
            continue;
        }
        if let (Some(separator), false) = (separator, rendered.is_empty()) {
            rendered.push(quote!(buff.append_str(#separator)?;));
        }
        let value = accessor(field_name);
        rendered.push(quote_spanned! { field.span() =>
            ::appendlike::AppendTo::append_to(#value, buff)?;
        });
    }

    Ok(quote!(#(#rendered)*))
}
