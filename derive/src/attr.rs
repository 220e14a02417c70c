pub mod field_order;

pub use crate::attr::field_order::FieldOrder;
use crate::util::{parse_predicate, WherePredicates};
use proc_macro2::Span;
use quote::ToTokens;
use syn::spanned::Spanned;
use syn::{Attribute, Data, Error, LitStr};

const ATTR_NAME: &str = "append_to";

#[derive(Default)]
pub struct AppendAttr<'a> {
    pub separator: Option<LitStr>,
    pub prefix: Option<LitStr>,
    pub suffix: Option<LitStr>,
    pub field_order: Option<FieldOrder>,
    pub bound: Option<WherePredicates>,
    pub rename: Option<LitStr>,
    pub skip: bool,
    pub attr: Option<&'a Attribute>,
}

impl AppendAttr<'_> {
    pub fn span(&self) -> Span {
        self.attr.map_or_else(Span::call_site, Attribute::span)
    }
}

/// Which keys are accepted in a given position.
#[derive(Copy, Clone, Default)]
pub struct AppendAttrFields {
    separator: bool,
    affixes: bool,
    field_order: bool,
    bound: bool,
    rename: bool,
    skip: bool,
}

impl AppendAttrFields {
    pub fn container() -> Self {
        Self {
            separator: true,
            affixes: true,
            field_order: true,
            bound: true,
            ..Self::default()
        }
    }
    pub fn field() -> Self {
        Self {
            skip: true,
            ..Self::default()
        }
    }
    pub fn enum_variant() -> Self {
        Self {
            separator: true,
            rename: true,
            ..Self::default()
        }
    }
}

pub fn parse_append_attr(attr: &Attribute, fields: AppendAttrFields) -> Result<AppendAttr, Error> {
    let mut parsed = AppendAttr {
        attr: Some(attr),
        ..AppendAttr::default()
    };
    attr.parse_nested_meta(|meta| match &meta.path {
        path if fields.separator && parsed.separator.is_none() && path.is_ident("separator") => {
            parsed.separator = Some(meta.value()?.parse()?);
            Ok(())
        }
        path if fields.affixes && parsed.prefix.is_none() && path.is_ident("prefix") => {
            parsed.prefix = Some(meta.value()?.parse()?);
            Ok(())
        }
        path if fields.affixes && parsed.suffix.is_none() && path.is_ident("suffix") => {
            parsed.suffix = Some(meta.value()?.parse()?);
            Ok(())
        }
        path if fields.field_order && parsed.field_order.is_none() && path.is_ident("field_order") => {
            parsed.field_order = Some(meta.value()?.parse()?);
            Ok(())
        }
        path if fields.bound && parsed.bound.is_none() && path.is_ident("bound") => {
            let str: LitStr = meta.value()?.parse()?;
            parsed.bound = Some(parse_predicate(&str)?);
            Ok(())
        }
        path if fields.rename && parsed.rename.is_none() && path.is_ident("rename") => {
            parsed.rename = Some(meta.value()?.parse()?);
            Ok(())
        }
        path if fields.skip && !parsed.skip && path.is_ident("skip") => {
            parsed.skip = true;
            Ok(())
        }
        other => Err(meta.error(format_args!(
            "unexpected or duplicate attribute '{}'",
            other.to_token_stream()
        ))),
    })?;
    Ok(parsed)
}

pub fn find_and_parse_append_attr_auto<'a>(
    attrs: &'a [Attribute],
    type_data: &'_ Data,
) -> Result<AppendAttr<'a>, Error> {
    match type_data {
        Data::Struct(_) | Data::Enum(_) => {
            find_and_parse_append_attr(attrs, AppendAttrFields::container())
        }
        Data::Union(_) => Err(Error::new(
            Span::call_site(),
            "cannot derive AppendTo for types other than structs and enums",
        )),
    }
}

pub fn find_and_parse_append_attr(
    attrs: &[Attribute],
    fields: AppendAttrFields,
) -> Result<AppendAttr, Error> {
    let mut found = attrs.iter().filter(|v| v.path().is_ident(ATTR_NAME));
    let first = found.next();
    if let Some(extra) = found.next() {
        return Err(Error::new(extra.span(), "more than one append_to attribute"));
    }
    first
        .map(|v| parse_append_attr(v, fields))
        .unwrap_or_else(|| Ok(AppendAttr::default()))
}
