use std::cmp::Ordering;
use syn::parse::{Parse, ParseStream};
use syn::{Error, Field, LitStr};

/// The order fields are appended in.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub enum FieldOrder {
    Alphabetical,
    #[default]
    AsSpecified,
}

impl FieldOrder {
    pub fn do_sort(&self) -> bool {
        matches!(self, Self::Alphabetical)
    }

    /// Unnamed fields compare equal, so a stable sort keeps them in place.
    pub fn cmp(&self, a: &Field, b: &Field) -> Ordering {
        match self {
            Self::AsSpecified => Ordering::Equal,
            Self::Alphabetical => a.ident.cmp(&b.ident),
        }
    }
}

impl Parse for FieldOrder {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let str: LitStr = input.parse()?;
        Ok(match str.value().to_lowercase().as_str() {
            "alphabetical" => Self::Alphabetical,
            "as_specified" => Self::AsSpecified,
            _ => {
                return Err(Error::new_spanned(
                    str,
                    "invalid field order - must be either 'alphabetical' or 'as_specified'",
                ))
            }
        })
    }
}
