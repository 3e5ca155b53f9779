//! Macros for SpecForge entity types.

use proc_macro::TokenStream;
use syn::parse::Parser;
use syn::{parse_macro_input, Attribute, DeriveInput, Expr, Lit, Meta};

mod record;

/// Derives `Record`, exposing each named field as a member.
///
/// Field attributes:
/// - `#[record(skip)]`: the field is not exposed
/// - `#[record(rename = "name")]`: exposed under another member name
/// - `#[record(nested)]`: the field (or `Option`/`Vec` of it) is itself a
///   `Record` and is exposed as a nested record
///
/// Struct attribute `#[record(call_with = "path")]` routes method calls to a
/// function `fn(&Self, &str, &[Value]) -> Option<Value>`.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand_derive(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn get_attribute<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

fn nested_metas(attr: &Attribute) -> syn::Result<Vec<Meta>> {
    match &attr.meta {
        Meta::List(meta_list) => {
            let parser = syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated;
            Ok(parser.parse2(meta_list.tokens.clone())?.into_iter().collect())
        }
        _ => Err(syn::Error::new_spanned(
            attr,
            "expected #[record(...)] with arguments",
        )),
    }
}

fn parse_attribute_flag(attr: &Attribute, key: &str) -> syn::Result<bool> {
    Ok(nested_metas(attr)?
        .iter()
        .any(|meta| matches!(meta, Meta::Path(path) if path.is_ident(key))))
}

fn parse_attribute_string(attr: &Attribute, key: &str) -> syn::Result<Option<String>> {
    for meta in nested_metas(attr)? {
        if let Meta::NameValue(nv) = meta {
            if nv.path.is_ident(key) {
                if let Expr::Lit(expr_lit) = &nv.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        return Ok(Some(lit_str.value()));
                    }
                }
                return Err(syn::Error::new_spanned(
                    &nv.value,
                    format!("`{key}` expects a string literal"),
                ));
            }
        }
    }
    Ok(None)
}
