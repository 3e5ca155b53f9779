// #[derive(Record)] implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, GenericArgument, PathArguments, Type};

use crate::{get_attribute, parse_attribute_flag, parse_attribute_string};

/// How a nested field is wrapped.
enum Shape {
    Plain,
    Option,
    Vec,
}

pub fn expand_derive(input: DeriveInput) -> Result<TokenStream, Error> {
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    &input,
                    "#[derive(Record)] requires named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input,
                "#[derive(Record)] only works on structs",
            ))
        }
    };

    let mut arms = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let mut member = ident.to_string();
        let mut nested = false;

        if let Some(attr) = get_attribute(&field.attrs, "record") {
            if parse_attribute_flag(attr, "skip")? {
                continue;
            }
            nested = parse_attribute_flag(attr, "nested")?;
            if let Some(rename) = parse_attribute_string(attr, "rename")? {
                member = rename;
            }
        }

        let value = if nested {
            nested_value(ident, &field.ty)
        } else {
            quote! {
                ::specforge::__internal::Value::from(::core::clone::Clone::clone(&self.#ident))
            }
        };
        arms.push(quote! { #member => ::core::option::Option::Some(#value), });
    }

    let call_impl = match get_attribute(&input.attrs, "record") {
        Some(attr) => match parse_attribute_string(attr, "call_with")? {
            Some(path) => {
                let path: syn::ExprPath = syn::parse_str(&path)
                    .map_err(|e| Error::new_spanned(attr, format!("invalid call_with path: {e}")))?;
                quote! {
                    fn call(
                        &self,
                        method: &str,
                        args: &[::specforge::__internal::Value],
                    ) -> ::core::option::Option<::specforge::__internal::Value> {
                        #path(self, method, args)
                    }
                }
            }
            None => TokenStream::new(),
        },
        None => TokenStream::new(),
    };

    let expanded = quote! {
        impl #impl_generics ::specforge::__internal::Record for #name #ty_generics #where_clause {
            fn member(&self, name: &str) -> ::core::option::Option<::specforge::__internal::Value> {
                match name {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #call_impl
        }
    };

    Ok(expanded)
}

fn nested_value(ident: &syn::Ident, ty: &Type) -> TokenStream {
    match shape_of(ty) {
        Shape::Plain => quote! {
            ::specforge::__internal::Value::record(::core::clone::Clone::clone(&self.#ident))
        },
        Shape::Option => quote! {
            match &self.#ident {
                ::core::option::Option::Some(v) => {
                    ::specforge::__internal::Value::record(::core::clone::Clone::clone(v))
                }
                ::core::option::Option::None => ::specforge::__internal::Value::None,
            }
        },
        Shape::Vec => quote! {
            ::specforge::__internal::Value::List(
                self.#ident
                    .iter()
                    .map(|v| ::specforge::__internal::Value::record(::core::clone::Clone::clone(v)))
                    .collect(),
            )
        },
    }
}

fn shape_of(ty: &Type) -> Shape {
    let Type::Path(type_path) = ty else {
        return Shape::Plain;
    };
    let Some(last) = type_path.path.segments.last() else {
        return Shape::Plain;
    };
    let has_one_type_arg = match &last.arguments {
        PathArguments::AngleBracketed(args) => {
            args.args.len() == 1 && matches!(args.args[0], GenericArgument::Type(_))
        }
        _ => false,
    };
    if !has_one_type_arg {
        return Shape::Plain;
    }
    if last.ident == "Option" {
        Shape::Option
    } else if last.ident == "Vec" {
        Shape::Vec
    } else {
        Shape::Plain
    }
}
