//! Derive macros for the `Encode` and `Decode` traits of
//! `wirepack_serialize`.
//!
//! Structs encode their fields in declaration order with no framing. Enums
//! encode a `u32` variant index (declaration order, starting at zero)
//! followed by the fields of that variant.
//!
//! ```ignore
//! use wirepack_serialize::{Decode, Encode};
//!
//! #[derive(Encode, Decode)]
//! enum Message {
//!     Quit,
//!     Move { x: i32, y: i32 },
//!     Write(String),
//! }
//! ```
//!
//! # Field Attributes
//!
//! `#[serialize(skip)]` leaves a field out of the encoding; decoding fills it
//! with `Default::default()`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DataEnum, DataStruct, DeriveInput, Field, Fields, Index,
    parse_macro_input,
};

/// Checks if a field has the `#[serialize(skip)]` attribute.
///
/// Malformed attributes are reported by [`check_field_attributes`] first.
fn should_skip(field: &Field) -> bool {
    field.attrs.iter().any(|attr| {
        if !attr.path().is_ident("serialize") {
            return false;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                Ok(())
            } else {
                Err(meta.error("unknown serialize attribute"))
            }
        })
        .is_ok()
    })
}

/// Rejects unknown keys inside `#[serialize(...)]` on any field.
fn check_field_attributes(input: &DeriveInput) -> syn::Result<()> {
    let fields: Vec<&Field> = match &input.data {
        Data::Struct(data_struct) => data_struct.fields.iter().collect(),
        Data::Enum(data_enum) => data_enum
            .variants
            .iter()
            .flat_map(|variant| variant.fields.iter())
            .collect(),
        Data::Union(_) => Vec::new(),
    };

    for attr in fields.iter().flat_map(|field| &field.attrs) {
        if !attr.path().is_ident("serialize") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                Ok(())
            } else {
                Err(meta.error("unknown serialize attribute, expected `skip`"))
            }
        })?;
    }

    Ok(())
}

/// Adds `bound` for every type parameter of `input` to its where clause.
fn bounded_where_clause(
    input: &DeriveInput,
    bound: &proc_macro2::TokenStream,
) -> syn::WhereClause {
    let mut where_clause = input
        .generics
        .where_clause
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(where));

    for param in input.generics.type_params() {
        let ident = &param.ident;
        where_clause.predicates.push(syn::parse_quote!(#ident: #bound));
    }

    where_clause
}

/// Checks that the enum index fits the `u32` tag.
fn check_variant_count(input: &DeriveInput, data_enum: &DataEnum) -> syn::Result<()> {
    if u32::try_from(data_enum.variants.len()).is_err() {
        return Err(syn::Error::new_spanned(
            input,
            "enums with more than u32::MAX variants are not supported",
        ));
    }
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
const fn variant_tag(idx: usize) -> u32 { idx as u32 }

/// Derive macro for `Encode`.
///
/// - For structs: all non-skipped fields are encoded in declaration order
/// - For enums: the variant index is encoded first (as `u32`), followed by
///   any variant data
#[proc_macro_derive(Encode, attributes(serialize))]
pub fn derive_encode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if let Err(err) = check_field_attributes(&input) {
        return err.to_compile_error().into();
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();
    let where_clause =
        bounded_where_clause(&input, &quote!(::wirepack_serialize::Encode));

    let encode_impl = match &input.data {
        Data::Struct(data_struct) => impl_encode_struct(data_struct),
        Data::Enum(data_enum) => {
            if let Err(err) = check_variant_count(&input, data_enum) {
                return err.to_compile_error().into();
            }
            impl_encode_enum(data_enum)
        }
        Data::Union(_) => {
            return syn::Error::new_spanned(
                &input,
                "Encode cannot be derived for unions",
            )
            .to_compile_error()
            .into();
        }
    };

    let expanded = quote! {
        #[allow(clippy::trait_duplication_in_bounds)]
        impl #impl_generics ::wirepack_serialize::Encode for #name #ty_generics #where_clause {
            fn encode<__E: ::wirepack_serialize::Encoder + ?Sized>(
                &self,
                encoder: &mut __E,
            ) -> ::core::result::Result<(), ::wirepack_serialize::EncodeError> {
                #encode_impl
            }
        }
    };

    TokenStream::from(expanded)
}

fn impl_encode_struct(data_struct: &DataStruct) -> proc_macro2::TokenStream {
    let field_encodes: Vec<_> = match &data_struct.fields {
        Fields::Named(fields) => fields
            .named
            .iter()
            .filter(|field| !should_skip(field))
            .map(|field| {
                let field_name = &field.ident;
                quote! {
                    ::wirepack_serialize::Encode::encode(&self.#field_name, encoder)?;
                }
            })
            .collect(),
        Fields::Unnamed(fields) => fields
            .unnamed
            .iter()
            .enumerate()
            .filter(|(_, field)| !should_skip(field))
            .map(|(i, _)| {
                let index = Index::from(i);
                quote! {
                    ::wirepack_serialize::Encode::encode(&self.#index, encoder)?;
                }
            })
            .collect(),
        Fields::Unit => Vec::new(),
    };

    quote! {
        let _ = &encoder;
        #(#field_encodes)*
        ::core::result::Result::Ok(())
    }
}

fn impl_encode_enum(data_enum: &DataEnum) -> proc_macro2::TokenStream {
    let variant_matches =
        data_enum.variants.iter().enumerate().map(|(idx, variant)| {
            let variant_name = &variant.ident;
            let tag = variant_tag(idx);

            match &variant.fields {
                Fields::Named(fields) => {
                    let field_names: Vec<_> = fields
                        .named
                        .iter()
                        .map(|f| (&f.ident, should_skip(f)))
                        .collect();

                    let pattern_bindings = field_names.iter().map(|(name, skip)| {
                        if *skip {
                            quote! { #name: _ }
                        } else {
                            quote! { #name }
                        }
                    });

                    let field_encodes =
                        field_names.iter().filter(|(_, skip)| !skip).map(
                            |(field_name, _)| {
                                quote! {
                                    ::wirepack_serialize::Encode::encode(#field_name, encoder)?;
                                }
                            },
                        );

                    quote! {
                        Self::#variant_name { #(#pattern_bindings),* } => {
                            ::wirepack_serialize::Encoder::emit_u32(encoder, #tag)?;
                            #(#field_encodes)*
                        }
                    }
                }
                Fields::Unnamed(fields) => {
                    let field_data: Vec<_> = fields
                        .unnamed
                        .iter()
                        .enumerate()
                        .map(|(i, f)| {
                            let binding = syn::Ident::new(
                                &format!("field_{i}"),
                                proc_macro2::Span::call_site(),
                            );
                            (binding, should_skip(f))
                        })
                        .collect();

                    let pattern_bindings = field_data.iter().map(|(binding, skip)| {
                        if *skip {
                            quote! { _ }
                        } else {
                            quote! { #binding }
                        }
                    });

                    let field_encodes =
                        field_data.iter().filter(|(_, skip)| !skip).map(
                            |(binding, _)| {
                                quote! {
                                    ::wirepack_serialize::Encode::encode(#binding, encoder)?;
                                }
                            },
                        );

                    quote! {
                        Self::#variant_name(#(#pattern_bindings),*) => {
                            ::wirepack_serialize::Encoder::emit_u32(encoder, #tag)?;
                            #(#field_encodes)*
                        }
                    }
                }
                Fields::Unit => {
                    quote! {
                        Self::#variant_name => {
                            ::wirepack_serialize::Encoder::emit_u32(encoder, #tag)?;
                        }
                    }
                }
            }
        });

    quote! {
        match self {
            #(#variant_matches)*
        }
        ::core::result::Result::Ok(())
    }
}

/// Derive macro for `Decode`.
///
/// - For structs: all fields are decoded in declaration order (skipped fields
///   use `Default::default()`)
/// - For enums: the `u32` variant index is decoded first, then the variant
///   data; an index past the last variant is rejected with
///   `DecodeError::InvalidVariant`
#[proc_macro_derive(Decode, attributes(serialize))]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if let Err(err) = check_field_attributes(&input) {
        return err.to_compile_error().into();
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();
    let where_clause =
        bounded_where_clause(&input, &quote!(::wirepack_serialize::Decode));

    let decode_impl = match &input.data {
        Data::Struct(data_struct) => impl_decode_struct(data_struct),
        Data::Enum(data_enum) => {
            if let Err(err) = check_variant_count(&input, data_enum) {
                return err.to_compile_error().into();
            }
            impl_decode_enum(name, data_enum)
        }
        Data::Union(_) => {
            return syn::Error::new_spanned(
                &input,
                "Decode cannot be derived for unions",
            )
            .to_compile_error()
            .into();
        }
    };

    let expanded = quote! {
        #[allow(clippy::trait_duplication_in_bounds)]
        impl #impl_generics ::wirepack_serialize::Decode for #name #ty_generics #where_clause {
            fn decode<__D: ::wirepack_serialize::Decoder + ?Sized>(
                decoder: &mut __D,
            ) -> ::core::result::Result<Self, ::wirepack_serialize::DecodeError> {
                #decode_impl
            }
        }
    };

    TokenStream::from(expanded)
}

fn decode_field(field: &Field) -> proc_macro2::TokenStream {
    let field_type = &field.ty;

    if should_skip(field) {
        quote! { <#field_type as ::core::default::Default>::default() }
    } else {
        quote! { <#field_type as ::wirepack_serialize::Decode>::decode(decoder)? }
    }
}

fn construct(fields: &Fields) -> proc_macro2::TokenStream {
    match fields {
        Fields::Named(fields) => {
            let field_decodes = fields.named.iter().map(|field| {
                let field_name = &field.ident;
                let value = decode_field(field);
                quote! { #field_name: #value, }
            });

            quote! { { #(#field_decodes)* } }
        }
        Fields::Unnamed(fields) => {
            let field_decodes = fields.unnamed.iter().map(decode_field);

            quote! { ( #(#field_decodes),* ) }
        }
        Fields::Unit => quote! {},
    }
}

fn impl_decode_struct(data_struct: &DataStruct) -> proc_macro2::TokenStream {
    let body = construct(&data_struct.fields);

    quote! {
        let _ = &decoder;
        ::core::result::Result::Ok(Self #body)
    }
}

fn impl_decode_enum(
    name: &syn::Ident,
    data_enum: &DataEnum,
) -> proc_macro2::TokenStream {
    let variant_count = data_enum.variants.len();
    let variant_matches =
        data_enum.variants.iter().enumerate().map(|(idx, variant)| {
            let variant_name = &variant.ident;
            let tag = variant_tag(idx);
            let body = construct(&variant.fields);

            quote! {
                #tag => ::core::result::Result::Ok(Self::#variant_name #body),
            }
        });

    let name_str = name.to_string();

    quote! {
        let variant_idx = ::wirepack_serialize::Decoder::read_u32(decoder)?;
        match variant_idx {
            #(#variant_matches)*
            _ => ::core::result::Result::Err(
                ::wirepack_serialize::DecodeError::InvalidVariant {
                    ty: #name_str,
                    index: variant_idx,
                    count: #variant_count,
                },
            ),
        }
    }
}

#[cfg(test)]
mod test;
