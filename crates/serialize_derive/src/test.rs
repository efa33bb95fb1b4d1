use syn::{DeriveInput, parse_quote};

use super::{check_field_attributes, should_skip};

#[test]
fn skip_attribute_is_accepted() {
    let input: DeriveInput = parse_quote! {
        struct Cached {
            key: String,
            #[serialize(skip)]
            hits: u64,
        }
    };

    assert!(check_field_attributes(&input).is_ok());

    let syn::Data::Struct(data) = &input.data else {
        panic!("expected a struct");
    };
    let skipped: Vec<bool> = data.fields.iter().map(should_skip).collect();
    assert_eq!(skipped, [false, true]);
}

#[test]
fn unknown_struct_field_attribute_is_rejected() {
    let input: DeriveInput = parse_quote! {
        struct Cached {
            #[serialize(skp)]
            hits: u64,
        }
    };

    let err = check_field_attributes(&input).unwrap_err();
    assert!(err.to_string().contains("unknown serialize attribute"));
}

#[test]
fn unknown_variant_field_attribute_is_rejected() {
    let input: DeriveInput = parse_quote! {
        enum Message {
            Quit,
            Write(#[serialize(rename = "text")] String),
        }
    };

    assert!(check_field_attributes(&input).is_err());
}

#[test]
fn unrelated_attributes_are_ignored() {
    let input: DeriveInput = parse_quote! {
        struct Point {
            #[doc = "horizontal"]
            x: i32,
        }
    };

    assert!(check_field_attributes(&input).is_ok());
}
