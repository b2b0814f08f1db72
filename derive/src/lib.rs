#![forbid(unsafe_code)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Field, Fields, FieldsNamed, ItemStruct, Type};

/// Embeds a base-class subobject into a struct, giving it single-inheritance
/// layout and method lookup.
///
/// The macro inserts a field named `base` of the given type as the *first*
/// field, marks the struct `#[repr(C)]` (so the base subobject sits at offset
/// zero and pointers to the derived type can be reinterpreted as pointers to
/// the base), and emits `Deref`/`DerefMut` impls targeting the base type, so
/// non-shadowed methods fall through to the base implementation.
///
/// Unit structs and structs with named fields are accepted; tuple structs are
/// rejected, since the inserted field is named.
#[proc_macro_attribute]
pub fn subclass(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut item = parse_macro_input!(item as ItemStruct);
    let base = parse_macro_input!(attr as Type);

    match &mut item.fields {
        Fields::Named(fields) => {
            fields.named.insert(0, base_field(&base));
        },
        fields @ Fields::Unit => {
            let mut named: FieldsNamed = syn::parse_quote!({});
            named.named.push(base_field(&base));
            *fields = Fields::Named(named);
        },
        Fields::Unnamed(fields) => {
            return syn::Error::new_spanned(
                fields,
                "#[subclass] requires named fields or a unit struct",
            )
            .to_compile_error()
            .into();
        },
    }

    item.attrs.push(syn::parse_quote!(#[repr(C)]));

    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();

    quote!(
        #item

        impl #impl_generics ::core::ops::Deref for #name #ty_generics #where_clause {
            type Target = #base;

            #[inline]
            fn deref(&self) -> &Self::Target {
                &self.base
            }
        }

        impl #impl_generics ::core::ops::DerefMut for #name #ty_generics #where_clause {
            #[inline]
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.base
            }
        }
    )
    .into()
}

fn base_field(base: &Type) -> Field {
    let fields: FieldsNamed = syn::parse_quote!({ base: #base });
    fields
        .named
        .into_iter()
        .next()
        .unwrap_or_else(|| unreachable!("parse_quote produced exactly one field"))
}
