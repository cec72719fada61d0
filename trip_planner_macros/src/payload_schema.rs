use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, Fields, ItemStruct, LitStr};

use crate::{args::PayloadArgs, docs};

pub fn expand(args: PayloadArgs, item: ItemStruct) -> syn::Result<TokenStream> {
    if !matches!(item.fields, Fields::Named(_)) {
        return Err(syn::Error::new(
            item.struct_token.span(),
            "`#[payload_schema]` only supports structs with named fields",
        ));
    }
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new(
            item.generics.span(),
            "`#[payload_schema]` does not support generic structs",
        ));
    }

    let ident = &item.ident;
    let name = args
        .name
        .unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
    let description = optional(
        args.description
            .or_else(|| docs::doc_text(&item.attrs).map(|text| LitStr::new(&text, ident.span()))),
    );
    let endpoint = optional(args.endpoint.clone());
    let aliases = &args.aliases;
    let field_docs = docs::field_docs(&item).into_iter().map(|(field, doc)| {
        quote! { (#field, #doc) }
    });

    let endpoint_const = args.endpoint.map(|path| {
        quote! {
            impl #ident {
                #[doc = "API path this record is posted to."]
                pub const ENDPOINT: &'static str = #path;
            }
        }
    });

    Ok(quote! {
        #item

        #endpoint_const

        impl trip_planner_rs::schema::PayloadSchema for #ident {
            const META: trip_planner_rs::schema::PayloadMeta = trip_planner_rs::schema::PayloadMeta {
                name: #name,
                endpoint: #endpoint,
                aliases: &[#(#aliases),*],
                description: #description,
                field_docs: &[#(#field_docs),*],
            };

            fn schema() -> &'static trip_planner_rs::schema::SchemaHandle {
                static HANDLE: std::sync::OnceLock<trip_planner_rs::schema::SchemaHandle> =
                    std::sync::OnceLock::new();
                HANDLE.get_or_init(|| {
                    trip_planner_rs::schema::SchemaHandle::build::<Self>(
                        <Self as trip_planner_rs::schema::PayloadSchema>::META,
                    )
                })
            }
        }
    })
}

fn optional(value: Option<LitStr>) -> TokenStream {
    match value {
        Some(lit) => quote! { ::core::option::Option::Some(#lit) },
        None => quote! { ::core::option::Option::None },
    }
}
