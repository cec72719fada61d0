mod args;
mod docs;
mod payload_schema;

use proc_macro::TokenStream;
use syn::{parse_macro_input, ItemStruct};

/// Attach a cached JSON schema and endpoint metadata to a request record.
///
/// The struct must also derive `schemars::JsonSchema` and `Deserialize`.
/// Doc comments on the struct and its fields become schema descriptions.
///
/// Arguments, all optional:
/// - `name = "..."` schema title (defaults to the struct name)
/// - `description = "..."` overrides the struct doc comment
/// - `endpoint = "/api/..."` API path; also emits an inherent `ENDPOINT` const
/// - `alias = "..."` extra lookup name, repeatable
///
/// ```ignore
/// #[derive(Serialize, Deserialize, JsonSchema)]
/// #[payload_schema(endpoint = "/api/contact", alias = "message")]
/// pub struct ContactRequest {
///     /// Reply address
///     pub email: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn payload_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = match args::PayloadArgs::parse(attr) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };
    let item = parse_macro_input!(item as ItemStruct);

    payload_schema::expand(args, item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
