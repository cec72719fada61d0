use syn::{
    parse::Parser, punctuated::Punctuated, Expr, ExprLit, Ident, Lit, LitStr, MetaNameValue,
    Token,
};

/// Arguments of `#[payload_schema(...)]`.
#[derive(Default)]
pub struct PayloadArgs {
    pub name: Option<LitStr>,
    pub description: Option<LitStr>,
    pub endpoint: Option<LitStr>,
    pub aliases: Vec<LitStr>,
}

impl PayloadArgs {
    pub fn parse(attr: proc_macro::TokenStream) -> syn::Result<Self> {
        let mut args = PayloadArgs::default();
        if attr.is_empty() {
            return Ok(args);
        }

        let parser = Punctuated::<MetaNameValue, Token![,]>::parse_terminated;
        for pair in parser.parse(attr)? {
            let ident = pair
                .path
                .get_ident()
                .ok_or_else(|| syn::Error::new_spanned(&pair.path, "expected identifier"))?;
            let value = string_value(&pair.value)?;

            match ident.to_string().as_str() {
                "name" => set_once(&mut args.name, ident, value)?,
                "description" => set_once(&mut args.description, ident, value)?,
                "endpoint" => {
                    check_endpoint(&value)?;
                    set_once(&mut args.endpoint, ident, value)?;
                }
                "alias" => {
                    if value.value().trim().is_empty() {
                        return Err(syn::Error::new(value.span(), "alias must not be empty"));
                    }
                    args.aliases.push(value);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!(
                            "unsupported argument `{other}`; expected `name`, `description`, `endpoint` or `alias`"
                        ),
                    ));
                }
            }
        }

        Ok(args)
    }
}

fn string_value(expr: &Expr) -> syn::Result<LitStr> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) => Ok(lit.clone()),
        _ => Err(syn::Error::new_spanned(expr, "expected string literal value")),
    }
}

fn set_once(slot: &mut Option<LitStr>, ident: &Ident, value: LitStr) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new(
            ident.span(),
            format!("duplicate `{ident}` argument"),
        ));
    }
    *slot = Some(value);
    Ok(())
}

/// Endpoints are absolute paths joined onto the backend base URL.
fn check_endpoint(path: &LitStr) -> syn::Result<()> {
    let value = path.value();
    if !value.starts_with('/') || value.ends_with('/') || value.contains(char::is_whitespace) {
        return Err(syn::Error::new(
            path.span(),
            "endpoint must be an absolute path such as \"/api/contact\"",
        ));
    }
    Ok(())
}
