use syn::{Attribute, Expr, ExprLit, Fields, ItemStruct, Lit, Meta, MetaNameValue};

/// `///` lines joined into one paragraph.
pub fn doc_text(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(MetaNameValue {
                value: Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }),
                ..
            }) => Some(lit.value().trim().to_string()),
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();

    (!lines.is_empty()).then(|| lines.join(" "))
}

/// Documented fields under their serialized names.
pub fn field_docs(item: &ItemStruct) -> Vec<(String, String)> {
    let Fields::Named(fields) = &item.fields else {
        return Vec::new();
    };

    fields
        .named
        .iter()
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            let name = ident.to_string();
            let name = name.strip_prefix("r#").unwrap_or(&name).to_string();
            Some((name, doc_text(&field.attrs)?))
        })
        .collect()
}
