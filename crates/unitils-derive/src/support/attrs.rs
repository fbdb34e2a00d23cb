use syn::{Attribute, LitStr, Result};

use crate::support::diag;

/// Options from `#[reflect(...)]` on a field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    pub skip: bool,
    pub rename: Option<String>,
}

/// Parse and merge every `#[reflect(...)]` attribute on a field.
pub fn field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    let mut seen = None;
    for attr in attrs {
        if !attr.path().is_ident("reflect") {
            continue;
        }
        seen = Some(attr);
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                out.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let name: LitStr = meta.value()?.parse()?;
                if name.value().is_empty() {
                    return Err(diag::error_spanned(&name, "`rename` must not be empty"));
                }
                out.rename = Some(name.value());
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `rename = \"...\"`"))
            }
        })?;
    }
    if let (true, Some(_), Some(attr)) = (out.skip, &out.rename, seen) {
        return Err(diag::error_spanned(
            attr,
            "`skip` and `rename` cannot be combined",
        ));
    }
    Ok(out)
}

/// Reject `#[reflect(...)]` where it has no meaning.
pub fn reject(attrs: &[Attribute], place: &str) -> Result<()> {
    match attrs.iter().find(|attr| attr.path().is_ident("reflect")) {
        Some(attr) => Err(diag::error_spanned(
            attr,
            format!("#[reflect] is not supported on {place}"),
        )),
        None => Ok(()),
    }
}
