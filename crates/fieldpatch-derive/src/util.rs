use syn::{Ident, LitStr};

/// Case-folded form of a field name; matches the runtime schema lookup.
pub fn normalize(name: &str) -> String {
    if name.is_ascii() {
        name.to_ascii_lowercase()
    } else {
        name.to_lowercase()
    }
}

/// Field identifier as written, without a raw `r#` prefix.
pub fn ident_name(ident: &Ident) -> String {
    let name = ident.to_string();

    name.strip_prefix("r#").map_or_else(|| name.clone(), ToString::to_string)
}

pub fn str_lit(value: &str, ident: &Ident) -> LitStr {
    LitStr::new(value, ident.span())
}
