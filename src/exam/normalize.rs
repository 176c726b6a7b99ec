/// Bring a course outcome code into canonical `CO<suffix>` form.
///
/// Surrounding whitespace is trimmed. A code that already starts with "co"
/// in any case gets its prefix upper-cased, anything else gets "CO"
/// prepended. Empty input stays empty so callers can discard it.
pub fn normalize_co_code(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    match trimmed.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("co") => format!("CO{}", &trimmed[2..]),
        _ => format!("CO{}", trimmed),
    }
}
