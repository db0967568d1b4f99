//! Shared validation helpers used by all domain validators.

/// Push an error if `value` is outside `[min, max]`.
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error unless `url` starts with one of `schemes` followed by `://`
/// and a non-empty host part.
pub(crate) fn validate_url(errors: &mut Vec<String>, name: &str, url: &str, schemes: &[&str]) {
    let rest = schemes
        .iter()
        .find_map(|scheme| url.strip_prefix(scheme).and_then(|r| r.strip_prefix("://")));
    match rest {
        Some(r) if !r.is_empty() => {}
        _ => errors.push(format!(
            "{name} = \"{url}\" must be a {} URL",
            schemes.join("/")
        )),
    }
}
