//! Pure identifier helpers shared by the passes.

/// Upper-case the first character, leaving the rest untouched.
///
/// ## Examples
/// ```rust
/// use refinery_core::naming::to_first_upper;
///
/// assert_eq!(to_first_upper("address"), "Address");
/// assert_eq!(to_first_upper(""), "");
/// ```
pub fn to_first_upper(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character, leaving the rest untouched.
pub fn to_first_lower(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strip a prefix compared case-insensitively (ASCII), e.g. the `I` of `IRequestAdapter`.
///
/// ## Returns
/// - The remainder when `name` starts with `prefix` and is longer than it, `None` otherwise.
pub fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    if name.len() > prefix.len() && name.is_char_boundary(prefix.len()) {
        let (head, rest) = name.split_at(prefix.len());
        if head.eq_ignore_ascii_case(prefix) {
            return Some(rest);
        }
    }
    None
}

/// Strip a suffix compared case-insensitively (ASCII).
pub fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    if name.len() >= suffix.len() {
        let split = name.len() - suffix.len();
        if name.is_char_boundary(split) && name[split..].eq_ignore_ascii_case(suffix) {
            return Some(&name[..split]);
        }
    }
    None
}

/// Join two names for a promoted nested declaration: `Parent_Child`, both parts first-upper.
///
/// ## Examples
/// ```rust
/// use refinery_core::naming::appended_name;
///
/// assert_eq!(appended_name("customer", "address"), "Customer_Address");
/// ```
pub fn appended_name(parent: &str, child: &str) -> String {
    format!("{}_{}", to_first_upper(parent), to_first_upper(child))
}
