/// Unescapes a pointer component (`~1` → `/`, then `~0` → `~`).
///
/// ```
/// use levelboard_json_pointer::unescape_component;
///
/// assert_eq!(unescape_component("level~1index"), "level/index");
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, otherwise "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a pointer component (`~` → `~0`, then `/` → `~1`).
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a pointer string into its unescaped components.
///
/// The empty string is the root. Anything else is expected to start with `/`;
/// callers that accept user input should go through
/// [`parse_validated`](crate::parse_validated) instead.
///
/// ```
/// use levelboard_json_pointer::parse_json_pointer;
///
/// assert!(parse_json_pointer("").is_empty());
/// assert_eq!(
///     parse_json_pointer("/spec/data/spec/queries"),
///     vec!["spec", "data", "spec", "queries"]
/// );
/// ```
pub fn parse_json_pointer(pointer: &str) -> Vec<String> {
    match pointer.strip_prefix('/') {
        Some(rest) => rest.split('/').map(unescape_component).collect(),
        None if pointer.is_empty() => Vec::new(),
        None => pointer.split('/').map(unescape_component).collect(),
    }
}

/// Format components back into a pointer string. The root formats as `""`.
pub fn format_json_pointer(path: &[String]) -> String {
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}
