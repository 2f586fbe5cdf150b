/// Build a greeting for `name`, falling back to `"Guest"` when the name is
/// missing or empty.
///
/// # Examples
///
/// ```
/// use grouper_core::formatting::generate_greeting;
///
/// assert_eq!(generate_greeting(Some("Alice")), "Hello, Alice!");
/// assert_eq!(generate_greeting(Some("")), "Hello, Guest!");
/// assert_eq!(generate_greeting(None), "Hello, Guest!");
/// ```
pub fn generate_greeting(name: Option<&str>) -> String {
    match name {
        Some(n) if !n.is_empty() => format!("Hello, {}!", n),
        _ => "Hello, Guest!".to_string(),
    }
}

/// Return at most the first `max_chars` characters of `line`.
///
/// Cuts on a character boundary, so multi-byte text never panics.
///
/// # Examples
///
/// ```
/// use grouper_core::formatting::truncate_preview;
///
/// assert_eq!(truncate_preview("abcdef", 3), "abc");
/// assert_eq!(truncate_preview("ab", 3), "ab");
/// assert_eq!(truncate_preview("héllo", 2), "hé");
/// ```
pub fn truncate_preview(line: &str, max_chars: usize) -> &str {
    match line.char_indices().nth(max_chars) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
