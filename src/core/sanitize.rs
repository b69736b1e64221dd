// src/core/sanitize.rs

/// Decode the handful of entities that show up in attribute values.
/// `&amp;` goes last so `&amp;lt;` stays `&lt;`.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// `/alice` → `alice`. Drops exactly one leading char, whatever it is.
pub fn strip_first_char(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next();
    chars.as_str()
}
