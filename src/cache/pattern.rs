//! Key Pattern Module
//!
//! Glob-style key matching for bulk invalidation. `*` matches any run of
//! characters (including none); everything else matches literally, and the
//! pattern must cover the whole key.

/// The pattern that selects every key.
pub const MATCH_ALL: &str = "*";

/// Returns true if `key` matches `pattern` from start to end.
///
/// # Examples
/// ```
/// use content_cache::cache::pattern_matches;
///
/// assert!(pattern_matches("products-*", "products-{\"page\":2}"));
/// assert!(pattern_matches("*-settings", "site-settings"));
/// assert!(!pattern_matches("products-*", "site-settings"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == key;
    }

    let segments: Vec<&str> = pattern.split('*').collect();
    let head = segments[0];
    let tail = segments[segments.len() - 1];

    if key.len() < head.len() + tail.len() || !key.starts_with(head) || !key.ends_with(tail) {
        return false;
    }

    // Inner segments must appear in order between the anchored ends
    let mut window = &key[head.len()..key.len() - tail.len()];
    for segment in &segments[1..segments.len() - 1] {
        match window.find(segment) {
            Some(idx) => window = &window[idx + segment.len()..],
            None => return false,
        }
    }

    true
}
