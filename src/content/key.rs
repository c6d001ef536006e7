//! Cache key construction for content resources.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Query filters attached to a resource request, kept sorted so equal
/// filter sets always produce the same key.
pub type Filters = BTreeMap<String, String>;

/// Builds the cache key for a resource and its filters.
///
/// Unfiltered resources use their name as-is (`site-settings`). Filtered
/// ones append the filters as a JSON object (`products-{"category":"chairs"}`),
/// so `products-*` selects every filtered variant.
pub fn content_key(resource: &str, filters: &Filters) -> String {
    if filters.is_empty() {
        return resource.to_string();
    }

    let encoded: Map<String, Value> = filters
        .iter()
        .map(|(name, value)| (name.clone(), Value::String(value.clone())))
        .collect();

    format!("{}-{}", resource, Value::Object(encoded))
}

/// Glob selecting every filtered variant of `resource` and nothing else.
///
/// Filtered keys always continue with `-{`, so a sibling resource such as
/// `site-settings` is not a variant of `site`. Returns `None` when the name
/// itself contains the `*` wildcard.
pub fn variants_pattern(resource: &str) -> Option<String> {
    if resource.contains('*') {
        return None;
    }
    Some(format!("{}-{{*", resource))
}
