//! Deep merge for layered configuration mappings.
//!
//! Implements key-by-key merging where later layers override earlier ones.
//! Arrays are replaced entirely, not concatenated.

use serde_json::{Map, Value};

/// Deep merge two values, with `overlay` taking precedence over `base`.
///
/// - Objects are merged recursively: keys in overlay override keys in base
/// - Arrays, strings, numbers, booleans, nulls are replaced entirely
///
/// The merge recurses only while both sides are objects; in every other
/// pairing the overlay value wins whole, so an overlay can demote a nested
/// mapping to a scalar (or a list) and vice versa.
///
/// # Example
/// ```
/// use serde_json::json;
/// use confstack::deep_merge;
///
/// let base = json!({
///     "service": { "timeout": 10, "endpoint": "http://localhost" },
///     "regions": ["us", "eu"]
/// });
/// let overlay = json!({
///     "service": { "timeout": 30 },
///     "regions": ["ap"]
/// });
/// let merged = deep_merge(base, overlay);
/// assert_eq!(merged["service"]["timeout"], 30);
/// assert_eq!(merged["service"]["endpoint"], "http://localhost");
/// assert_eq!(merged["regions"], json!(["ap"]));
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        // Both are objects: merge recursively
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged_value = if let Some(base_value) = base_map.remove(&key) {
                    deep_merge(base_value, overlay_value)
                } else {
                    overlay_value
                };
                base_map.insert(key, merged_value);
            }
            Value::Object(base_map)
        }
        // Any other case: overlay replaces base entirely
        (_, overlay) => overlay,
    }
}

/// Merge multiple values in order, with later values taking precedence.
///
/// Folds `deep_merge` over the sequence starting from the empty mapping, so
/// precedence is strictly left-to-right at every nesting depth.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values
        .into_iter()
        .fold(Value::Object(Map::new()), deep_merge)
}

/// Backfill profile entries from a shared defaults section.
///
/// Given a merged mapping holding a defaults section under `defaults_key` and
/// a mapping of named profiles under `profiles_key`, copy every top-level
/// defaults entry into each profile that does not set it. The fill is
/// shallow: a profile that sets a key keeps its value untouched, nested or
/// not. A missing or null profiles section leaves the mapping unchanged.
pub fn backfill_profiles(mut value: Value, defaults_key: &str, profiles_key: &str) -> Value {
    if let Value::Object(root) = &mut value
        && let Some(Value::Object(defaults)) = root.get(defaults_key).cloned()
        && let Some(Value::Object(profiles)) = root.get_mut(profiles_key)
    {
        for profile in profiles.values_mut() {
            if let Value::Object(entries) = profile {
                for (key, default_value) in &defaults {
                    entries
                        .entry(key.clone())
                        .or_insert_with(|| default_value.clone());
                }
            }
        }
    }

    value
}
