//! Recursive JSON merge used to reconcile stored payloads with defaults.

use serde_json::Value;

/// Merges `overlay` into `base` in place.
///
/// Objects merge key by key, recursively. Any other overlay value (scalar,
/// array, or an object landing on a non-object) replaces the base value
/// wholesale. Keys absent from `overlay` are left untouched, so `base` acts as
/// the default for everything the overlay does not mention.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
