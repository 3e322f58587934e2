// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde_json::Value;

/// Normalise raw settings JSON before deserializing.
pub(super) fn migrate_on_load(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            // A bare top-level `api_key` is shorthand for `provider.api_key`.
            if let Some(api_key) = map.remove("api_key") {
                let provider = map
                    .entry("provider")
                    .or_insert_with(|| Value::Object(Default::default()));
                if let Value::Object(provider) = provider {
                    provider.entry("api_key").or_insert(api_key);
                }
            }
            Value::Object(map)
        }
        other => other,
    }
}

/// Deep-merge two JSON values.
/// `base` is existing file content, `overlay` is serialized current struct.
/// Overlay values take priority.
pub(super) fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = if let Some(base_val) = base_map.remove(&key) {
                    deep_merge(base_val, overlay_val)
                } else {
                    overlay_val
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_base, overlay) => overlay,
    }
}
