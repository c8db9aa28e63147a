//! Settings layer merge
//!
//! - Objects: deep-merge by key
//! - Arrays: REPLACE (last wins)
//! - Scalars: override (last wins)

use serde_json::Value;

/// Deep merge two JSON values.
///
/// Merge semantics:
/// - Objects: deep-merge by key (recursive)
/// - Arrays: REPLACE (second wins entirely)
/// - Scalars: override (second wins)
/// - Null: override (null can override any value)
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = if let Some(base_value) = base_map.remove(&key) {
                    deep_merge(base_value, overlay_value)
                } else {
                    overlay_value
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }

        // a later `load = [...]` replaces the earlier list
        (Value::Array(_), overlay @ Value::Array(_)) => overlay,

        (_, overlay) => overlay,
    }
}

/// Merge layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers.into_iter().fold(Value::Null, deep_merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_override() {
        let result = deep_merge(json!({"save": "~/.kube/config"}), json!({"save": "/tmp/out"}));
        assert_eq!(result["save"], "/tmp/out");
    }

    #[test]
    fn test_array_replace() {
        let base = json!({"load": [".", "~/.kube/config"]});
        let overlay = json!({"load": ["/etc/kube"]});
        let result = deep_merge(base, overlay);

        let load = result["load"].as_array().unwrap();
        assert_eq!(load.len(), 1);
        assert_eq!(load[0], "/etc/kube");
    }

    #[test]
    fn test_add_new_key() {
        let result = deep_merge(json!({"save": "a"}), json!({"backup": false}));

        assert_eq!(result["save"], "a");
        assert_eq!(result["backup"], false);
    }

    #[test]
    fn test_overlay_keeps_untouched_settings() {
        let base = json!({
            "load": [".", "~/.kube/config"],
            "save": "~/.kube/config",
            "exclude": [],
            "backup": true
        });
        let overlay = json!({"exclude": ["**/charts"]});
        let result = deep_merge(base, overlay);

        assert_eq!(result["exclude"], json!(["**/charts"]));
        assert_eq!(result["load"], json!([".", "~/.kube/config"]));
        assert_eq!(result["save"], "~/.kube/config");
        assert_eq!(result["backup"], true);
    }

    #[test]
    fn test_merge_layers() {
        let builtin = json!({"load": ["."], "save": "~/.kube/config", "backup": true});
        let file = json!({"save": "~/kube/merged", "backup": false});
        let cli = json!({"save": "/tmp/out"});

        let result = merge_layers(vec![builtin, file, cli]);

        assert_eq!(result["save"], "/tmp/out");
        assert_eq!(result["backup"], false);
        assert_eq!(result["load"][0], ".");
    }
}
