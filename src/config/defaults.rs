//! Built-in settings (layer 1)

use serde::{Deserialize, Serialize};

/// Default settings, used when neither the settings file nor the CLI
/// says otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Locations searched for kubeconfigs (default: working directory and
    /// `~/.kube/config`)
    pub load: Vec<String>,

    /// Where the merged kubeconfig is written (default: `~/.kube/config`)
    pub save: String,

    /// Extra glob patterns skipped while walking directories (default: none)
    pub exclude: Vec<String>,

    /// Back up an existing target before overwriting (default: true)
    pub backup: bool,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            load: vec![".".to_string(), "~/.kube/config".to_string()],
            save: "~/.kube/config".to_string(),
            exclude: Vec::new(),
            backup: true,
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "load": self.load,
            "save": self.save,
            "exclude": self.exclude,
            "backup": self.backup,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let defaults = BuiltinDefaults::default();
        assert_eq!(defaults.load, vec![".", "~/.kube/config"]);
        assert_eq!(defaults.save, "~/.kube/config");
        assert!(defaults.exclude.is_empty());
        assert!(defaults.backup);
    }

    #[test]
    fn test_to_value() {
        let value = BuiltinDefaults::default().to_value();

        assert_eq!(value["load"][1], "~/.kube/config");
        assert_eq!(value["save"], "~/.kube/config");
        assert_eq!(value["backup"], true);
    }
}
