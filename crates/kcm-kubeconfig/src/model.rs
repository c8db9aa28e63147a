//! Kubeconfig types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::{API_VERSION, KIND};

/// Keys the model does not know about, kept in document order.
pub type Extra = IndexMap<String, serde_yaml::Value>;

/// A whole kubeconfig file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubeConfig {
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    pub kind: String,

    pub clusters: Vec<NamedCluster>,

    pub users: Vec<NamedUser>,

    pub contexts: Vec<NamedContext>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<serde_yaml::Mapping>,

    /// Name of the context used by default
    #[serde(
        rename = "current-context",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_context: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCluster {
    pub name: String,
    pub cluster: Cluster,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Connection details for an API server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub server: String,

    #[serde(
        rename = "certificate-authority-data",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub certificate_authority_data: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedUser {
    pub name: String,
    pub user: AuthInfo,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Credentials for a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthInfo {
    #[serde(
        rename = "client-certificate-data",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub client_certificate_data: Option<String>,

    #[serde(
        rename = "client-key-data",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub client_key_data: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedContext {
    pub name: String,
    pub context: Context,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A cluster/user pairing, both by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub cluster: String,
    pub user: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Which side of a context a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Cluster,
    User,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cluster => "cluster",
            Self::User => "user",
        }
    }
}

/// A context reference that names no entry of its own document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub context: String,
    pub kind: ReferenceKind,
    pub target: String,
}

impl KubeConfig {
    /// An empty `v1`/`Config` document.
    pub fn empty() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            clusters: Vec::new(),
            users: Vec::new(),
            contexts: Vec::new(),
            preferences: None,
            current_context: None,
            extra: Extra::new(),
        }
    }

    /// Parse and validate a kubeconfig from YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, SchemaError> {
        let config: KubeConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to YAML.
    pub fn to_yaml_string(&self) -> Result<String, SchemaError> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> Result<(), SchemaError> {
        if self.api_version != API_VERSION {
            return Err(SchemaError::UnsupportedApiVersion(self.api_version.clone()));
        }
        if self.kind != KIND {
            return Err(SchemaError::UnexpectedKind(self.kind.clone()));
        }
        Ok(())
    }

    /// Context references that do not resolve within this document.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();

        for ctx in &self.contexts {
            if !self.clusters.iter().any(|c| c.name == ctx.context.cluster) {
                dangling.push(DanglingReference {
                    context: ctx.name.clone(),
                    kind: ReferenceKind::Cluster,
                    target: ctx.context.cluster.clone(),
                });
            }
            if !self.users.iter().any(|u| u.name == ctx.context.user) {
                dangling.push(DanglingReference {
                    context: ctx.name.clone(),
                    kind: ReferenceKind::User,
                    target: ctx.context.user.clone(),
                });
            }
        }

        dangling
    }
}
