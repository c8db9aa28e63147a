//! Schema errors.

/// A document that is not a usable kubeconfig.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Not YAML, or a required field is missing or has the wrong type.
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported apiVersion '{0}', expected 'v1'")]
    UnsupportedApiVersion(String),

    #[error("unexpected kind '{0}', expected 'Config'")]
    UnexpectedKind(String),
}
