//! Kubeconfig document model.
//!
//! Typed access to the fields the merge needs (entry names and the
//! cluster/user references of contexts) while every other key, at every
//! level, is carried through untouched.

pub mod error;
pub mod model;

pub use error::SchemaError;
pub use model::{
    AuthInfo, Cluster, Context, DanglingReference, Extra, KubeConfig, NamedCluster,
    NamedContext, NamedUser, ReferenceKind,
};

/// The only supported `apiVersion`.
pub const API_VERSION: &str = "v1";

/// The only supported `kind`.
pub const KIND: &str = "Config";
