//! Loaded kubeconfig documents and the three name namespaces.

use std::fmt;
use std::path::PathBuf;

use kcm_kubeconfig::KubeConfig;

/// One of the independent name spaces of a kubeconfig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Clusters,
    Users,
    Contexts,
}

impl Namespace {
    /// Scan order of a resolution pass.
    pub const ALL: [Namespace; 3] = [Namespace::Clusters, Namespace::Users, Namespace::Contexts];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clusters => "clusters",
            Self::Users => "users",
            Self::Contexts => "contexts",
        }
    }

    /// Singular noun for an entry of this namespace.
    pub fn entity(&self) -> &'static str {
        match self {
            Self::Clusters => "cluster",
            Self::Users => "user",
            Self::Contexts => "context",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed kubeconfig together with the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    pub source: PathBuf,
    pub config: KubeConfig,
}

impl ConfigDocument {
    pub fn new(source: impl Into<PathBuf>, config: KubeConfig) -> Self {
        Self {
            source: source.into(),
            config,
        }
    }

    /// Entry names of a namespace, in document order.
    pub fn names(&self, namespace: Namespace) -> Vec<&str> {
        match namespace {
            Namespace::Clusters => self.config.clusters.iter().map(|c| c.name.as_str()).collect(),
            Namespace::Users => self.config.users.iter().map(|u| u.name.as_str()).collect(),
            Namespace::Contexts => self.config.contexts.iter().map(|c| c.name.as_str()).collect(),
        }
    }

    /// Mutable name of the `index`-th entry of a namespace.
    pub fn name_mut(&mut self, namespace: Namespace, index: usize) -> Option<&mut String> {
        match namespace {
            Namespace::Clusters => self.config.clusters.get_mut(index).map(|c| &mut c.name),
            Namespace::Users => self.config.users.get_mut(index).map(|u| &mut u.name),
            Namespace::Contexts => self.config.contexts.get_mut(index).map(|c| &mut c.name),
        }
    }

    /// Number of entries in a namespace.
    pub fn len(&self, namespace: Namespace) -> usize {
        match namespace {
            Namespace::Clusters => self.config.clusters.len(),
            Namespace::Users => self.config.users.len(),
            Namespace::Contexts => self.config.contexts.len(),
        }
    }
}
