//! Directories skipped while scanning for kubeconfigs.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Trees never worth descending into
const DEFAULT_EXCLUDES: &[&str] = &["**/.git", "**/node_modules", "**/target"];

#[derive(Debug, thiserror::Error)]
pub enum ExcludeError {
    #[error("Invalid exclude pattern: {0}")]
    Glob(#[from] globset::Error),
}

/// Glob patterns matched against paths relative to the scanned root.
#[derive(Debug, Clone)]
pub struct ExcludeRules {
    glob_set: GlobSet,
}

impl ExcludeRules {
    /// The default exclusions only.
    pub fn new() -> Result<Self, ExcludeError> {
        Self::with_patterns::<&str>(&[])
    }

    /// The default exclusions plus `patterns`.
    pub fn with_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ExcludeError> {
        let mut builder = GlobSetBuilder::new();

        for pattern in DEFAULT_EXCLUDES {
            builder.add(Glob::new(pattern)?);
        }
        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if !pattern.is_empty() {
                builder.add(Glob::new(pattern)?);
            }
        }

        Ok(Self {
            glob_set: builder.build()?,
        })
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.glob_set.is_match(path_str.as_ref())
    }
}
