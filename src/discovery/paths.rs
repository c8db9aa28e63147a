//! Path expansion against an explicit home and working directory.

use std::path::{Component, Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("Could not determine home directory (needed to expand '{0}')")]
    HomeNotFound(String),

    #[error("Could not determine current directory: {0}")]
    CurrentDir(#[from] std::io::Error),
}

/// The directories relative and `~` paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    pub home: Option<PathBuf>,
    pub cwd: PathBuf,
}

impl PathContext {
    pub fn new(home: Option<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            home,
            cwd: cwd.into(),
        }
    }

    /// Capture home and working directory from the running process.
    pub fn from_env() -> Result<Self, PathError> {
        Ok(Self {
            home: dirs::home_dir(),
            cwd: std::env::current_dir()?,
        })
    }

    /// Expand a leading `~`, make the path absolute and normalize it.
    ///
    /// Only `~` on its own or followed by a separator is expanded;
    /// `~alice/...` is left as a relative path.
    pub fn expand(&self, raw: &str) -> Result<PathBuf, PathError> {
        let path = match strip_home_prefix(raw) {
            Some(rest) => {
                let home = self
                    .home
                    .as_ref()
                    .ok_or_else(|| PathError::HomeNotFound(raw.to_string()))?;
                if rest.is_empty() {
                    home.clone()
                } else {
                    home.join(rest)
                }
            }
            None => PathBuf::from(raw),
        };

        let absolute = if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        };
        Ok(normalize(&absolute))
    }
}

fn strip_home_prefix(raw: &str) -> Option<&str> {
    let rest = raw.strip_prefix('~')?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\'))
}

/// Lexical normalization: drops `.` and resolves `..` without touching the
/// filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
