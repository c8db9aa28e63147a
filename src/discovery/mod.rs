//! Kubeconfig discovery and loading
//!
//! Locations are files or directories:
//! - a file is an explicit candidate; failing to parse it is fatal
//! - a directory is walked for `*.yml`/`*.yaml` files; those that are not
//!   kubeconfigs are skipped quietly
//! - a location that does not exist is ignored

mod exclude;
mod paths;

pub use exclude::{ExcludeError, ExcludeRules};
pub use paths::{normalize, PathContext, PathError};

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use kcm_kubeconfig::KubeConfig;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::document::ConfigDocument;

/// Extensions of files considered while walking a directory
const KUBECONFIG_EXTENSIONS: &[&str] = &["yml", "yaml"];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File \"{}\" is not a valid kubeconfig file. {detail}", path.display())]
    Invalid { path: PathBuf, detail: String },
}

/// How a candidate file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Named directly as a location
    Explicit,
    /// Found while walking a directory
    Scanned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub origin: Origin,
}

/// List candidate files for `locations`, in location order.
///
/// Directory contents are visited sorted by file name. A file reachable from
/// several locations is listed once, at its first occurrence. Naming it
/// directly anywhere in `locations` makes it explicit.
pub fn find_candidates(locations: &[PathBuf], exclude: &ExcludeRules) -> Vec<Candidate> {
    let mut seen: HashMap<PathBuf, usize> = HashMap::new();
    let mut candidates: Vec<Candidate> = Vec::new();

    let mut push = |path: PathBuf, origin: Origin| {
        let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        match seen.get(&key) {
            Some(&index) => {
                if origin == Origin::Explicit {
                    candidates[index].origin = Origin::Explicit;
                }
            }
            None => {
                seen.insert(key, candidates.len());
                candidates.push(Candidate { path, origin });
            }
        }
    };

    for location in locations {
        let metadata = match fs::metadata(location) {
            Ok(m) => m,
            Err(_) => {
                debug!(location = %location.display(), "location does not exist, skipping");
                continue;
            }
        };

        if metadata.is_file() {
            push(location.clone(), Origin::Explicit);
            continue;
        }

        if metadata.is_dir() {
            for path in walk_directory(location, exclude) {
                push(path, Origin::Scanned);
            }
        }
    }

    candidates
}

fn walk_directory(root: &Path, exclude: &ExcludeRules) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
        .into_iter()
        .filter_entry(|entry| {
            let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
            rel.as_os_str().is_empty() || !exclude.is_excluded(rel)
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "skipping unreadable path");
                continue;
            }
        };

        if entry.file_type().is_file() && has_kubeconfig_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files
}

fn has_kubeconfig_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| KUBECONFIG_EXTENSIONS.iter().any(|k| ext.eq_ignore_ascii_case(k)))
        .unwrap_or(false)
}

/// Read and validate one kubeconfig file.
pub fn load_file(path: &Path) -> Result<KubeConfig, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    KubeConfig::from_yaml_str(&contents).map_err(|e| LoadError::Invalid {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

/// Whether `path` holds a valid kubeconfig.
pub fn is_kubeconfig(path: &Path) -> bool {
    load_file(path).is_ok()
}

/// Load every candidate: explicit files must be valid, scanned files that
/// are not kubeconfigs are dropped.
pub fn load_candidates(candidates: &[Candidate]) -> Result<Vec<ConfigDocument>, LoadError> {
    let mut documents = Vec::new();

    for candidate in candidates {
        let config = match load_file(&candidate.path) {
            Ok(config) => config,
            Err(e) if candidate.origin == Origin::Scanned => {
                debug!(path = %candidate.path.display(), error = %e, "not a kubeconfig, skipping");
                continue;
            }
            Err(e) => return Err(e),
        };

        for dangling in config.dangling_references() {
            warn!(
                path = %candidate.path.display(),
                context = %dangling.context,
                kind = dangling.kind.as_str(),
                target = %dangling.target,
                "context references a missing entry"
            );
        }

        info!(
            path = %candidate.path.display(),
            clusters = config.clusters.len(),
            users = config.users.len(),
            contexts = config.contexts.len(),
            "loaded kubeconfig"
        );
        documents.push(ConfigDocument::new(candidate.path.clone(), config));
    }

    Ok(documents)
}

/// Discover and load the kubeconfigs under `locations`.
pub fn load(locations: &[PathBuf], exclude: &ExcludeRules) -> Result<Vec<ConfigDocument>, LoadError> {
    load_candidates(&find_candidates(locations, exclude))
}
