//! Writing the merged kubeconfig.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use kcm_kubeconfig::{KubeConfig, SchemaError};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Failed to write \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize merged kubeconfig: {0}")]
    Serialize(#[from] SchemaError),
}

#[derive(Debug, Clone, Copy)]
pub struct PersistOptions {
    /// Copy an existing target aside before overwriting it
    pub backup: bool,
}

impl Default for PersistOptions {
    fn default() -> Self {
        Self { backup: true }
    }
}

/// `<path>.bak-<unix millis>`
pub fn backup_path(path: &Path, now: DateTime<Utc>) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".bak-{}", now.timestamp_millis()));
    PathBuf::from(name)
}

/// Write `config` to `path` as YAML.
///
/// Returns the backup location when an existing file was copied aside.
pub fn write_merged(
    path: &Path,
    config: &KubeConfig,
    options: PersistOptions,
) -> Result<Option<PathBuf>, PersistError> {
    let yaml = config.to_yaml_string()?;
    let io_err = |source: io::Error| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };

    let backup = if options.backup && path.exists() {
        let target = backup_path(path, Utc::now());
        fs::copy(path, &target).map_err(|source| PersistError::Io {
            path: target.clone(),
            source,
        })?;
        info!(from = %path.display(), to = %target.display(), "backed up existing kubeconfig");
        Some(target)
    } else {
        None
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let mut file = open_private(path).map_err(io_err)?;
    file.write_all(yaml.as_bytes()).map_err(io_err)?;
    file.sync_all().map_err(io_err)?;

    info!(
        path = %path.display(),
        clusters = config.clusters.len(),
        users = config.users.len(),
        contexts = config.contexts.len(),
        "wrote merged kubeconfig"
    );
    Ok(backup)
}

/// Open `path` for writing, readable by the owner only.
///
/// A new file is created 0600. An existing file is tightened before it is
/// truncated, so credentials are never written to a wider mode.
#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.set_len(0)?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
