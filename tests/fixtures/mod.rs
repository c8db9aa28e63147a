//! Shared fixtures for the integration tests
//!
//! The kubeconfigs under `tests/fixtures/kubeconfigs` are copied into a
//! temporary directory so tests can rename and overwrite freely.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Directory holding the fixture kubeconfigs
pub fn kubeconfigs_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/kubeconfigs")
}

/// Copy every fixture into a fresh temporary directory.
pub fn copy_fixtures() -> TempDir {
    let dir = TempDir::new().unwrap();
    for entry in fs::read_dir(kubeconfigs_dir()).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
    }
    dir
}

/// Write a minimal kubeconfig with one cluster, user and context, all
/// sharing `name`.
pub fn write_simple(dir: &Path, rel: &str, name: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let yaml = format!(
        "apiVersion: v1\n\
         kind: Config\n\
         clusters:\n\
         - name: {name}\n\
         \x20 cluster:\n\
         \x20   server: https://{name}.example.com\n\
         users:\n\
         - name: {name}\n\
         \x20 user:\n\
         \x20   token: t-{name}\n\
         contexts:\n\
         - name: {name}\n\
         \x20 context:\n\
         \x20   cluster: {name}\n\
         \x20   user: {name}\n\
         current-context: {name}\n"
    );
    fs::write(&path, yaml).unwrap();
    path
}
