//! kcm - Kubeconfig Manager
//!
//! Discovers kubeconfig files, resolves name collisions between their
//! clusters, users and contexts with the operator's help, and merges them
//! into a single kubeconfig.

pub mod config;
pub mod discovery;
pub mod document;
pub mod merge;
pub mod persist;
pub mod prompt;
pub mod resolve;

pub use config::{ConfigError, Settings, SettingsFile};
pub use discovery::{ExcludeRules, LoadError, PathContext, PathError};
pub use document::{ConfigDocument, Namespace};
pub use kcm_kubeconfig::KubeConfig;
pub use merge::{merge, merge_with_current_context};
pub use persist::{write_merged, PersistError, PersistOptions};
pub use prompt::{PromptError, Prompter, ScriptedPrompter, TerminalPrompter};
pub use resolve::{detect, detect_all, resolve, CollisionGroup, ResolutionReport, ResolveError};
