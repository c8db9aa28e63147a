//! Operator interaction.
//!
//! The resolution loop only talks to a [`Prompter`]; the terminal
//! implementation uses dialoguer, tests replay answers from a script.

mod scripted;
mod terminal;

pub use scripted::ScriptedPrompter;
pub use terminal::TerminalPrompter;

use crate::document::Namespace;

/// Errors raised while asking the operator something.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("cancelled by operator")]
    Cancelled,

    #[error("no scripted answer for: {0}")]
    Exhausted(String),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<dialoguer::Error> for PromptError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                PromptError::Cancelled
            }
            dialoguer::Error::IO(e) => PromptError::Io(e),
            #[allow(unreachable_patterns)]
            other => PromptError::Io(std::io::Error::other(other.to_string())),
        }
    }
}

/// Source of operator decisions.
pub trait Prompter {
    /// Ask for the new name of an entry. `label` describes the entry, e.g.
    /// `cluster "prod" in "/home/me/.kube/config"`. Accepting the default
    /// returns `current` unchanged.
    fn ask_rename(&mut self, current: &str, label: &str) -> Result<String, PromptError>;

    /// Ask a yes/no question.
    fn ask_confirm(&mut self, message: &str) -> Result<bool, PromptError>;

    /// Called at the start of every resolution pass (1-based).
    fn begin_pass(&mut self, _pass: usize) {}

    /// Called once per collision group, before its members are prompted.
    fn report_collision(&mut self, _namespace: Namespace, _name: &str, _count: usize) {}
}

/// Question shown for a rename.
pub fn rename_message(label: &str) -> String {
    format!("What name should {} be?", label)
}
