//! Prompter that replays prepared answers.

use std::collections::VecDeque;

use super::{PromptError, Prompter};
use crate::document::Namespace;

/// Replays rename answers and confirmations in order.
///
/// A `None` rename answer accepts the default. When the script runs out the
/// prompt fails with [`PromptError::Exhausted`], which aborts resolution the
/// same way an operator cancelling would.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    renames: VecDeque<Option<String>>,
    confirms: VecDeque<bool>,
    asked: Vec<String>,
    passes: usize,
    collisions: Vec<(Namespace, String, usize)>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(renames: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            renames: renames.into_iter().map(|a| a.map(Into::into)).collect(),
            ..Self::default()
        }
    }

    pub fn with_confirms(mut self, confirms: impl IntoIterator<Item = bool>) -> Self {
        self.confirms = confirms.into_iter().collect();
        self
    }

    /// Every question asked so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Number of passes announced through `begin_pass`.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Collision groups reported so far as `(namespace, name, size)`.
    pub fn collisions(&self) -> &[(Namespace, String, usize)] {
        &self.collisions
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.renames.len() + self.confirms.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask_rename(&mut self, current: &str, label: &str) -> Result<String, PromptError> {
        let message = super::rename_message(label);
        self.asked.push(message.clone());

        match self.renames.pop_front() {
            Some(Some(answer)) => Ok(answer),
            Some(None) => Ok(current.to_string()),
            None => Err(PromptError::Exhausted(message)),
        }
    }

    fn ask_confirm(&mut self, message: &str) -> Result<bool, PromptError> {
        self.asked.push(message.to_string());
        self.confirms
            .pop_front()
            .ok_or_else(|| PromptError::Exhausted(message.to_string()))
    }

    fn begin_pass(&mut self, _pass: usize) {
        self.passes += 1;
    }

    fn report_collision(&mut self, namespace: Namespace, name: &str, count: usize) {
        self.collisions.push((namespace, name.to_string(), count));
    }
}
