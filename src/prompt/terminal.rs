//! Interactive terminal prompter.

use colored::Colorize;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};

use super::{PromptError, Prompter};
use crate::document::Namespace;

pub struct TerminalPrompter {
    term: Term,
    theme: ColorfulTheme,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            theme: ColorfulTheme::default(),
        }
    }

    /// Whether prompts can be shown at all.
    pub fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

impl Prompter for TerminalPrompter {
    fn ask_rename(&mut self, current: &str, label: &str) -> Result<String, PromptError> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(super::rename_message(label))
            .default(current.to_string())
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("name must not be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text_on(&self.term)?;

        Ok(answer.trim().to_string())
    }

    fn ask_confirm(&mut self, message: &str) -> Result<bool, PromptError> {
        Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(false)
            .interact_on_opt(&self.term)?
            .ok_or(PromptError::Cancelled)
    }

    fn begin_pass(&mut self, pass: usize) {
        // keep the load summary of the first pass visible
        if pass > 1 {
            let _ = self.term.clear_screen();
        }
    }

    fn report_collision(&mut self, namespace: Namespace, name: &str, count: usize) {
        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "{}",
            namespace.as_str().to_uppercase().blue().bold()
        ));
        let _ = self.term.write_line(&format!(
            "{} {} name {} found {} times.",
            "Error:".red().bold(),
            namespace.entity(),
            name.on_red().black(),
            count
        ));
    }
}
