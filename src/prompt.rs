//! Interactive prompts.
//!
//! The CLI only talks to the [`Prompter`] trait, so tests and non-interactive
//! callers can substitute their own answers.

use dialoguer::{Confirm, Input, Select};

use crate::error::{Error, Result};

pub trait Prompter {
    /// Asks for a line of text. An empty answer is rejected.
    fn input(&self, prompt: &str) -> Result<String>;

    /// Asks a yes/no question, defaulting to no.
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Asks the user to pick one of `items`, returning its index.
    fn select(&self, prompt: &str, items: &[&str]) -> Result<usize>;
}

/// Terminal prompts backed by `dialoguer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .validate_with(|input: &String| -> std::result::Result<(), &'static str> {
                if input.trim().is_empty() {
                    Err("A name is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map(|input| input.trim().to_string())
            .map_err(|e| Error::PromptError(e.to_string()))
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }

    fn select(&self, prompt: &str, items: &[&str]) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .default(0)
            .items(items)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}

/// Asks whether discovered hook scripts may run, unless the check is skipped.
pub fn confirm_hooks_execution(prompter: &dyn Prompter, skip_hooks_check: bool) -> Result<bool> {
    if skip_hooks_check {
        return Ok(true);
    }
    prompter.confirm(
        "WARNING: This project contains hook scripts that will execute commands on your system. Do you want to run these hooks?",
    )
}
