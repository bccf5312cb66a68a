//! Interactive questions asked by `new --edit` and `edit`.

use std::collections::VecDeque;

use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;

use crate::error::{GitliError, Result};
use crate::model::IssueType;

pub trait Prompter {
    /// Ask `question` showing `default`; returns the raw answer, empty when skipped.
    fn ask(&mut self, question: &str, default: &str) -> Result<String>;
}

/// Prompts on the controlling terminal.
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str, default: &str) -> Result<String> {
        let prompt = if default.is_empty() {
            question.to_string()
        } else {
            format!("{question} [{default}]")
        };
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| GitliError::Prompt(e.to_string()))?;
        Ok(answer.trim().to_string())
    }
}

/// Replays canned answers, then answers blank.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<S: Into<String>>(answers: impl IntoIterator<Item = S>) -> Self {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str, _default: &str) -> Result<String> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or_default().trim().to_string())
    }
}

/// Blank keeps `default`; an unrecognized answer falls back to Task.
pub fn ask_type(prompter: &mut dyn Prompter, default: IssueType) -> Result<IssueType> {
    let answer = prompter.ask(
        "Issue type: 1-Task, 2-Bug, 3-Enhancement",
        &default.code().to_string(),
    )?;
    if answer.is_empty() {
        return Ok(default);
    }
    Ok(answer.parse().unwrap_or(IssueType::Task))
}

/// Blank keeps `default`.
pub fn ask_milestone(prompter: &mut dyn Prompter, default: &str) -> Result<String> {
    let answer = prompter.ask("Milestone", default)?;
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer
    })
}

/// Blank keeps `default`.
pub fn ask_title(prompter: &mut dyn Prompter, default: &str) -> Result<String> {
    let answer = prompter.ask("Enter a new title (enter nothing to keep the same)", "")?;
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer
    })
}
