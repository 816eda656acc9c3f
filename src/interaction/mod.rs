use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Prompt text used when the configuration does not override it.
pub const DEFAULT_CONFIRM_MESSAGE: &str = "Are you sure?";

/// Host-provided synchronous yes/no prompt.
///
/// Execution blocks until the user answers; the returned value decides whether
/// the guarded action proceeds.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Proceed,
    Suppressed,
}

impl ActionOutcome {
    #[must_use]
    pub fn proceeds(self) -> bool {
        self == Self::Proceed
    }
}

/// How a binder attaches its handler to an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlerBinding {
    /// Registers an extra listener next to whatever the element already has.
    #[default]
    Listener,
    /// Assigns the element's single handler slot, replacing any previous slot handler.
    ReplaceSlot,
}

/// Handler invoked when an element's primary action (click, submit) runs.
pub trait ActionListener: fmt::Debug {
    fn on_action(&mut self, prompt: &mut dyn ConfirmPrompt) -> ActionOutcome;
}

/// Listener installed by the confirm binder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmGuard {
    message: String,
}

impl ConfirmGuard {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for ConfirmGuard {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRM_MESSAGE)
    }
}

impl ActionListener for ConfirmGuard {
    fn on_action(&mut self, prompt: &mut dyn ConfirmPrompt) -> ActionOutcome {
        if prompt.confirm(&self.message) {
            ActionOutcome::Proceed
        } else {
            ActionOutcome::Suppressed
        }
    }
}

/// Prompt that always gives the same answer. Useful for headless runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPrompt(pub bool);

impl ConfirmPrompt for FixedPrompt {
    fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}

/// Prompt replaying queued answers and recording every message it was asked.
///
/// Once the queue is exhausted it declines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl ConfirmPrompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_owned());
        self.answers.pop_front().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ActionListener, ActionOutcome, ConfirmGuard, DEFAULT_CONFIRM_MESSAGE, ScriptedPrompt,
    };

    #[test]
    fn confirm_guard_follows_prompt_answer() {
        let mut prompt = ScriptedPrompt::new([true, false]);
        let mut guard = ConfirmGuard::default();

        assert_eq!(guard.on_action(&mut prompt), ActionOutcome::Proceed);
        assert_eq!(guard.on_action(&mut prompt), ActionOutcome::Suppressed);
        assert_eq!(prompt.asked(), [DEFAULT_CONFIRM_MESSAGE, DEFAULT_CONFIRM_MESSAGE]);
    }

    #[test]
    fn scripted_prompt_declines_when_exhausted() {
        let mut prompt = ScriptedPrompt::default();
        let mut guard = ConfirmGuard::new("Delete?");
        assert_eq!(guard.on_action(&mut prompt), ActionOutcome::Suppressed);
        assert_eq!(prompt.asked(), ["Delete?"]);
    }
}
