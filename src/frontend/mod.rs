//! Front-end capability set
//!
//! The workflows in `services` need three things from whoever drives them:
//! a yes/no answer before destructive steps, somewhere to send progress, and
//! a choice among backup sessions. `Frontend` bundles those so a blocking
//! console and an event-driven UI can run the same workflow.

mod channel;
mod console;

use std::fmt;

use serde::Serialize;

use crate::engine::{ProgressEvent, ProgressSink};
use crate::error::FontSwapResult;
use crate::models::{BackupSession, BackupSessionId};

pub use channel::{ChannelFrontend, UiRequest};
pub use console::ConsoleFrontend;

/// Which decision is being asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmKind {
    Replace,
    Restore,
    /// Delete an emptied backup folder
    Cleanup,
}

impl ConfirmKind {
    /// Replace and restore overwrite files; cleanup only removes an empty folder
    pub fn is_destructive(&self) -> bool {
        !matches!(self, ConfirmKind::Cleanup)
    }
}

/// A question put to the user before a step runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmPrompt {
    pub kind: ConfirmKind,
    pub title: String,
    /// Lines describing exactly what will happen
    pub details: Vec<String>,
}

impl ConfirmPrompt {
    pub fn new(kind: ConfirmKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            details: Vec::new(),
        }
    }

    pub fn detail(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }
}

impl fmt::Display for ConfirmPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} ---", self.title)?;
        for line in &self.details {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// What a workflow needs from its caller
pub trait Frontend {
    /// Ask before a step runs; false means the step is skipped
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> FontSwapResult<bool>;

    /// Show one status update
    fn report_progress(&mut self, event: &ProgressEvent);

    /// Pick one of `sessions` (newest first); None means the user backed out
    fn select_session(
        &mut self,
        sessions: &[BackupSession],
    ) -> FontSwapResult<Option<BackupSessionId>>;
}

/// Forwards engine progress to a front end
pub struct FrontendSink<'a, F: ?Sized>(pub &'a mut F);

impl<F: Frontend + ?Sized> ProgressSink for FrontendSink<'_, F> {
    fn emit(&mut self, event: ProgressEvent) {
        self.0.report_progress(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_display() {
        let prompt = ConfirmPrompt::new(ConfirmKind::Replace, "Confirmation")
            .detail("Target Folder: /fonts")
            .detail("Source File:   /src/custom.ttf");

        assert_eq!(
            prompt.to_string(),
            "--- Confirmation ---\nTarget Folder: /fonts\nSource File:   /src/custom.ttf\n"
        );
        assert!(prompt.kind.is_destructive());
        assert!(!ConfirmKind::Cleanup.is_destructive());
    }
}
