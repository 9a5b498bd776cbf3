//! Blocking console front end
//!
//! Reads answers line by line and writes prompts and progress as plain text.
//! Replace and restore need the configured phrase typed exactly; cleanup takes
//! a y/n answer.

use std::io::{self, BufRead, Write};

use crate::engine::ProgressEvent;
use crate::error::{FontSwapError, FontSwapResult};
use crate::models::{BackupSession, BackupSessionId};

use super::{ConfirmKind, ConfirmPrompt, Frontend};

/// Console adapter over any line reader and writer
pub struct ConsoleFrontend<R, W> {
    input: R,
    output: W,
    /// Phrase that confirms replace or restore
    phrase: String,
    /// Answer yes to replace/restore and take the newest session without asking
    assume_yes: bool,
    /// Fixed answer for the cleanup question, if any
    cleanup_answer: Option<bool>,
}

impl ConsoleFrontend<io::StdinLock<'static>, io::Stdout> {
    /// Console on the process's stdin and stdout
    pub fn stdio(phrase: impl Into<String>) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), phrase)
    }
}

impl<R: BufRead, W: Write> ConsoleFrontend<R, W> {
    pub fn new(input: R, output: W, phrase: impl Into<String>) -> Self {
        Self {
            input,
            output,
            phrase: phrase.into(),
            assume_yes: false,
            cleanup_answer: None,
        }
    }

    /// Skip the typed confirmation (`--yes`)
    ///
    /// Unless `cleanup_answer` says otherwise, emptied backup folders are kept.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Answer the cleanup question without asking
    pub fn cleanup_answer(mut self, answer: Option<bool>) -> Self {
        self.cleanup_answer = answer;
        self
    }

    /// Print `prompt` and read one trimmed line
    pub fn prompt_line(&mut self, prompt: &str) -> FontSwapResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(FontSwapError::Cancelled);
        }
        Ok(line.trim().to_string())
    }

    /// Write one line of output
    pub fn say(&mut self, line: impl AsRef<str>) -> FontSwapResult<()> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Give back the writer (used by tests to inspect output)
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Frontend for ConsoleFrontend<R, W> {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> FontSwapResult<bool> {
        writeln!(self.output)?;
        write!(self.output, "{}", prompt)?;

        if prompt.kind == ConfirmKind::Cleanup {
            if let Some(answer) = self.cleanup_answer {
                return Ok(answer);
            }
            if self.assume_yes {
                return Ok(false);
            }
            let answer = self.prompt_line("Would you like to remove it? (y/n): ")?;
            return Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"));
        }

        if self.assume_yes {
            self.say("Confirmed by --yes.")?;
            return Ok(true);
        }

        let question = format!(
            "To confirm this action, type '{}' and press Enter: ",
            self.phrase
        );
        let answer = self.prompt_line(&question)?;
        let confirmed = answer == self.phrase;
        if !confirmed {
            self.say("Confirmation not received. Cancelled.")?;
        }
        Ok(confirmed)
    }

    fn report_progress(&mut self, event: &ProgressEvent) {
        // Progress output is best effort; a closed stdout must not abort a run
        let _ = writeln!(self.output, "{}", event);
    }

    fn select_session(
        &mut self,
        sessions: &[BackupSession],
    ) -> FontSwapResult<Option<BackupSessionId>> {
        let Some(newest) = sessions.first() else {
            return Ok(None);
        };
        if self.assume_yes || sessions.len() == 1 {
            return Ok(Some(newest.id));
        }

        self.say("")?;
        self.say("Available backups (newest first):")?;
        for (i, session) in sessions.iter().enumerate() {
            self.say(format!(
                "  {}. {} ({} file(s))",
                i + 1,
                session.id,
                session.file_count
            ))?;
        }

        loop {
            let answer = self.prompt_line("Select a backup to restore [1], or 'q' to quit: ")?;
            if answer.is_empty() {
                return Ok(Some(newest.id));
            }
            if answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=sessions.len()).contains(&n) => return Ok(Some(sessions[n - 1].id)),
                _ => self.say(format!("Please enter a number from 1 to {}.", sessions.len()))?,
            }
        }
    }
}
