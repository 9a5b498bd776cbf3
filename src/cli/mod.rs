//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod history;
pub mod replace;
pub mod restore;
pub mod sessions;
pub mod source;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::error::{FontSwapError, FontSwapResult};
use crate::frontend::ConsoleFrontend;
use crate::services::SwapState;

pub use history::handle_history_command;
pub use replace::{handle_replace_command, ReplaceArgs};
pub use restore::{handle_restore_command, RestoreArgs};
pub use sessions::{handle_sessions_command, SessionsArgs};
pub use source::{handle_source_command, handle_watch_command};

/// Select `--target`, or ask for a folder when it was not given
pub(crate) fn select_target<R: BufRead, W: Write>(
    state: &mut SwapState,
    target: Option<PathBuf>,
    console: &mut ConsoleFrontend<R, W>,
) -> FontSwapResult<()> {
    let path = match target {
        Some(path) => path,
        None => {
            let answer = console.prompt_line("Enter the path of the folder whose fonts you want to change: ")?;
            let answer = answer.trim_matches('"');
            if answer.is_empty() {
                return Err(FontSwapError::NoTargetSelected);
            }
            PathBuf::from(answer)
        }
    };

    let target = state.set_target(&path)?;
    if let Some(original) = target.redirected_from() {
        console.say(format!(
            "'{}' is a backup folder; using its parent {} instead.",
            original.display(),
            target.path().display()
        ))?;
    }
    Ok(())
}
