//! Restore CLI command

use std::path::PathBuf;

use clap::Args;

use crate::backup::BackupSessionManager;
use crate::display::format_restore_outcome;
use crate::error::FontSwapResult;
use crate::frontend::ConsoleFrontend;
use crate::services::{SwapService, SwapState};

use super::select_target;

/// Arguments for `fontswap restore`
#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Folder whose fonts are restored (asked for when omitted)
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// Backup to restore: a timestamp such as 2025-01-02_03-04-05, 'latest',
    /// or 'Fonts.old' for an old single-folder backup (chosen from a menu when omitted)
    #[arg(short, long)]
    pub session: Option<String>,

    /// Skip the typed confirmation and use the newest backup unless --session is given
    #[arg(short, long)]
    pub yes: bool,

    /// Delete the backup folder once it is empty, without asking
    #[arg(long, conflicts_with = "keep")]
    pub cleanup: bool,

    /// Keep the emptied backup folder, without asking
    #[arg(long)]
    pub keep: bool,
}

impl RestoreArgs {
    fn cleanup_answer(&self) -> Option<bool> {
        match (self.cleanup, self.keep) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Handle the restore command
pub fn handle_restore_command(
    service: &SwapService,
    state: &mut SwapState,
    args: RestoreArgs,
) -> FontSwapResult<()> {
    let mut console = ConsoleFrontend::stdio(service.settings().confirmation_phrase.as_str())
        .assume_yes(args.yes)
        .cleanup_answer(args.cleanup_answer());

    select_target(state, args.target, &mut console)?;

    if let Some(selector) = &args.session {
        let manager = BackupSessionManager::new(state.require_target()?);
        let session = manager.resolve_session(selector)?;
        state.select_session(Some(session.id));
    }

    if let Some(outcome) = service.restore(state, &mut console)? {
        console.say(format_restore_outcome(&outcome))?;
    }
    Ok(())
}
