//! Replace CLI command

use std::path::PathBuf;

use clap::Args;

use crate::display::{format_replace_plan, format_source_state};
use crate::error::FontSwapResult;
use crate::frontend::ConsoleFrontend;
use crate::services::{SwapService, SwapState};

use super::select_target;

/// Arguments for `fontswap replace`
#[derive(Args, Debug)]
pub struct ReplaceArgs {
    /// Folder whose fonts are replaced (asked for when omitted)
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// Skip the typed confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Show what would be replaced without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Handle the replace command
pub fn handle_replace_command(
    service: &SwapService,
    state: &mut SwapState,
    args: ReplaceArgs,
) -> FontSwapResult<()> {
    let mut console =
        ConsoleFrontend::stdio(service.settings().confirmation_phrase.as_str()).assume_yes(args.yes);

    // Check the source first so an unusable folder never leads to a target prompt
    let source_state = state.refresh_source()?.clone();
    let source = match source_state.require_candidate() {
        Ok(candidate) => candidate.clone(),
        Err(e) => {
            console.say(format_source_state(&source_state))?;
            return Err(e);
        }
    };
    console.say(format_source_state(&source_state))?;

    select_target(state, args.target, &mut console)?;

    if args.dry_run {
        let target = state.require_target()?;
        let plan = service.replace_engine().plan(&source, target)?;
        console.say(format_replace_plan(&plan, &source, target))?;
        return Ok(());
    }

    if let Some(report) = service.replace(state, &mut console)? {
        if report.replaced == 0 {
            console.say("No font files were found in the target folder.")?;
        } else if let Some(path) = &report.session_path {
            console.say(format!("The original fonts are in {}", path.display()))?;
        }
    }
    Ok(())
}
