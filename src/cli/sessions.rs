//! Backup session listing

use std::path::PathBuf;

use clap::Args;

use crate::backup::BackupSessionManager;
use crate::display::{format_session_details, format_session_list};
use crate::error::{FontSwapError, FontSwapResult};
use crate::models::TargetDirectory;

/// Arguments for `fontswap sessions`
#[derive(Args, Debug)]
pub struct SessionsArgs {
    /// Folder whose backups are listed
    #[arg(short, long)]
    pub target: PathBuf,

    /// Show one backup and its files ('latest' for the newest)
    pub session: Option<String>,
}

/// Handle the sessions command
pub fn handle_sessions_command(args: SessionsArgs) -> FontSwapResult<()> {
    let target = TargetDirectory::validate(&args.target)?;
    let manager = BackupSessionManager::new(&target);

    if let Some(selector) = &args.session {
        let session = manager.resolve_session(selector)?;
        let files = manager.session_files(session.id)?;
        print!("{}", format_session_details(&session, &files));
        return Ok(());
    }

    match manager.list_sessions() {
        Ok(sessions) => {
            println!("Backups in {}", manager.backup_root().display());
            println!();
            print!(
                "{}",
                format_session_list(&sessions, chrono::Local::now().naive_local())
            );
        }
        Err(FontSwapError::NoBackupFound { path }) => {
            println!("No backups found in {}", path.display());
        }
        Err(e) => return Err(e),
    }
    Ok(())
}
