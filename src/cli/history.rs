//! Operation journal listing

use crate::audit::AuditLogger;
use crate::config::SwapPaths;
use crate::display::format_journal;
use crate::error::FontSwapResult;

/// Handle the history command
pub fn handle_history_command(paths: &SwapPaths, limit: usize) -> FontSwapResult<()> {
    let logger = AuditLogger::new(paths.journal_file());
    let entries = logger.read_recent(limit)?;
    print!("{}", format_journal(&entries));
    if entries.is_empty() {
        println!();
    }
    Ok(())
}
