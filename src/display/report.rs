//! Run summaries, plan previews and journal listings

use crate::audit::JournalEntry;
use crate::engine::ReplacePlan;
use crate::models::{SourceCandidate, SourceState, TargetDirectory, BACKUP_ROOT_NAME};
use crate::services::{CleanupStatus, RestoreOutcome};

/// Describe what a replace would do (`--dry-run`)
pub fn format_replace_plan(
    plan: &ReplacePlan,
    source: &SourceCandidate,
    target: &TargetDirectory,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("Target Folder: {}\n", target.path().display()));
    output.push_str(&format!("Source File:   {}\n\n", source.path().display()));

    if plan.fonts.is_empty() {
        output.push_str("No font files found to replace.\n");
    } else {
        output.push_str(&format!(
            "Would back up to '{}' and replace {} font file(s):\n",
            BACKUP_ROOT_NAME,
            plan.replace_count()
        ));
        for font in &plan.fonts {
            if let Some(name) = font.file_name() {
                output.push_str(&format!("  {}\n", name.to_string_lossy()));
            }
        }
    }

    if !plan.skipped.is_empty() {
        output.push_str(&format!("\nWould skip {} item(s):\n", plan.skip_count()));
        for (name, reason) in &plan.skipped {
            output.push_str(&format!("  {} ({})\n", name, reason));
        }
    }

    output
}

/// Describe the source folder state, with what the user should do next
pub fn format_source_state(state: &SourceState) -> String {
    match state {
        SourceState::Ready { candidate } => {
            format!("Source font: {}", candidate.path().display())
        }
        SourceState::NeedsPopulation { directory } => format!(
            "Created the source folder {}\nPlace your custom font file in it and try again.",
            directory.display()
        ),
        SourceState::Waiting { directory } => format!(
            "The source folder {} is empty.\nPlace your custom font file in it.",
            directory.display()
        ),
        SourceState::Ambiguous { directory, found } => format!(
            "The source folder {} holds {} files.\nLeave exactly one font file in it.",
            directory.display(),
            found
        ),
    }
}

/// Summarize a finished restore, including what happened to the session folder
pub fn format_restore_outcome(outcome: &RestoreOutcome) -> String {
    let mut output = outcome.result.summary();
    match &outcome.cleanup {
        CleanupStatus::NotOffered => output.push_str(&format!(
            "\nFiles remain in {}; it was kept.",
            outcome.result.session_path.display()
        )),
        CleanupStatus::Declined => output.push_str(&format!(
            "\nKept the empty backup folder {}",
            outcome.result.session_path.display()
        )),
        CleanupStatus::Removed { path } => {
            output.push_str(&format!("\nRemoved the empty backup folder {}", path.display()))
        }
        CleanupStatus::Failed { error } => {
            output.push_str(&format!("\nCould not remove the backup folder: {}", error))
        }
    }
    output
}

/// Format journal entries, newest last
pub fn format_journal(entries: &[JournalEntry]) -> String {
    if entries.is_empty() {
        return "No operations recorded.".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.summary());
        output.push('\n');
    }
    output
}
