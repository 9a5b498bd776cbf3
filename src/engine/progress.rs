//! Progress events emitted by the replace and restore engines
//!
//! The engines never print. Each processed entry produces one event, and every
//! run ends with a summary event. Callers choose where events go by passing a
//! `ProgressSink`.

use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc;

use serde::Serialize;

/// Why an entry in the target directory was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Directory,
    NotAFont,
    /// The running program itself
    ProgramFile,
    /// The replacement file lives in the target directory
    SourceFile,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Directory => write!(f, "directory"),
            SkipReason::NotAFont => write!(f, "non-font file"),
            SkipReason::ProgramFile => write!(f, "program file"),
            SkipReason::SourceFile => write!(f, "source file"),
        }
    }
}

/// One status update from a running operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// A backup session folder was created
    SessionCreated { path: PathBuf },
    /// A font was moved to the backup and overwritten with the source
    Replaced { name: String, backup: PathBuf },
    /// An entry was left untouched
    Skipped { name: String, reason: SkipReason },
    /// A backed-up file was moved back into the target
    Restored { name: String, destination: PathBuf },
    /// End of a replace run
    ReplaceFinished { replaced: usize, skipped: usize },
    /// End of a restore run
    RestoreFinished { restored: usize },
    /// An emptied session folder was deleted
    SessionRemoved { path: PathBuf },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::SessionCreated { path } => {
                write!(f, "Old font files will be moved to: {}", path.display())
            }
            ProgressEvent::Replaced { name, backup } => {
                write!(f, "  - Replaced {} (original saved to {})", name, backup.display())
            }
            ProgressEvent::Skipped { name, reason } => {
                write!(f, "  - Skipping {}: {}", reason, name)
            }
            ProgressEvent::Restored { name, .. } => write!(f, "  - Restored: {}", name),
            ProgressEvent::ReplaceFinished { replaced, skipped } => write!(
                f,
                "Replaced {} font file(s), skipped {} item(s)",
                replaced, skipped
            ),
            ProgressEvent::RestoreFinished { restored } => {
                write!(f, "Restored {} file(s)", restored)
            }
            ProgressEvent::SessionRemoved { path } => {
                write!(f, "Removed empty backup folder {}", path.display())
            }
        }
    }
}

/// Receives progress events
pub trait ProgressSink {
    fn emit(&mut self, event: ProgressEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&mut self, _event: ProgressEvent) {}
}

impl ProgressSink for Vec<ProgressEvent> {
    fn emit(&mut self, event: ProgressEvent) {
        self.push(event);
    }
}

impl ProgressSink for mpsc::Sender<ProgressEvent> {
    fn emit(&mut self, event: ProgressEvent) {
        // A closed receiver just means nobody is listening any more
        let _ = self.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let event = ProgressEvent::Skipped {
            name: "notes.txt".into(),
            reason: SkipReason::NotAFont,
        };
        assert_eq!(event.to_string(), "  - Skipping non-font file: notes.txt");

        let summary = ProgressEvent::ReplaceFinished {
            replaced: 2,
            skipped: 2,
        };
        assert_eq!(
            summary.to_string(),
            "Replaced 2 font file(s), skipped 2 item(s)"
        );
    }

    #[test]
    fn test_channel_sink_ignores_closed_receiver() {
        let (mut tx, rx) = mpsc::channel();
        tx.emit(ProgressEvent::RestoreFinished { restored: 1 });
        assert_eq!(
            rx.recv().unwrap(),
            ProgressEvent::RestoreFinished { restored: 1 }
        );

        drop(rx);
        tx.emit(ProgressEvent::RestoreFinished { restored: 2 });
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_value(ProgressEvent::RestoreFinished { restored: 3 }).unwrap();
        assert_eq!(json["event"], "restore_finished");
        assert_eq!(json["restored"], 3);
    }
}
