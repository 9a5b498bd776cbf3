//! Core data models for fontswap
//!
//! This module contains the types shared by the engines:
//! - Font file recognition
//! - Validated target directories
//! - Backup session identifiers and metadata
//! - Source folder state

pub mod font;
pub mod session;
pub mod source;
pub mod target;

pub use font::{is_font_file_name, is_font_path, FONT_EXTENSIONS};
pub use session::{BackupSession, BackupSessionId, BACKUP_ROOT_NAME, SESSION_TIMESTAMP_FORMAT};
pub use source::{SourceCandidate, SourceState};
pub use target::TargetDirectory;
