//! Backup system for fontswap
//!
//! Keeps the font files displaced by a replace run so they can be put back.
//!
//! # Architecture
//!
//! The backup system consists of two main components:
//!
//! - `BackupSessionManager`: Creates, lists, and removes backup sessions
//! - `RestoreEngine`: Validates a session and moves its files back
//!
//! # Layout
//!
//! ```text
//! <target>/
//!   a.ttf                      (replaced by the custom font)
//!   Fonts.old/
//!     2025-11-27_14-30-22/     (one folder per replace run)
//!       a.ttf                  (the original)
//! ```
//!
//! Older installs put the originals straight into `Fonts.old`; that folder is
//! listed as a single legacy session when it has no timestamped subfolders.
//!
//! # Example
//!
//! ```rust,ignore
//! use fontswap::backup::RestoreEngine;
//! use fontswap::engine::NullSink;
//! use fontswap::models::TargetDirectory;
//!
//! let target = TargetDirectory::validate("/path/to/fonts")?;
//! let engine = RestoreEngine::new(target);
//! let latest = engine.manager().latest_session()?;
//! let result = engine.restore(latest.id, true, &mut NullSink)?;
//! if result.session_empty {
//!     engine.cleanup(latest.id, &mut NullSink)?;
//! }
//! ```

mod manager;
mod restore;

pub use manager::BackupSessionManager;
pub use restore::{RestoreEngine, RestorePlan, RestoreResult};
