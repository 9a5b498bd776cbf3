//! Operation journal for fontswap
//!
//! Records every replace, restore, and cleanup run in an append-only log so
//! a user can later see which session belongs to which run.
//!
//! # Architecture
//!
//! - `JournalEntry`: one run with timestamp, run id, target, session, counts
//!   and outcome.
//! - `AuditLogger`: writes entries to the journal file using a line-delimited
//!   JSON format (JSONL).
//!
//! # Example
//!
//! ```rust,ignore
//! use fontswap::audit::{AuditLogger, JournalEntry, Operation};
//!
//! let logger = AuditLogger::new(paths.journal_file());
//! let entry = JournalEntry::new(Operation::Replace, target.path())
//!     .with_session(report.session.unwrap())
//!     .with_counts(report.replaced, report.skipped);
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{JournalEntry, Operation, Outcome};
pub use logger::AuditLogger;
