//! fontswap - replace every font in a folder with one custom font
//!
//! This library moves the font files of a target folder into a timestamped
//! backup session, copies a single custom font over each of them, and can
//! later move the originals back.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Settings and path management
//! - `error`: Custom error types
//! - `models`: Font files, targets, backup sessions and source state
//! - `source`: Finding (and watching for) the custom font
//! - `engine`: The replace engine, progress events and cancellation
//! - `backup`: Backup sessions and the restore engine
//! - `audit`: Operation journal
//! - `frontend`: The capability set a console or UI provides to workflows
//! - `services`: Replace/restore workflows over explicit per-run state
//! - `cli`: Command handlers
//! - `display`: Terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use fontswap::engine::{NullSink, ReplaceEngine};
//! use fontswap::models::TargetDirectory;
//! use fontswap::source::SourceResolver;
//!
//! let source = SourceResolver::new("PLACE YOUR CUSTOM FONT HERE").require_candidate()?;
//! let target = TargetDirectory::validate("/path/to/fonts")?;
//! let report = ReplaceEngine::default().run(&source, &target, true, &mut NullSink)?;
//! println!("replaced {}, skipped {}", report.replaced, report.skipped);
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod frontend;
pub mod models;
pub mod services;
pub mod source;

pub use error::FontSwapError;
