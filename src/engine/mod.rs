//! Replace engine and the plumbing shared with restore
//!
//! - `ReplaceEngine`: backs up font files and overwrites them with the source
//! - `ProgressEvent` / `ProgressSink`: status reporting without console I/O
//! - `CancellationToken`: cooperative stop between files

mod cancel;
pub(crate) mod fsops;
mod progress;
mod replace;

pub use cancel::CancellationToken;
pub use progress::{NullSink, ProgressEvent, ProgressSink, SkipReason};
pub use replace::{ReplaceEngine, ReplaceOptions, ReplacePlan, ReplaceReport};
