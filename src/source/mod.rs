//! Source folder handling
//!
//! - `SourceResolver`: finds the one replacement file in the source folder
//! - `SourceWatcher`: re-runs the resolver on an interval until cancelled

mod resolver;
mod watcher;

pub use resolver::SourceResolver;
pub use watcher::{SourceUpdate, SourceWatcher};
