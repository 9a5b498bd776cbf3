//! Service layer for fontswap
//!
//! Ties the engines to a front end: the explicit per-run state and the
//! replace/restore workflows that prompt, run and journal.

mod state;
mod swap;

pub use state::SwapState;
pub use swap::{CleanupStatus, RestoreOutcome, SwapService};
