//! Display formatting for terminal output
//!
//! Provides utilities for formatting sessions, plans and run summaries for
//! terminal display.

pub mod report;
pub mod session;

pub use report::{format_journal, format_replace_plan, format_restore_outcome, format_source_state};
pub use session::{format_age, format_session_details, format_session_list, format_size};
