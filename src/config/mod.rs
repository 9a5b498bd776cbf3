//! Configuration module for fontswap
//!
//! This module provides configuration management including:
//! - Path resolution for settings, the journal, and the program itself
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SwapPaths;
pub use settings::{BackupLayout, Settings};
