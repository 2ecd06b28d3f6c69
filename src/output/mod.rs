//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output (on stderr, stdout carries the report)
//! - Progress reporting during a run
//! - Summary reporting
//! - Report writing

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{print_banner, print_error, print_info, print_step, print_warning, write_report};
pub use progress::ConsoleProgress;
pub use stats::{format_collection_line, print_summary};
