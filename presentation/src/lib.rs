//! Presentation layer for mirai-helpdesk
//!
//! This crate contains CLI definitions, output formatters, and
//! progress reporters.

pub mod cli;
pub mod formatter;
pub mod progress;

// Re-export commonly used types
pub use cli::{Cli, OutputFormat};
pub use formatter::ConsoleFormatter;
pub use progress::{ProgressReporter, SimpleProgress};
