//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod stats;
pub mod utils;

// Re-export main command functions
pub use stats::{execute_stats, load_store, parse_separator, validate_args, StatsArgs};
pub use utils::display_version;
