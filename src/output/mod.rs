//! Output sinks for computed statistics.
//!
//! This module handles:
//! - Two-column text reports (`key<TAB>value`)
//! - The console summary
//! - Line graphs of distributions, through a pluggable plotter

pub mod plot;
pub mod report;
pub mod summary;

// Re-export main functions
pub use plot::{render_distributions, render_svg, write_svg, LineGraph, Plotter, SvgPlotter};
pub use report::{validate_path, write_entries, write_report};
pub use summary::{print_summary, write_summary};
