//! Climate advisory command-line front end
//!
//! Argument parsing, the interactive location prompt and report output
//! live here so they can be tested without spawning the binary.

pub mod args;
pub mod output;
pub mod prompt;

pub use args::{AdviseArgs, Cli, Commands, log_filter_from_verbosity};
pub use output::render_outcome;
pub use prompt::{LOCATION_PROMPT, read_location, resolve_location};
