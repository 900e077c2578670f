//! # Command-Line Interface
//!
//! | Command | Purpose | Example |
//! |---------|---------|---------|
//! | `search` | Filter tickets of a snapshot | `tq search --column from:Doing:backward` |
//! | `check` | Validate and normalize a pattern | `tq check priority "raised,in:High"` |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag (`text` or `json`). Without it
//! the `default_format` config key applies.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! tq --verbose search --status to:Resolved
//! ```

mod app;
mod check;
mod output;
mod search;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
pub use search::SearchArgs;
