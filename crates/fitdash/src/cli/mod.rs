//! # CLI Layer
//!
//! This module is **one possible UI client** for fitdash. It is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs a tracing subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap derive in `setup.rs`
//! 2. **Context Setup**: config, data directory and store wiring in `commands.rs`
//! 3. **Dispatch**: one handler per subcommand in `commands.rs`
//! 4. **Output Formatting**: `render.rs` for text, `serde_json` for `--json`
//!
//! Running `fitdash` with no subcommand shows `stats`.
//!
//! ## Data Directory
//!
//! Resolved in this order: `--data-dir`, then `data_dir` from the config
//! (`FITDASH_DATA_DIR` or `fitdash.toml`), then the OS data directory.

mod commands;
mod logging;
mod render;
mod setup;
mod styles;

pub use commands::run;
