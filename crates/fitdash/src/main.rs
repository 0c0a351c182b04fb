//! # Fitdash CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/fitdashapp/`: library with the snapshot store, mutations and metrics
//! - `crates/fitdash/`: this CLI, depending on `fitdashapp`
//!
//! Everything in `fitdashapp` is UI agnostic. The CLI owns argument parsing,
//! rendering, logging setup and exit codes.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
