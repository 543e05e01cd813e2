#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! smufl-glyphs — set up SMuFL support in the Glyphs font editor.

mod cli;
mod commands;
mod install;
mod notice;
mod platform;
mod smufl;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, OutputCtx, write_error};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let ctx = OutputCtx::new(cli.output, cli.json);

    match commands::dispatch(&cli, &ctx) {
        Ok(()) => {}
        Err(err) => {
            write_error(&err, &ctx);
            std::process::exit(err.exit_code());
        }
    }
}

/// Diagnostics go to stderr. `--debug` wins over `RUST_LOG`; the default
/// shows warnings only.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("smufl_glyphs=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
