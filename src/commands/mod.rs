/// Command dispatch: routes the parsed CLI to its implementation.
pub mod build;
pub mod install;

use crate::cli::Cli;
use crate::cli::OutputCtx;
use crate::cli::args::Command;
use crate::smufl::{DirSource, HttpSource, MetadataSource, SmuflError};

/// Dispatch the parsed CLI. No subcommand means install.
///
/// # Errors
///
/// Returns `SmuflError` on any command failure.
pub fn dispatch(cli: &Cli, ctx: &OutputCtx) -> Result<(), SmuflError> {
    match &cli.command {
        Some(Command::Build(args)) => {
            let source = metadata_source(cli)?;
            build::run(args, source.as_ref(), ctx)
        }
        None => install::run(cli, ctx),
    }
}

/// `--metadata-dir` if given, otherwise the metadata URL.
fn metadata_source(cli: &Cli) -> Result<Box<dyn MetadataSource>, SmuflError> {
    match &cli.metadata_dir {
        Some(dir) => Ok(Box::new(DirSource::new(dir))),
        None => Ok(Box::new(HttpSource::new(&cli.source_url)?)),
    }
}
