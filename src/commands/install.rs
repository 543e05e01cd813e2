/// Default command: generate the artifacts and install them into Glyphs.
use std::path::Path;

use tracing::debug;

use crate::cli::output::write_report;
use crate::cli::{Cli, OutputCtx, TerminalPrompter};
use crate::install::{InstallError, InstallReport, Prompter, install_all};
use crate::notice::{Notice, Notify};
use crate::platform;
use crate::smufl::{MetadataSource, SmuflError, build_documents, write_documents};

const START_QUESTION: &str =
    "This script will set up SMuFL support in Glyphs. Do you want to continue?";

/// Run the installer.
///
/// # Errors
///
/// Returns `SmuflError` on a platform mismatch, a missing home directory, a
/// metadata failure, or a fatal installer error.
pub fn run(cli: &Cli, ctx: &OutputCtx) -> Result<(), SmuflError> {
    platform::ensure_supported()?;
    let destination = match &cli.dest {
        Some(dir) => dir.clone(),
        None => platform::glyphs_info_dir()?,
    };
    let source = super::metadata_source(cli)?;
    let mut prompter = TerminalPrompter::stdio();

    let timer = ctx.timer("install");
    let installed = install(source.as_ref(), &destination, cli.force, &mut prompter, ctx)?;
    drop(timer);

    if let Some(report) = installed {
        write_report(&report, ctx);
    }
    Ok(())
}

/// Ask to start (unless forced), generate, stage, and install.
///
/// Returns `None` when the user declines to start.
///
/// # Errors
///
/// Propagates metadata, staging, and installer failures.
pub fn install(
    source: &dyn MetadataSource,
    destination: &Path,
    force: bool,
    prompter: &mut dyn Prompter,
    notices: &dyn Notify,
) -> Result<Option<InstallReport>, SmuflError> {
    if force {
        notices.notify(Notice::warn(
            "Installing with --force flag. Any checks for conflicts will be skipped.",
        ));
    } else {
        let start = prompter.confirm(START_QUESTION).map_err(InstallError::Prompt)?;
        if !start {
            notices.notify(Notice::info("Installation cancelled. Nothing was changed."));
            return Ok(None);
        }
    }

    let documents = build_documents(source)?;

    let staging = tempfile::tempdir().map_err(|source| SmuflError::Io {
        path: std::env::temp_dir(),
        source,
    })?;
    let files = write_documents(&documents, staging.path())?;
    debug!("Staged {} file(s) in {}", files.len(), staging.path().display());

    let report = install_all(&files, destination, force, prompter, notices)?;
    Ok(Some(report))
}
