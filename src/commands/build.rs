/// `build` command: generate the artifacts into a directory without installing.
use std::fs;
use std::path::Path;

use crate::cli::OutputCtx;
use crate::cli::args::BuildArgs;
use crate::cli::output::write_build;
use crate::notice::{Notice, Notify};
use crate::smufl::{MetadataSource, SmuflError, build_documents, write_documents};
use crate::types::BuildOutput;

/// Run `smufl-glyphs build`.
///
/// # Errors
///
/// Returns `SmuflError` if the metadata cannot be loaded or the output
/// directory cannot be written.
pub fn run(args: &BuildArgs, source: &dyn MetadataSource, ctx: &OutputCtx) -> Result<(), SmuflError> {
    let timer = ctx.timer("build");
    let output = build_into(&args.out_dir, source, ctx)?;
    drop(timer);
    write_build(&output, &args.out_dir, ctx);
    Ok(())
}

/// Generate both documents and write them to `out_dir`.
///
/// The directory is only created once both documents exist in memory.
fn build_into(out_dir: &Path, source: &dyn MetadataSource, notices: &dyn Notify) -> Result<Vec<BuildOutput>, SmuflError> {
    let documents = build_documents(source)?;

    fs::create_dir_all(out_dir).map_err(|source| SmuflError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let paths = write_documents(&documents, out_dir)?;

    Ok(documents
        .iter()
        .zip(paths)
        .map(|(doc, path)| {
            notices.notify(Notice::info(format!(
                "Saved {} to {}",
                doc.file_name,
                out_dir.display()
            )));
            BuildOutput {
                file_name: doc.file_name.to_owned(),
                path: path.display().to_string(),
                bytes: doc.contents.len(),
            }
        })
        .collect())
}
