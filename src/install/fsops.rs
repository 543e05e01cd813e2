/// Filesystem primitives for the installer.
///
/// Every `io::Error` is classified by kind into [`FsFailure`]; callers match on
/// the two expected cases and treat everything else as fatal.
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use super::errors::InstallError;
use crate::notice::{Notice, Notify};

/// An `io::Error` sorted into the cases the installer cares about.
#[derive(Debug)]
pub enum FsFailure {
    NotFound,
    AlreadyExists,
    Other(io::Error),
}

impl From<io::Error> for FsFailure {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::AlreadyExists => Self::AlreadyExists,
            _ => Self::Other(err),
        }
    }
}

impl FsFailure {
    /// Turn an unexpected failure into a fatal installer error on `path`.
    fn at(self, path: &Path) -> InstallError {
        let source = match self {
            Self::NotFound => io::ErrorKind::NotFound.into(),
            Self::AlreadyExists => io::ErrorKind::AlreadyExists.into(),
            Self::Other(err) => err,
        };
        InstallError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub(super) fn io_at(path: &Path) -> impl FnOnce(io::Error) -> InstallError + '_ {
    move |source| InstallError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Result of [`ensure_destination`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationState {
    /// `true` if the directory did not exist before this run.
    pub created: bool,
}

/// Create the destination directory (one level, like `mkdir`).
///
/// # Errors
///
/// Any failure other than "already exists" is fatal.
pub fn ensure_destination(path: &Path, notices: &dyn Notify) -> Result<DestinationState, InstallError> {
    match fs::create_dir(path).map_err(FsFailure::from) {
        Ok(()) => {
            notices.notify(Notice::info(format!("Created {}", path.display())));
            Ok(DestinationState { created: true })
        }
        Err(FsFailure::AlreadyExists) => Ok(DestinationState { created: false }),
        Err(failure) => Err(failure.at(path)),
    }
}

/// What a conflict probe found at the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Missing,
    Existing(Vec<u8>),
}

/// Read whatever is at `path`.
///
/// # Errors
///
/// Any failure other than "not found" is fatal.
pub fn probe(path: &Path) -> Result<Probe, InstallError> {
    match fs::read(path).map_err(FsFailure::from) {
        Ok(bytes) => Ok(Probe::Existing(bytes)),
        Err(FsFailure::NotFound) => Ok(Probe::Missing),
        Err(failure) => Err(failure.at(path)),
    }
}

/// Copy `source` to `dest`, failing if `dest` exists.
///
/// # Errors
///
/// Returns `InstallError::Io` on any failure, including a file that appeared
/// at `dest` since it was probed.
pub fn copy_exclusive(source: &Path, dest: &Path) -> Result<(), InstallError> {
    let mut reader = File::open(source).map_err(io_at(source))?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest)
        .map_err(io_at(dest))?;
    io::copy(&mut reader, &mut writer).map_err(io_at(dest))?;
    Ok(())
}

/// Copy `source` to `dest`, replacing anything there.
///
/// # Errors
///
/// Returns `InstallError::Io` on any failure.
pub fn copy_overwrite(source: &Path, dest: &Path) -> Result<(), InstallError> {
    fs::copy(source, dest).map_err(io_at(dest))?;
    Ok(())
}

/// Path `file` will be installed at inside `dir`.
///
/// # Errors
///
/// Returns `InstallError::Io` if `file` has no file name.
pub fn target_path(file: &Path, dir: &Path) -> Result<PathBuf, InstallError> {
    file.file_name()
        .map(|name| dir.join(name))
        .ok_or_else(|| InstallError::Io {
            path: file.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        })
}

/// Display name of an installed file.
#[must_use]
pub fn file_name(file: &Path) -> String {
    file.file_name()
        .map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned())
}
