/// Installer: places generated files into a destination directory without
/// silently overwriting anything the user may have edited.
///
/// Modes:
///
/// 1. **Forced** (`force_overwrite`): every file is copied over whatever is
///    there, concurrently.
/// 2. **Fresh destination**: the directory was just created, so nothing can
///    conflict; same as forced, without probing.
/// 3. **Safe copy**: probe the destination for each file, copy the missing
///    ones create-only, skip byte-identical ones, and ask about the rest in a
///    single batch before overwriting anything.
pub mod errors;
pub mod fsops;
pub mod prompt;

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

pub use errors::InstallError;
pub use fsops::ensure_destination;
pub use prompt::{Prompter, Question};

use crate::notice::{Notice, Notify};
use fsops::{Probe, copy_exclusive, copy_overwrite, file_name, io_at, probe, target_path};

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallDecision {
    /// Nothing was in the way; copied.
    Copy,
    /// The destination already held identical bytes.
    SkipIdentical,
    /// The user chose to keep the existing file.
    SkipDeclined,
    /// The user chose to replace the existing file.
    OverwriteConfirmed,
}

impl InstallDecision {
    /// Whether the file was written during this run.
    #[must_use]
    pub fn copied(self) -> bool {
        matches!(self, Self::Copy | Self::OverwriteConfirmed)
    }
}

/// A file that already exists at the destination, with the bytes found there.
#[derive(Debug, Clone)]
pub struct ConflictRecord {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub existing: Vec<u8>,
}

/// Outcome for a single installed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub file_name: String,
    pub decision: InstallDecision,
}

/// Summary of one installation run.
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub destination: PathBuf,
    /// Whether the destination directory was created by this run.
    pub created: bool,
    /// Number of conflict probes performed.
    pub probes: usize,
    /// One entry per input file, in input order.
    pub outcomes: Vec<FileOutcome>,
}

/// Install `files` into `destination`.
///
/// # Errors
///
/// Returns `InstallError` on any unexpected filesystem or prompt failure.
/// Files copied before the failure are left in place.
pub fn install_all(
    files: &[PathBuf],
    destination: &Path,
    force_overwrite: bool,
    prompter: &mut dyn Prompter,
    notices: &dyn Notify,
) -> Result<InstallReport, InstallError> {
    let state = ensure_destination(destination, notices)?;

    let mut report = InstallReport {
        destination: destination.to_path_buf(),
        created: state.created,
        probes: 0,
        outcomes: Vec::with_capacity(files.len()),
    };

    if force_overwrite || state.created {
        report.outcomes = copy_all(files, destination, notices)?;
    } else {
        safe_copy(files, destination, prompter, notices, &mut report)?;
    }

    report.outcomes.sort_by_key(|outcome| {
        files
            .iter()
            .position(|f| file_name(f) == outcome.file_name)
            .unwrap_or(usize::MAX)
    });
    Ok(report)
}

/// Copy every file concurrently, overwriting.
fn copy_all(files: &[PathBuf], destination: &Path, notices: &dyn Notify) -> Result<Vec<FileOutcome>, InstallError> {
    files
        .par_iter()
        .map(|file| {
            let target = target_path(file, destination)?;
            copy_overwrite(file, &target)?;
            Ok::<_, InstallError>(copied(file, destination, InstallDecision::Copy, notices))
        })
        .collect()
}

fn safe_copy(
    files: &[PathBuf],
    destination: &Path,
    prompter: &mut dyn Prompter,
    notices: &dyn Notify,
    report: &mut InstallReport,
) -> Result<(), InstallError> {
    // 1. Probe every destination path.
    let probed = files
        .par_iter()
        .map(|file| {
            let target = target_path(file, destination)?;
            let found = probe(&target)?;
            Ok::<_, InstallError>((file, target, found))
        })
        .collect::<Result<Vec<_>, InstallError>>()?;
    report.probes = probed.len();

    let mut safe = Vec::new();
    let mut conflicts = Vec::new();
    for (file, target, found) in probed {
        match found {
            Probe::Missing => safe.push((file, target)),
            Probe::Existing(existing) => conflicts.push(ConflictRecord {
                source: file.clone(),
                destination: target,
                existing,
            }),
        }
    }
    debug!("{} safe file(s), {} conflict(s)", safe.len(), conflicts.len());

    // 2. Copy the safe set; never clobber something that appeared since.
    let safe_outcomes = safe
        .par_iter()
        .map(|(file, target)| {
            copy_exclusive(file, target)?;
            Ok::<_, InstallError>(copied(file, destination, InstallDecision::Copy, notices))
        })
        .collect::<Result<Vec<_>, InstallError>>()?;
    report.outcomes.extend(safe_outcomes);

    // 3. Skip conflicts whose bytes already match.
    let compared = conflicts
        .into_par_iter()
        .map(|conflict| {
            let ours = fs::read(&conflict.source).map_err(io_at(&conflict.source))?;
            let identical = ours == conflict.existing;
            Ok::<_, InstallError>((conflict, identical))
        })
        .collect::<Result<Vec<_>, InstallError>>()?;

    let mut pending = Vec::new();
    for (conflict, identical) in compared {
        if identical {
            let name = file_name(&conflict.source);
            notices.notify(Notice::info(format!(
                "Skipped copying {name} as it is already installed"
            )));
            report.outcomes.push(FileOutcome {
                file_name: name,
                decision: InstallDecision::SkipIdentical,
            });
        } else {
            pending.push(conflict);
        }
    }

    if pending.is_empty() {
        return Ok(());
    }

    // 4. One batch of questions; nothing is overwritten until all are answered.
    let questions: Vec<Question> = pending
        .iter()
        .map(|conflict| Question {
            id: conflict.source.clone(),
            message: format!(
                "A different {} was found. Are you sure you want to overwrite it?",
                file_name(&conflict.source)
            ),
        })
        .collect();
    let answers = prompter.confirm_batch(&questions).map_err(InstallError::Prompt)?;

    // 5. Apply the answers.
    for conflict in pending {
        let overwrite = answers.get(&conflict.source).copied().unwrap_or(false);
        if overwrite {
            copy_overwrite(&conflict.source, &conflict.destination)?;
            let outcome = copied(
                &conflict.source,
                destination,
                InstallDecision::OverwriteConfirmed,
                notices,
            );
            report.outcomes.push(outcome);
        } else {
            let name = file_name(&conflict.source);
            notices.notify(Notice::warn(format!("Did not copy {name}. It was not installed.")));
            report.outcomes.push(FileOutcome {
                file_name: name,
                decision: InstallDecision::SkipDeclined,
            });
        }
    }
    Ok(())
}

fn copied(file: &Path, destination: &Path, decision: InstallDecision, notices: &dyn Notify) -> FileOutcome {
    let name = file_name(file);
    notices.notify(Notice::info(format!("Copied {name} to {}", destination.display())));
    FileOutcome {
        file_name: name,
        decision,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io;

    use super::*;
    use crate::notice::{RecordedNotices, Severity};

    /// Answers by file name and records every question it is asked.
    #[derive(Default)]
    struct ScriptedPrompter {
        answers: HashMap<&'static str, bool>,
        asked: Vec<String>,
    }

    impl ScriptedPrompter {
        fn answering(answers: &[(&'static str, bool)]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn confirm(&mut self, message: &str) -> io::Result<bool> {
            self.asked.push(message.to_owned());
            let answer = self
                .answers
                .iter()
                .find(|(name, _)| message.contains(*name))
                .map(|(_, answer)| *answer);
            answer.ok_or_else(|| io::Error::other(format!("unexpected question: {message}")))
        }
    }

    struct Fixture {
        _root: tempfile::TempDir,
        files: Vec<PathBuf>,
        dest: PathBuf,
    }

    /// Staged `GlyphData.xml` and `Groups.plist`, plus a destination path
    /// that does not exist yet.
    fn fixture() -> Fixture {
        let root = tempfile::tempdir().unwrap();
        let staging = root.path().join("staging");
        fs::create_dir(&staging).unwrap();
        let files = vec![staging.join("GlyphData.xml"), staging.join("Groups.plist")];
        fs::write(&files[0], "<glyphData new/>").unwrap();
        fs::write(&files[1], "<plist new/>").unwrap();
        let dest = root.path().join("Info");
        Fixture {
            _root: root,
            files,
            dest,
        }
    }

    fn decisions(report: &InstallReport) -> Vec<InstallDecision> {
        report.outcomes.iter().map(|o| o.decision).collect()
    }

    #[test]
    fn test_fresh_destination_copies_without_probing() {
        let fx = fixture();
        let mut prompter = ScriptedPrompter::default();
        let notices = RecordedNotices::default();

        let report = install_all(&fx.files, &fx.dest, false, &mut prompter, &notices).unwrap();

        assert!(report.created);
        assert_eq!(report.probes, 0);
        assert_eq!(decisions(&report), [InstallDecision::Copy, InstallDecision::Copy]);
        assert_eq!(fs::read_to_string(fx.dest.join("Groups.plist")).unwrap(), "<plist new/>");
        assert!(prompter.asked.is_empty());
        // One "Created" plus one "Copied" per file.
        assert_eq!(notices.take().len(), 3);
    }

    #[test]
    fn test_force_overwrites_old_versions_without_prompting() {
        let fx = fixture();
        fs::create_dir(&fx.dest).unwrap();
        fs::write(fx.dest.join("GlyphData.xml"), "old").unwrap();
        fs::write(fx.dest.join("Groups.plist"), "old").unwrap();
        let mut prompter = ScriptedPrompter::default();
        let notices = RecordedNotices::default();

        let report = install_all(&fx.files, &fx.dest, true, &mut prompter, &notices).unwrap();

        assert!(!report.created);
        assert_eq!(report.probes, 0);
        assert_eq!(fs::read_to_string(fx.dest.join("GlyphData.xml")).unwrap(), "<glyphData new/>");
        assert_eq!(fs::read_to_string(fx.dest.join("Groups.plist")).unwrap(), "<plist new/>");
        assert!(prompter.asked.is_empty());
        let notices = notices.take();
        assert_eq!(notices.len(), 2);
        assert!(notices.iter().all(|n| n.severity == Severity::Info));
    }

    #[test]
    fn test_safe_copy_into_existing_empty_destination() {
        let fx = fixture();
        fs::create_dir(&fx.dest).unwrap();
        let mut prompter = ScriptedPrompter::default();
        let notices = RecordedNotices::default();

        let report = install_all(&fx.files, &fx.dest, false, &mut prompter, &notices).unwrap();

        assert_eq!(report.probes, 2);
        assert_eq!(decisions(&report), [InstallDecision::Copy, InstallDecision::Copy]);
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn test_identical_file_is_skipped_with_one_notice() {
        let fx = fixture();
        fs::create_dir(&fx.dest).unwrap();
        let installed = fx.dest.join("GlyphData.xml");
        fs::copy(&fx.files[0], &installed).unwrap();
        let before = fs::metadata(&installed).unwrap().modified().unwrap();
        let mut prompter = ScriptedPrompter::default();
        let notices = RecordedNotices::default();

        let report = install_all(&fx.files[..1], &fx.dest, false, &mut prompter, &notices).unwrap();

        assert_eq!(decisions(&report), [InstallDecision::SkipIdentical]);
        assert_eq!(fs::read_to_string(&installed).unwrap(), "<glyphData new/>");
        assert_eq!(fs::metadata(&installed).unwrap().modified().unwrap(), before);
        assert!(prompter.asked.is_empty());
        assert_eq!(
            notices.take(),
            [Notice::info("Skipped copying GlyphData.xml as it is already installed")]
        );
    }

    #[test]
    fn test_declined_conflict_keeps_existing_file() {
        let fx = fixture();
        fs::create_dir(&fx.dest).unwrap();
        fs::write(fx.dest.join("Groups.plist"), "<plist new!>").unwrap();
        let mut prompter = ScriptedPrompter::answering(&[("Groups.plist", false)]);
        let notices = RecordedNotices::default();

        let report = install_all(&fx.files, &fx.dest, false, &mut prompter, &notices).unwrap();

        assert_eq!(
            prompter.asked,
            ["A different Groups.plist was found. Are you sure you want to overwrite it?"]
        );
        assert_eq!(decisions(&report), [InstallDecision::Copy, InstallDecision::SkipDeclined]);
        assert_eq!(fs::read_to_string(fx.dest.join("Groups.plist")).unwrap(), "<plist new!>");
        let warnings: Vec<Notice> = notices
            .take()
            .into_iter()
            .filter(|n| n.severity == Severity::Warn)
            .collect();
        assert_eq!(warnings, [Notice::warn("Did not copy Groups.plist. It was not installed.")]);
    }

    #[test]
    fn test_confirmed_conflict_overwrites() {
        let fx = fixture();
        fs::create_dir(&fx.dest).unwrap();
        fs::write(fx.dest.join("GlyphData.xml"), "<glyphData old/>").unwrap();
        fs::write(fx.dest.join("Groups.plist"), "<plist old/>").unwrap();
        let mut prompter = ScriptedPrompter::answering(&[("GlyphData.xml", true), ("Groups.plist", false)]);
        let notices = RecordedNotices::default();

        let report = install_all(&fx.files, &fx.dest, false, &mut prompter, &notices).unwrap();

        assert_eq!(prompter.asked.len(), 2);
        assert_eq!(
            decisions(&report),
            [InstallDecision::OverwriteConfirmed, InstallDecision::SkipDeclined]
        );
        assert_eq!(fs::read_to_string(fx.dest.join("GlyphData.xml")).unwrap(), "<glyphData new/>");
        assert_eq!(fs::read_to_string(fx.dest.join("Groups.plist")).unwrap(), "<plist old/>");
    }

    /// Accepts every question, snapshotting the installed files as it answers.
    struct WatchingPrompter {
        dest: PathBuf,
        seen: Vec<(String, String)>,
    }

    impl Prompter for WatchingPrompter {
        fn confirm(&mut self, _message: &str) -> io::Result<bool> {
            self.seen.push((
                fs::read_to_string(self.dest.join("GlyphData.xml"))?,
                fs::read_to_string(self.dest.join("Groups.plist"))?,
            ));
            Ok(true)
        }
    }

    #[test]
    fn test_no_overwrite_until_every_question_is_answered() {
        let fx = fixture();
        fs::create_dir(&fx.dest).unwrap();
        fs::write(fx.dest.join("GlyphData.xml"), "<glyphData old/>").unwrap();
        fs::write(fx.dest.join("Groups.plist"), "<plist old/>").unwrap();
        let mut prompter = WatchingPrompter {
            dest: fx.dest.clone(),
            seen: Vec::new(),
        };

        let report = install_all(&fx.files, &fx.dest, false, &mut prompter, &RecordedNotices::default()).unwrap();

        let old = ("<glyphData old/>".to_owned(), "<plist old/>".to_owned());
        assert_eq!(prompter.seen, [old.clone(), old]);
        assert_eq!(
            decisions(&report),
            [InstallDecision::OverwriteConfirmed, InstallDecision::OverwriteConfirmed]
        );
        assert_eq!(fs::read_to_string(fx.dest.join("GlyphData.xml")).unwrap(), "<glyphData new/>");
        assert_eq!(fs::read_to_string(fx.dest.join("Groups.plist")).unwrap(), "<plist new/>");
    }

    #[test]
    fn test_prompt_failure_is_fatal_and_writes_nothing() {
        let fx = fixture();
        fs::create_dir(&fx.dest).unwrap();
        fs::write(fx.dest.join("GlyphData.xml"), "<glyphData old/>").unwrap();
        // No scripted answers: the prompter errors on the first question.
        let mut prompter = ScriptedPrompter::default();

        let err = install_all(&fx.files[..1], &fx.dest, false, &mut prompter, &RecordedNotices::default())
            .unwrap_err();

        assert!(matches!(err, InstallError::Prompt(_)));
        assert_eq!(fs::read_to_string(fx.dest.join("GlyphData.xml")).unwrap(), "<glyphData old/>");
    }

    #[test]
    fn test_destination_that_is_a_file_is_fatal() {
        let fx = fixture();
        fs::write(&fx.dest, "not a directory").unwrap();
        let mut prompter = ScriptedPrompter::default();

        let result = install_all(&fx.files, &fx.dest, false, &mut prompter, &RecordedNotices::default());

        assert!(matches!(result, Err(InstallError::Io { .. })));
    }
}
