/// Output formatting: tagged notices, report tables, JSON. TTY detection.
use std::io::{IsTerminal, Write};
use std::path::Path;

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;
use tracing::debug;

use super::args::OutputFormat;
use crate::install::{InstallDecision, InstallReport};
use crate::notice::{Notice, Notify};
use crate::smufl::SmuflError;
use crate::types::{BuildOutput, ErrorOutput};

/// Left margin of text notices.
const PAD: &str = "    ";

/// Resolve the effective output format, handling `--json` flag and TTY auto-detection.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        return OutputFormat::Json;
    }
    if fmt == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        fmt
    }
}

/// Output context passed to all commands. Also the CLI's notice sink.
pub struct OutputCtx {
    pub format: OutputFormat,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
        }
    }

    /// Start a named timer. Logs elapsed time at debug level on drop.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label)
    }

    fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

impl Notify for OutputCtx {
    fn notify(&self, notice: Notice) {
        write_notice(&notice, self.is_json());
    }
}

// --- Notices ---

/// Write one notice to stderr: a tagged line, or a compact JSON object.
pub fn write_notice(notice: &Notice, json: bool) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    if json {
        match serde_json::to_string(notice) {
            Ok(s) => {
                let _ = writeln!(out, "{s}");
            }
            Err(e) => {
                let _ = writeln!(out, "JSON serialization error: {e}");
            }
        }
    } else {
        let _ = writeln!(out, "{PAD}{:<7} {}", notice.severity.tag(), notice.message);
    }
}

// --- Install report ---

/// Write the installation summary to stdout.
pub fn write_report(report: &InstallReport, ctx: &OutputCtx) {
    if ctx.is_json() {
        print_json(report);
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(["FILE", "RESULT"]);
    for outcome in &report.outcomes {
        table.add_row([outcome.file_name.as_str(), decision_label(outcome.decision)]);
    }
    println!("{table}");

    let installed = report.outcomes.iter().filter(|o| o.decision.copied()).count();
    println!(
        "{installed} of {} file(s) installed in {}",
        report.outcomes.len(),
        report.destination.display()
    );
}

fn decision_label(decision: InstallDecision) -> &'static str {
    match decision {
        InstallDecision::Copy => "copied",
        InstallDecision::SkipIdentical => "already installed",
        InstallDecision::SkipDeclined => "kept existing",
        InstallDecision::OverwriteConfirmed => "overwritten",
    }
}

// --- Build output ---

/// Write the list of generated files to stdout.
pub fn write_build(files: &[BuildOutput], out_dir: &Path, ctx: &OutputCtx) {
    if ctx.is_json() {
        print_json(files);
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(["FILE", "BYTES"]);
    for file in files {
        table.add_row([file.file_name.clone(), file.bytes.to_string()]);
    }
    println!("{table}");
    println!("Generated in {}", out_dir.display());
}

// --- Error output ---

/// Write a fatal error to stderr: an `ERROR` notice, or the JSON envelope.
pub fn write_error(err: &SmuflError, ctx: &OutputCtx) {
    if ctx.is_json() {
        let envelope = ErrorOutput::from_error(err);
        let s = serde_json::to_string_pretty(&envelope).unwrap_or_default();
        let _ = writeln!(std::io::stderr().lock(), "{s}");
    } else {
        write_notice(&Notice::error(err.to_string()), false);
        if matches!(err, SmuflError::UnsupportedPlatform) {
            eprintln!("{}", crate::platform::support_instructions());
        }
    }
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Created via [`OutputCtx::timer`]. Only visible with `--debug`.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        debug!("{}: {ms:.2}ms", self.label);
    }
}

// --- Generic JSON helpers ---

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}
