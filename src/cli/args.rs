/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::smufl::DEFAULT_METADATA_URL;

const DETAILS: &str = "\
Details:

  The Glyphs font creation software allows for the expansion of its standard
  glyph database and custom categorisation in its left sidebar by providing
  custom GlyphData.xml and Groups.plist files.

  This tool generates those files from the SMuFL (Standard Music Font Layout)
  metadata and adds them to Glyphs' Application Support directory. If there
  are existing files that would be overwritten, it asks how to handle each
  conflict.";

/// smufl-glyphs — set up SMuFL support in the Glyphs font editor.
#[derive(Debug, Parser)]
#[command(
    name = "smufl-glyphs",
    about = "Install SMuFL glyph data and sidebar groups into Glyphs",
    version,
    after_help = DETAILS
)]
pub struct Cli {
    /// Install without user input, overwriting any existing files.
    #[arg(short, long)]
    pub force: bool,

    /// Install into DIR instead of Glyphs' Application Support directory.
    #[arg(long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Base URL of the SMuFL metadata directory.
    #[arg(
        long,
        global = true,
        value_name = "URL",
        env = "SMUFL_METADATA_URL",
        default_value = DEFAULT_METADATA_URL
    )]
    pub source_url: String,

    /// Read glyphnames.json and ranges.json from DIR instead of fetching them.
    /// Takes precedence over --source-url.
    #[arg(long, global = true, value_name = "DIR")]
    pub metadata_dir: Option<PathBuf>,

    /// Output format. Auto-detects: table when TTY, json when piped.
    #[arg(long, global = true, value_name = "FORMAT", default_value = "auto")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, global = true, conflicts_with = "output")]
    pub json: bool,

    /// Log debug diagnostics and step timings to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Auto-detect: table when stdout is a TTY, json when piped.
    #[default]
    Auto,
    /// Human-readable table and tagged notices.
    Table,
    /// Pretty JSON summary; notices as one JSON object per line.
    Json,
}

/// Subcommands. Without one, the files are generated and installed.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate GlyphData.xml and Groups.plist without installing them.
    Build(BuildArgs),
}

/// Arguments for `smufl-glyphs build`.
#[derive(Debug, Parser)]
pub struct BuildArgs {
    /// Directory to write the generated files to (created if missing).
    #[arg(long, value_name = "DIR", default_value = "dist")]
    pub out_dir: PathBuf,
}
