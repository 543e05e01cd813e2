/// CLI layer: argument parsing, prompts, and output formatting.
pub mod args;
pub mod output;
pub mod prompt;

pub use args::Cli;
pub use output::{OutputCtx, write_error};
pub use prompt::TerminalPrompter;
