/// The confirmation-prompt seam between the installer and the terminal.
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

/// A yes/no question about one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Identifies the file; answers are keyed by it.
    pub id: PathBuf,
    pub message: String,
}

/// Asks the user yes/no questions.
pub trait Prompter {
    /// Ask a single question.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the session breaks.
    fn confirm(&mut self, message: &str) -> io::Result<bool>;

    /// Ask every question in one session, in order, before returning.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the session breaks.
    fn confirm_batch(&mut self, questions: &[Question]) -> io::Result<HashMap<PathBuf, bool>> {
        let mut answers = HashMap::with_capacity(questions.len());
        for question in questions {
            let answer = self.confirm(&question.message)?;
            answers.insert(question.id.clone(), answer);
        }
        Ok(answers)
    }
}
