/// Human-readable notices emitted for every copy, skip, and creation.
use serde::Serialize;

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Fixed-width tag used in text output.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Info => " INFO ",
            Self::Warn => " WARN ",
            Self::Error => " ERROR ",
        }
    }
}

/// One line of user-facing output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warn,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Sink for notices. Shared across the installer's worker threads.
pub trait Notify: Sync {
    fn notify(&self, notice: Notice);
}

/// Collects notices in memory.
#[cfg(test)]
#[derive(Default)]
pub struct RecordedNotices(std::sync::Mutex<Vec<Notice>>);

#[cfg(test)]
impl RecordedNotices {
    #[must_use]
    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

#[cfg(test)]
impl Notify for RecordedNotices {
    fn notify(&self, notice: Notice) {
        self.0.lock().unwrap().push(notice);
    }
}
