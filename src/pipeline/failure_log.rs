//! Per-batch log of skipped recordings.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::error::{Error, Result};

/// Stage at which a recording failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Annotation could not be read or violates the event contract.
    Annotation,
    /// Scene audio could not be synthesized.
    Synthesis,
    /// Scene audio could not be decoded.
    Decode,
    /// Scene audio could not be deleted after decoding.
    Deletion,
    /// A clip could not be written.
    ClipWrite,
}

impl FailureKind {
    /// Name used as the failure log line prefix.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Annotation => "Annotation",
            Self::Synthesis => "Synthesis",
            Self::Decode => "Decode",
            Self::Deletion => "Deletion",
            Self::ClipWrite => "ClipWrite",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure confined to one recording (or one of its clips).
#[derive(Debug)]
pub struct RecordingFailure {
    /// Failing stage.
    pub kind: FailureKind,
    /// File the failure concerns.
    pub path: PathBuf,
    /// Underlying error.
    pub error: Error,
}

impl RecordingFailure {
    /// Create a failure record.
    pub fn new(kind: FailureKind, path: impl Into<PathBuf>, error: Error) -> Self {
        Self {
            kind,
            path: path.into(),
            error,
        }
    }

    /// Failure log line, without the trailing newline.
    pub fn log_line(&self) -> String {
        format!("{}:{}", self.kind, self.path.display())
    }
}

/// Append-only failure log shared by all workers of a batch.
///
/// The file is created on the first entry, so a clean batch leaves no log.
#[derive(Debug)]
pub struct FailureLog {
    path: PathBuf,
    state: Mutex<LogState>,
}

#[derive(Debug, Default)]
struct LogState {
    file: Option<File>,
    entries: usize,
}

impl FailureLog {
    /// Create a log writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: Mutex::new(LogState::default()),
        }
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries recorded so far.
    pub fn entries(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
    }

    /// Emit `failure` as a warning and append its line to the log.
    pub fn record(&self, failure: &RecordingFailure) -> Result<()> {
        warn!(
            kind = %failure.kind,
            path = %failure.path.display(),
            error = %failure.error,
            "Skipping: {}",
            failure.log_line()
        );

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.file.is_none() {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| Error::OutputDirCreateFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            state.file = Some(file);
        }

        if let Some(file) = state.file.as_mut() {
            writeln!(file, "{}", failure.log_line())?;
            state.entries += 1;
        }
        Ok(())
    }
}
