//! Error types for run execution.

use std::error::Error;
use std::fmt;

/// Failure to start or collect a sorting run.
///
/// Plug-in panics are not errors at this level: they are contained to
/// their lane and reported in the run report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunError {
    /// The operating system refused to start a run thread.
    ThreadSpawnFailed {
        /// Reason reported by the spawn call.
        reason: String,
    },
    /// The run thread exited without delivering its report.
    RunThreadLost,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "failed to spawn run thread: {reason}")
            }
            Self::RunThreadLost => write!(f, "run thread exited without a report"),
        }
    }
}

impl Error for RunError {}

impl From<std::io::Error> for RunError {
    fn from(e: std::io::Error) -> Self {
        Self::ThreadSpawnFailed {
            reason: e.to_string(),
        }
    }
}
