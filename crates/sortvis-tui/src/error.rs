//! Frontend errors and their exit behavior.

use std::fmt;
use std::io;
use std::process;

use sortvis_algorithm::RegistryError;
use sortvis_engine::StartupError;

/// Everything that can stop the frontend.
#[derive(Debug)]
pub enum CliError {
    /// Log directory or file could not be prepared.
    LoggingInit(io::Error),
    /// An environment setting could not be parsed.
    Config(String),
    /// The animator refused to start.
    Startup(StartupError),
    /// Terminal setup, drawing or event polling failed.
    Terminal(io::Error),
}

impl CliError {
    /// Print the error and exit with status 1.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {self}");
        if let CliError::Startup(StartupError::HelpUnavailable { .. }) = self {
            eprintln!();
            eprintln!("Set SORTVIS_HELP to the path of a readable help text file.");
        }
        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(e) => write!(f, "failed to initialize logging: {e}"),
            CliError::Config(msg) => write!(f, "configuration error: {msg}"),
            CliError::Startup(e) => write!(f, "startup failed: {e}"),
            CliError::Terminal(e) => write!(f, "terminal error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoggingInit(e) | CliError::Terminal(e) => Some(e),
            CliError::Startup(e) => Some(e),
            CliError::Config(_) => None,
        }
    }
}

impl From<StartupError> for CliError {
    fn from(e: StartupError) -> Self {
        CliError::Startup(e)
    }
}

impl From<RegistryError> for CliError {
    fn from(e: RegistryError) -> Self {
        CliError::Startup(StartupError::Registry(e))
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Terminal(e)
    }
}
