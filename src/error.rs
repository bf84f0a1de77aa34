use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SvntlError>;

#[derive(Error, Debug)]
pub enum SvntlError {
    #[error("No such repository: {0}")]
    RepositoryUnavailable(String),
    #[error("No such revision: r{0}")]
    NoSuchRevision(u64),
    #[error("Command failed with {status}: {command}")]
    CommandFailed { command: String, status: ExitStatus },
    #[error("Command could not be spawned: {command}: {source}")]
    CommandSpawn {
        command: String,
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Chart error: {0}")]
    Chart(String),
}

impl SvntlError {
    /// True for failures raised by the command executor layer.
    pub fn is_command_failure(&self) -> bool {
        matches!(
            self,
            SvntlError::CommandFailed { .. } | SvntlError::CommandSpawn { .. }
        )
    }
}
