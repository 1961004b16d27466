use thiserror::Error;

/// Errors from the fallible surface of the crate (terminal I/O and startup).
///
/// Tree operations never return errors; they degrade quietly instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Terminal setup, polling, or flushing failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The logger could not be installed.
    #[error("failed to initialize logger: {0}")]
    Logger(String),
}

pub type Result<T> = std::result::Result<T, Error>;
