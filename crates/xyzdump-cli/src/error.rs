use thiserror::Error;
use xyzdump::core::io::snapshot::SnapshotLoadError;
use xyzdump::encoder::error::EncoderError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Encoder(#[from] EncoderError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotLoadError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
