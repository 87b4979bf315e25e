use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncoderError {
    #[error("Binary output is not supported by the extxyz format")]
    BinaryUnsupported,

    #[error("Per-process multi-file output is not supported by the extxyz format")]
    MultiFileUnsupported,

    #[error("Particle type count must be at least 1 (got {0})")]
    InvalidTypeCount(usize),

    #[error("Invalid line format '{format}': {reason}")]
    InvalidFormat { format: String, reason: String },

    #[error("Element names do not match particle types: expected {expected}, got {actual}")]
    ElementCount { expected: usize, actual: usize },

    #[error("Rendered frame would exceed the 32-bit length limit at {capacity} bytes")]
    LengthOverflow { capacity: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
