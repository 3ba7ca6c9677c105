use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemodError {
    #[error("Invalid double-rate width: {0}")]
    InvalidWidth(usize),

    #[error("Invalid image dimensions: modulated_width={0}, height={1}, demodulated_width={2}")]
    InvalidDimensions(usize, usize, usize),

    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode input image: {0}")]
    DecodeError(String),

    #[error("Failed to encode output image: {0}")]
    EncodeError(String),

    #[error("Debayering failed: {0}")]
    DebayerError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DemodError>;
