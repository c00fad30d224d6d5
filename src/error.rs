use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    /// The container signature is unrecognized, mandatory metadata is
    /// missing, or no frame survived decoding. The input yields no usable
    /// animation and no partial result is returned.
    #[error("invalid animated image data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DecodeResult<T> = Result<T, DecodeError>;
