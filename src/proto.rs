pub mod codec;
pub mod conv;

#[cfg(test)]
pub mod fake;

use thiserror::Error;

use crate::frame::FrameError;

#[derive(Error, Debug)]
pub enum ProtoError {
    #[error("I/O error: {:?}", _0)]
    Io(#[from] std::io::Error),

    #[error("Serial I/O error: {:?}", _0)]
    Serial(#[from] tokio_serial::Error),

    #[error("Malformed packet: {}", _0)]
    Frame(#[from] FrameError),
}

pub type Result<T> = std::result::Result<T, ProtoError>;
