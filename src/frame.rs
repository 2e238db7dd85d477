use thiserror::Error;

use crate::reading::Mode;

/// Size of one ES51922 packet, including the trailing CR LF.
pub const FRAME_LEN: usize = 14;

// Byte offsets as named in the ES51922 datasheet.
pub(crate) const RANGE: usize = 0;
pub(crate) const DIGITS: std::ops::Range<usize> = 1..6;
pub(crate) const FUNCTION: usize = 6;
pub(crate) const STATUS: usize = 7;
pub(crate) const OPTION1: usize = 8;
pub(crate) const OPTION2: usize = 9;
pub(crate) const OPTION3: usize = 10;
pub(crate) const OPTION4: usize = 11;
pub(crate) const CR: usize = 12;
pub(crate) const LF: usize = 13;

const MARKER: u8 = 0x30;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    #[error("Frame too short ({} bytes)", _0)]
    FrameTooShort(usize),
    #[error("Buffer doesn't look like a valid packet")]
    BadFrameMarkers,
    #[error("Digit at offset {offset} isn't ASCII '0'..'9' (0x{value:02X})")]
    InvalidDigit { offset: usize, value: u8 },
    #[error("Invalid range code 0x{code:02X} for {mode}")]
    InvalidRangeCode { mode: Mode, code: u8 },
    #[error("Unknown function code 0x{:02X}", _0)]
    UnknownFunctionCode(u8),
}

/// Checks length and the fixed markers of a packet.
pub fn check(frame: &[u8]) -> Result<(), FrameError> {
    if frame.len() < FRAME_LEN {
        return Err(FrameError::FrameTooShort(frame.len()));
    }
    if frame[RANGE] & MARKER != MARKER || frame[CR] != b'\r' || frame[LF] != b'\n' {
        return Err(FrameError::BadFrameMarkers);
    }
    Ok(())
}

pub fn validate(frame: &[u8]) -> bool {
    check(frame).is_ok()
}
