use log::debug;

use crate::decoder::decode;
use crate::frame::{FrameError, FRAME_LEN};
use crate::reading::{ErrorState, Mode, Peak, PowerType, Reading};

/// Holds the last successfully decoded [`Reading`].
///
/// A failed parse never touches the held reading, so callers have to look at
/// the return value of [`Parser::parse`] to detect bad packets.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    reading: Reading,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer size required to capture one packet.
    pub const fn required_frame_size() -> usize {
        FRAME_LEN
    }

    /// Back to the "never parsed" state.
    pub fn reset(&mut self) {
        self.reading = Reading::default();
    }

    pub fn parse(&mut self, frame: &[u8]) -> bool {
        match self.try_parse(frame) {
            Ok(_) => true,
            Err(err) => {
                debug!("Dropping packet {:02X?}: {}", frame, err);
                false
            }
        }
    }

    pub fn try_parse(&mut self, frame: &[u8]) -> Result<&Reading, FrameError> {
        self.reading = decode(frame)?;
        Ok(&self.reading)
    }

    pub fn format(&self) -> String {
        self.reading.to_string()
    }

    pub fn reading(&self) -> &Reading {
        &self.reading
    }

    pub fn value(&self) -> f64 {
        self.reading.value
    }

    pub fn mode(&self) -> Mode {
        self.reading.mode
    }

    pub fn power_type(&self) -> PowerType {
        self.reading.power_type
    }

    pub fn error(&self) -> ErrorState {
        self.reading.error
    }

    pub fn peak(&self) -> Peak {
        self.reading.peak
    }

    pub fn hold(&self) -> bool {
        self.reading.hold
    }

    pub fn battery_low(&self) -> bool {
        self.reading.battery_low
    }

    pub fn relative(&self) -> bool {
        self.reading.relative
    }

    pub fn auto_range(&self) -> bool {
        self.reading.auto_range
    }
}
