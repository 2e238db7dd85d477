use bytes::BytesMut;
use futures::{Stream, StreamExt};
use log::debug;
use std::pin::Pin;
use tokio_serial::{
    ClearBuffer, DataBits, FlowControl, Parity, SerialPort, SerialPortBuilderExt, StopBits,
};
use tokio_util::codec::FramedRead;

use crate::proto::codec::FrameCodec;
use crate::proto::Result;
use crate::reading::Reading;

type LineStream = Pin<Box<dyn Stream<Item = std::io::Result<BytesMut>> + Send>>;

/// ES51922 based meter attached to a serial port.
///
/// The meter only talks, so the device is a read-only stream of packets.
pub struct Device {
    stream: LineStream,
}

impl Device {
    /// Opens `com` with the 7O1 line settings of the ES51922.
    ///
    /// DTR is raised and RTS dropped, the opto-isolated adapters of most
    /// meters draw their supply from DTR.
    pub fn new(com: impl AsRef<str>, baudrate: u32) -> Result<Self> {
        let mut port = tokio_serial::new(com.as_ref(), baudrate)
            .data_bits(DataBits::Seven)
            .parity(Parity::Odd)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .open_native_async()?;

        #[cfg(unix)]
        port.set_exclusive(false)?;

        port.clear(ClearBuffer::Input)?;
        port.write_data_terminal_ready(true)?;
        port.write_request_to_send(false)?;

        let stream = FramedRead::new(port, FrameCodec::default());

        Ok(Self {
            stream: Box::pin(stream),
        })
    }

    #[cfg(test)]
    pub(crate) fn new_faked(fake: crate::proto::fake::FakeBuffer) -> Self {
        let stream = FramedRead::new(fake, FrameCodec::default());

        Self {
            stream: Box::pin(stream),
        }
    }

    /// Next LF terminated line, unchecked. `None` once the port is closed.
    pub async fn next_frame(&mut self) -> Result<Option<BytesMut>> {
        match self.stream.next().await {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(ioerr)) => Err(ioerr.into()),
            None => Ok(None),
        }
    }

    /// Next packet that decodes cleanly; malformed packets are skipped.
    pub async fn next_reading(&mut self) -> Result<Option<Reading>> {
        while let Some(frame) = self.next_frame().await? {
            match Reading::try_from(&frame[..]) {
                Ok(reading) => return Ok(Some(reading)),
                Err(err) => debug!("Dropping packet {:02X?}: {}", &frame[..], err),
            }
        }
        Ok(None)
    }
}
