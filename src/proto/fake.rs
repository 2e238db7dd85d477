use std::pin::Pin;

/// Serial port stand-in that replays a captured byte stream, then EOF.
pub(crate) struct FakeBuffer {
    capture: Vec<u8>,
    chunk: usize,
}

impl FakeBuffer {
    pub(crate) fn new(capture: Vec<u8>) -> Self {
        Self {
            capture,
            chunk: usize::MAX,
        }
    }

    /// Hands out at most `chunk` bytes per read, like a slow UART.
    pub(crate) fn chunked(capture: Vec<u8>, chunk: usize) -> Self {
        Self { capture, chunk }
    }
}

impl tokio::io::AsyncRead for FakeBuffer {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
        buf: &mut tokio::io::ReadBuf<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        if !self.capture.is_empty() {
            let c = buf
                .remaining()
                .min(self.capture.len())
                .min(self.chunk);
            buf.put_slice(&self.capture[0..c]);
            self.capture.drain(0..c);
        }
        std::task::Poll::Ready(Ok(()))
    }
}
