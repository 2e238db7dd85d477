use bytes::BytesMut;
use log::{debug, trace};
use std::io;
use tokio_util::codec::Decoder;

/// Longest line accepted from the meter. Anything longer is line noise.
pub const MAX_LINE_LEN: usize = 16;

/// Splits the raw serial stream into LF terminated lines.
///
/// Lines are handed out unchecked (LF included); deciding whether a line is
/// a valid packet is up to the parser.
#[derive(Debug, Default)]
pub struct FrameCodec {
    // Set after an overlong run without LF, cleared on the next LF.
    discarding: bool,
}

impl Decoder for FrameCodec {
    type Item = BytesMut;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match src.as_ref().iter().position(|b| *b == b'\n') {
                Some(n) => {
                    let line = src.split_to(n + 1);
                    if self.discarding {
                        self.discarding = false;
                        debug!("Resynchronized, dropped {} bytes", line.len());
                        continue;
                    }
                    if line.len() > MAX_LINE_LEN {
                        debug!("Dropping overlong line ({} bytes)", line.len());
                        continue;
                    }
                    trace!("Line: {:02X?}", &line[..]);
                    return Ok(Some(line));
                }
                None => {
                    if src.len() > MAX_LINE_LEN {
                        debug!("No line end in {} bytes, resynchronizing", src.len());
                        src.clear();
                        self.discarding = true;
                    }
                    return Ok(None);
                }
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            None => {
                if !src.is_empty() {
                    debug!("Dropping {} trailing bytes", src.len());
                    src.clear();
                }
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACKET: &[u8] = b"101234;000:0\r\n";

    #[test]
    fn splits_concatenated_packets() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::new();
        buf.extend_from_slice(PACKET);
        buf.extend_from_slice(PACKET);
        buf.extend_from_slice(&PACKET[..5]);

        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some(PACKET));
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some(PACKET));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert_eq!(buf.len(), 5);

        buf.extend_from_slice(&PACKET[5..]);
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some(PACKET));
        assert!(buf.is_empty());
    }

    #[test]
    fn short_lines_are_passed_through() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::from(&b"4\r\n"[..]);
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some(&b"4\r\n"[..]));
    }

    #[test]
    fn drops_overlong_lines() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::new();
        buf.extend_from_slice(b"xxxxx");
        buf.extend_from_slice(PACKET);
        buf.extend_from_slice(PACKET);

        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some(PACKET));
        assert!(buf.is_empty());
    }

    #[test]
    fn resynchronizes_after_noise() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::from(&[0x55_u8; 20][..]);
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert!(buf.is_empty());

        // Tail of the noise, then a good packet.
        buf.extend_from_slice(b"noise\n");
        buf.extend_from_slice(PACKET);
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some(PACKET));
    }

    #[test]
    fn discards_partial_line_at_eof() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::new();
        buf.extend_from_slice(PACKET);
        buf.extend_from_slice(b"1012");

        assert_eq!(codec.decode_eof(&mut buf).unwrap().as_deref(), Some(PACKET));
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
        assert!(buf.is_empty());
    }
}
