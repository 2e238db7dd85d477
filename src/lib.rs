//!
//! This library decodes the serial protocol of digital multimeters built
//! around the Cyrustek ES51922 measurement IC.
//!
//! <br>
//!
//! # Details
//!
//! - The meter continuously sends 14 byte packets terminated by CR LF at
//!   19200 baud, 7 data bits, odd parity.
//!
//! - Decoding a packet
//!
//!   ```
//!   use es51922::parser::Parser;
//!   use es51922::reading::Mode;
//!
//!   let mut parser = Parser::new();
//!   assert!(parser.parse(b"101234;000:0\r\n"));
//!   assert_eq!(parser.mode(), Mode::Volts);
//!   assert_eq!(parser.format(), "1.23400 V DC [AUTO]");
//!   ```
//!
//! - Reading from a meter
//!
//!   ```no_run
//!   use es51922::{Device, DEFAULT_BAUDRATE};
//!   #[tokio::main]
//!   async fn main() -> es51922::Result<()> {
//!       let mut device = Device::new("/dev/ttyUSB0", DEFAULT_BAUDRATE)?;
//!       while let Some(reading) = device.next_reading().await? {
//!           println!("{}", reading);
//!       }
//!       Ok(())
//!   }
//!   ```
//!
//! # Supported devices
//!
//!  * UNI-T UT61E
//!  * Other meters using the ES51922 serial output
//!

pub mod decoder;
pub mod device;
pub mod frame;
pub mod parser;
pub mod proto;
pub mod reading;

pub use device::Device;
pub use frame::FrameError;
pub use parser::Parser;
pub use proto::Result;
pub use reading::Reading;

#[cfg(unix)]
pub const DEFAULT_TTY: &str = "/dev/ttyUSB0";
#[cfg(windows)]
pub const DEFAULT_TTY: &str = "COM1";

/// Fixed baudrate of the ES51922 serial output.
pub const DEFAULT_BAUDRATE: u32 = 19200;
