#![deny(clippy::unwrap_used)]

use chrono::Utc;
use clap::{arg, command, value_parser, ArgAction};
use log::LevelFilter;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::exit;

use es51922::proto::conv::pretty_ts;
use es51922::proto::{self, Result};
use es51922::{Device, Parser, DEFAULT_BAUDRATE, DEFAULT_TTY};

#[tokio::main]
async fn main() {
    let matches = command!() // requires `cargo` feature
        .arg(
            arg!(
                -p --device <PORT> "Port for USB adapter"
            )
            .default_value(DEFAULT_TTY)
            .required(false)
            .value_parser(value_parser!(PathBuf)),
        )
        .arg(arg!(
            -d --debug ... "Turn debugging information on"
        ))
        .arg(
            arg!(
                -b --baudrate <BAUDRATE> "Baudrate"
            )
            .default_value(DEFAULT_BAUDRATE.to_string())
            .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(
                -t --timestamp "Prefix each reading with the local time"
            )
            .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(
                -s --strict "Abort on malformed packets instead of dropping them"
            )
            .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(
                -n --count <N> "Stop after N readings"
            )
            .required(false)
            .value_parser(value_parser!(u64)),
        )
        .get_matches();

    let level = match matches.get_count("debug") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .init();

    if let Err(e) = handle_args(&matches).await {
        let port = matches
            .get_one::<PathBuf>("device")
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        match e {
            proto::ProtoError::Serial(err) => {
                if err.kind() == tokio_serial::ErrorKind::NoDevice
                    || matches!(err.kind(), tokio_serial::ErrorKind::Io(ErrorKind::NotFound))
                {
                    eprintln!("{}: File not found", port);
                } else {
                    eprintln!("I/O Error: {} [device: {}]", err, port);
                }
            }
            proto::ProtoError::Io(err) => {
                if err.kind() == ErrorKind::NotFound {
                    eprintln!("{}: File not found", port);
                } else {
                    eprintln!("I/O Error: {} [device: {}]", err, port);
                }
            }
            proto::ProtoError::Frame(err) => {
                eprintln!("Malformed packet from device, aborting: {}", err);
            }
        }
        exit(-1);
    }
}

async fn handle_args(matches: &clap::ArgMatches) -> Result<()> {
    let baud_rate = matches
        .get_one::<u32>("baudrate")
        .unwrap_or(&DEFAULT_BAUDRATE);
    let timestamp = matches.get_flag("timestamp");
    let strict = matches.get_flag("strict");
    let count = matches.get_one::<u64>("count").copied();

    if let Some(port_path) = matches.get_one::<PathBuf>("device") {
        let mut device = Device::new(port_path.to_string_lossy(), *baud_rate)?;

        eprintln!("Connected to: {}\n", port_path.display());

        let mut parser = Parser::new();
        let mut printed = 0;
        while count.map_or(true, |n| printed < n) {
            let Some(frame) = device.next_frame().await? else {
                break;
            };
            if strict {
                parser.try_parse(&frame)?;
            } else if !parser.parse(&frame) {
                continue;
            }

            if timestamp {
                println!("{} {}", pretty_ts(&Utc::now()), parser.format());
            } else {
                println!("{}", parser.format());
            }
            printed += 1;
        }
    }

    Ok(())
}
