use std::fmt;

use crate::proto::conv::best_prefix;

/// Physical quantity a [`Reading`] value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Invalid,
    Volts,
    Amps,
    Ohms,
    Diode,
    Hertz,
    Farads,
    Conductance,
    DutyCycle,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Invalid => f.write_str("INVAL"),
            Mode::Volts => f.write_str("V"),
            Mode::Amps => f.write_str("A"),
            Mode::Ohms => f.write_str("Ohm"),
            Mode::Diode => f.write_str("Diode"),
            Mode::Hertz => f.write_str("HZ"),
            Mode::Farads => f.write_str("F"),
            Mode::Conductance => f.write_str("Cond"),
            Mode::DutyCycle => f.write_str("% Duty"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerType {
    #[default]
    Invalid,
    None,
    Ac,
    Dc,
}

impl fmt::Display for PowerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerType::Ac => f.write_str(" AC"),
            PowerType::Dc => f.write_str(" DC"),
            PowerType::Invalid | PowerType::None => Ok(()),
        }
    }
}

/// Over- or underload as flagged by the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorState {
    #[default]
    Invalid,
    None,
    Overload,
    Underload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Peak {
    #[default]
    Invalid,
    None,
    Min,
    Max,
}

/// One decoded packet.
///
/// `value` is always in base units (V, A, Ohm, Hz, F, S) or a 0..100
/// percentage in duty cycle mode. The default reading is the "never parsed"
/// state: every enum at `Invalid` and a value of zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Reading {
    pub value: f64,
    pub mode: Mode,
    pub power_type: PowerType,
    pub error: ErrorState,
    pub peak: Peak,
    pub hold: bool,
    pub battery_low: bool,
    pub relative: bool,
    pub auto_range: bool,
}

impl Reading {
    pub fn is_valid(&self) -> bool {
        self.mode != Mode::Invalid
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(5);
        let (v, prefix) = best_prefix(self.value);

        f.write_fmt(format_args!(
            "{:.prec$} {}{}{} ",
            v, prefix, self.mode, self.power_type
        ))?;

        f.write_str(if self.auto_range { "[AUTO]" } else { "[MAN]" })?;
        if self.hold {
            f.write_str(" [HOLD]")?;
        }
        if self.battery_low {
            f.write_str(" [BAT_LOW]")?;
        }
        if self.relative {
            f.write_str(" [REL]")?;
        }
        match self.peak {
            Peak::Min => f.write_str(" [MIN]")?,
            Peak::Max => f.write_str(" [MAX]")?,
            Peak::Invalid | Peak::None => {}
        }
        match self.error {
            ErrorState::Overload => f.write_str(" [OVER]")?,
            ErrorState::Underload => f.write_str(" [UNDER]")?,
            ErrorState::Invalid | ErrorState::None => {}
        }
        Ok(())
    }
}
