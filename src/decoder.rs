//! Field decoding of a validated ES51922 packet.
//!
//! The IC reuses the same status bits across unrelated functions, so the
//! measurement mode is resolved by an ordered rule table: the duty cycle flag
//! wins over the frequency flag, which wins over the function code.

use crate::frame::{
    check, FrameError, DIGITS, FUNCTION, OPTION1, OPTION2, OPTION3, OPTION4, RANGE, STATUS,
};
use crate::reading::{ErrorState, Mode, Peak, PowerType, Reading};

// STATUS bits
const STATUS_OL: u8 = 0x01;
const STATUS_BATT: u8 = 0x02;
const STATUS_SIGN: u8 = 0x04;
const STATUS_PERCENT: u8 = 0x08;

// OPTION1 bits
const OPTION1_REL: u8 = 0x02;

// OPTION2 bits
const OPTION2_MIN: u8 = 0x02;
const OPTION2_MAX: u8 = 0x04;
const OPTION2_UL: u8 = 0x08;

// OPTION3 bits
const OPTION3_VAHZ: u8 = 0x01;
const OPTION3_AUTO: u8 = 0x02;
const OPTION3_AC: u8 = 0x04;
const OPTION3_DC: u8 = 0x08;

// OPTION4 bits
const OPTION4_HOLD: u8 = 0x02;

type RangeTable = &'static [(u8, f64)];

const DUTY_RANGES: RangeTable = &[(b'0', 1e-1)];

const HERTZ_RANGES: RangeTable = &[
    (b'0', 1e-2),
    (b'1', 1e-1),
    (b'3', 1.0),
    (b'4', 1e1),
    (b'5', 1e2),
    (b'6', 1e3),
    (b'7', 1e4),
];

const OHMS_RANGES: RangeTable = &[
    (b'0', 1e-2),
    (b'1', 1e-1),
    (b'2', 1.0),
    (b'3', 1e1),
    (b'4', 1e2),
    (b'5', 1e3),
    (b'6', 1e4),
];

const FARADS_RANGES: RangeTable = &[
    (b'0', 1e-12),
    (b'1', 1e-11),
    (b'2', 1e-10),
    (b'3', 1e-9),
    (b'4', 1e-8),
    (b'5', 1e-7),
    (b'6', 1e-6),
    (b'7', 1e-5),
];

const VOLTS_RANGES: RangeTable = &[
    (b'0', 1e-4),
    (b'1', 1e-3),
    (b'2', 1e-2),
    (b'3', 1e-1),
    (b'4', 1e-5),
];

const AMPS_RANGES: RangeTable = &[(b'0', 1e-3)];
const MILLI_AMPS_RANGES: RangeTable = &[(b'0', 1e-6), (b'1', 1e-5)];
const MICRO_AMPS_RANGES: RangeTable = &[(b'0', 1e-8), (b'1', 1e-7)];

#[derive(Debug, Clone, Copy)]
enum Selector {
    /// A status bit overriding the function code.
    Flag { offset: usize, mask: u8 },
    /// The function code byte.
    Function(u8),
}

impl Selector {
    fn matches(&self, frame: &[u8]) -> bool {
        match *self {
            Selector::Flag { offset, mask } => frame[offset] & mask != 0,
            Selector::Function(code) => frame[FUNCTION] == code,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Ranges {
    /// Function without sub-ranges, the range byte is ignored.
    Unscaled,
    Table(RangeTable),
}

impl Ranges {
    fn multiplier(&self, code: u8) -> Option<f64> {
        match self {
            Ranges::Unscaled => Some(1.0),
            Ranges::Table(table) => table.iter().find(|(c, _)| *c == code).map(|(_, m)| *m),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    selector: Selector,
    mode: Mode,
    ranges: Ranges,
}

const fn rule(selector: Selector, mode: Mode, ranges: Ranges) -> Rule {
    Rule {
        selector,
        mode,
        ranges,
    }
}

const RULES: &[Rule] = &[
    rule(
        Selector::Flag {
            offset: STATUS,
            mask: STATUS_PERCENT,
        },
        Mode::DutyCycle,
        Ranges::Table(DUTY_RANGES),
    ),
    rule(
        Selector::Flag {
            offset: OPTION3,
            mask: OPTION3_VAHZ,
        },
        Mode::Hertz,
        Ranges::Table(HERTZ_RANGES),
    ),
    rule(Selector::Function(b'0'), Mode::Amps, Ranges::Table(AMPS_RANGES)),
    rule(Selector::Function(b'1'), Mode::Diode, Ranges::Unscaled),
    rule(Selector::Function(b'2'), Mode::Hertz, Ranges::Table(HERTZ_RANGES)),
    rule(Selector::Function(b'3'), Mode::Ohms, Ranges::Table(OHMS_RANGES)),
    rule(Selector::Function(b'5'), Mode::Conductance, Ranges::Unscaled),
    rule(Selector::Function(b'6'), Mode::Farads, Ranges::Table(FARADS_RANGES)),
    rule(Selector::Function(b';'), Mode::Volts, Ranges::Table(VOLTS_RANGES)),
    rule(Selector::Function(b'='), Mode::Amps, Ranges::Table(MICRO_AMPS_RANGES)),
    rule(Selector::Function(b'?'), Mode::Amps, Ranges::Table(MILLI_AMPS_RANGES)),
];

/// Decodes a packet into a fresh [`Reading`].
///
/// The packet is validated first, so any byte slice may be passed in.
pub fn decode(frame: &[u8]) -> Result<Reading, FrameError> {
    check(frame)?;

    let mut value = mantissa(frame)?;
    if frame[STATUS] & STATUS_SIGN != 0 {
        value = -value;
    }

    let rule = RULES
        .iter()
        .find(|r| r.selector.matches(frame))
        .ok_or(FrameError::UnknownFunctionCode(frame[FUNCTION]))?;
    let multiplier = rule
        .ranges
        .multiplier(frame[RANGE])
        .ok_or(FrameError::InvalidRangeCode {
            mode: rule.mode,
            code: frame[RANGE],
        })?;

    let power_type = if frame[OPTION3] & OPTION3_DC != 0 {
        PowerType::Dc
    } else if frame[OPTION3] & OPTION3_AC != 0 {
        PowerType::Ac
    } else {
        PowerType::None
    };

    let error = if frame[STATUS] & STATUS_OL != 0 {
        ErrorState::Overload
    } else if frame[OPTION2] & OPTION2_UL != 0 {
        ErrorState::Underload
    } else {
        ErrorState::None
    };

    let peak = if frame[OPTION2] & OPTION2_MAX != 0 {
        Peak::Max
    } else if frame[OPTION2] & OPTION2_MIN != 0 {
        Peak::Min
    } else {
        Peak::None
    };

    Ok(Reading {
        value: f64::from(value) * multiplier,
        mode: rule.mode,
        power_type,
        error,
        peak,
        hold: frame[OPTION4] & OPTION4_HOLD != 0,
        battery_low: frame[STATUS] & STATUS_BATT != 0,
        relative: frame[OPTION1] & OPTION1_REL != 0,
        auto_range: frame[OPTION3] & OPTION3_AUTO != 0,
    })
}

/// Five ASCII digits, most significant first.
fn mantissa(frame: &[u8]) -> Result<i32, FrameError> {
    frame[DIGITS].iter().zip(DIGITS).try_fold(0, |acc, (&v, offset)| {
        if v.is_ascii_digit() {
            Ok(acc * 10 + i32::from(v - b'0'))
        } else {
            Err(FrameError::InvalidDigit { offset, value: v })
        }
    })
}

impl TryFrom<&[u8]> for Reading {
    type Error = FrameError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        decode(value)
    }
}
