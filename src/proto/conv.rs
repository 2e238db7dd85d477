use chrono::{DateTime, Local, Utc};

const PREFIXES: [(f64, &str); 8] = [
    (1e9, "G"),
    (1e6, "M"),
    (1e3, "K"),
    (1.0, ""),
    (1e-3, "m"),
    (1e-6, "u"),
    (1e-9, "n"),
    (1e-12, "p"),
];

/// Scales `value` to the largest SI prefix not exceeding its magnitude.
///
/// Magnitudes below 1p (zero included) are returned unscaled with an
/// empty prefix.
pub fn best_prefix(value: f64) -> (f64, &'static str) {
    let magnitude = value.abs();
    PREFIXES
        .iter()
        .find(|(scale, _)| magnitude >= *scale)
        .map(|(scale, prefix)| (value / scale, *prefix))
        .unwrap_or((value, ""))
}

pub fn pretty_ts(&ts: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = ts.into();
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}
