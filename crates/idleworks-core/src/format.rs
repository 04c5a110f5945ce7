//! Human-readable numbers and durations
//!
//! Negative, NaN and infinite inputs render as `"0"` (`"0s"` for
//! durations); idle balances are never negative, so any such value is a
//! display of garbage rather than something to show.

/// Short-scale suffixes, one per factor of 1000
const SUFFIXES: [&str; 12] = [
    "", "K", "M", "B", "T", "Qa", "Qi", "Sx", "Sp", "Oc", "No", "Dc",
];

/// Above this, [`smart`] switches to scientific notation
pub const SCIENTIFIC_THRESHOLD: f64 = 1e15;

fn is_displayable(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Format with a magnitude suffix: `1.50K`, `12.3M`, `450B`
///
/// Values below 1000 keep `decimals` places. Above, precision shrinks as
/// the mantissa grows.
pub fn with_suffix(value: f64, decimals: usize) -> String {
    if !is_displayable(value) {
        return "0".to_string();
    }
    if value < 1000.0 {
        return format!("{:.*}", decimals, value);
    }

    let mut index = 0;
    let mut scaled = value;
    while scaled >= 1000.0 && index < SUFFIXES.len() - 1 {
        scaled /= 1000.0;
        index += 1;
    }

    let places = if scaled >= 100.0 {
        0
    } else if scaled >= 10.0 {
        1
    } else {
        decimals
    };
    format!("{:.*}{}", places, scaled, SUFFIXES[index])
}

/// Format in scientific notation: `1.23e15`
pub fn scientific(value: f64, decimals: usize) -> String {
    if !is_displayable(value) {
        return "0".to_string();
    }
    if value < 1000.0 {
        return format!("{:.*}", decimals, value);
    }

    let exponent = value.log10().floor() as i32;
    let mantissa = value / 10f64.powi(exponent);
    format!("{:.*}e{}", decimals, mantissa, exponent)
}

/// Suffixes for moderate values, scientific notation for huge ones
pub fn smart(value: f64) -> String {
    if !is_displayable(value) {
        return "0".to_string();
    }
    if value > SCIENTIFIC_THRESHOLD {
        scientific(value, 2)
    } else {
        with_suffix(value, 2)
    }
}

/// Prefix a [`smart`] amount with a currency symbol
pub fn currency(symbol: &str, value: f64) -> String {
    format!("{}{}", symbol, smart(value))
}

/// Format a duration: `250ms`, `4.5s`, `2m 5s`, `1h 2m`, `3d 4h`
pub fn time(seconds: f64) -> String {
    if !is_displayable(seconds) {
        return "0s".to_string();
    }
    if seconds < 1.0 {
        return format!("{:.0}ms", seconds * 1000.0);
    }
    if seconds < 60.0 {
        return format!("{:.1}s", seconds);
    }

    let whole = seconds as u64;
    if seconds < 3600.0 {
        format!("{}m {}s", whole / 60, whole % 60)
    } else if seconds < 86_400.0 {
        format!("{}h {}m", whole / 3600, (whole % 3600) / 60)
    } else {
        format!("{}d {}h", whole / 86_400, (whole % 86_400) / 3600)
    }
}
