//! The SI (International System of Units) registry: the seven base units,
//! the handful of coherent derived units needed for the normalizer's
//! one-step reduction, the two affine temperature scales, and the
//! accepted-for-use-with-SI convenience units exercised by the spec's
//! worked examples (`h`, `d`, `L`).

use crate::dimension::Dimension;
use crate::registry::Registry;
use crate::unit::{Alias, Prefix, Unit};

const LEN: Dimension = Dimension::new(1, 0, 0, 0, 0, 0, 0);
const MASS: Dimension = Dimension::new(0, 1, 0, 0, 0, 0, 0);
const TIME: Dimension = Dimension::new(0, 0, 1, 0, 0, 0, 0);
const CURRENT: Dimension = Dimension::new(0, 0, 0, 1, 0, 0, 0);
const TEMP: Dimension = Dimension::new(0, 0, 0, 0, 1, 0, 0);
const AMOUNT: Dimension = Dimension::new(0, 0, 0, 0, 0, 1, 0);
const LUMINOUS: Dimension = Dimension::new(0, 0, 0, 0, 0, 0, 1);

/// Builds the SI registry.
pub fn registry() -> Registry {
    let units = vec![
        // Base units. Mass is stored via the gram so that the prefix
        // mechanism naturally reconstructs "kg" as k + g (the one base
        // unit whose coherent SI form already carries a prefix).
        Unit::scaled("m", LEN, 1.0),
        Unit::scaled("g", MASS, 1e-3),
        Unit::scaled("s", TIME, 1.0),
        Unit::scaled("A", CURRENT, 1.0),
        Unit::scaled("K", TEMP, 1.0),
        Unit::scaled("mol", AMOUNT, 1.0),
        Unit::scaled("cd", LUMINOUS, 1.0),
        // Affine temperature scales, registered under their bare symbols
        // per spec §4.2/§4.6 worked examples (`100 C as F`).
        Unit::new("C", TEMP, 1.0, 273.15),
        Unit::new("F", TEMP, 5.0 / 9.0, 459.67),
        // Coherent derived units (scale 1.0, multi-axis).
        Unit::scaled("N", Dimension::new(1, 1, -2, 0, 0, 0, 0), 1.0),
        Unit::scaled("J", Dimension::new(2, 1, -2, 0, 0, 0, 0), 1.0),
        Unit::scaled("W", Dimension::new(2, 1, -3, 0, 0, 0, 0), 1.0),
        Unit::scaled("Pa", Dimension::new(-1, 1, -2, 0, 0, 0, 0), 1.0),
        Unit::scaled("Hz", Dimension::new(0, 0, -1, 0, 0, 0, 0), 1.0),
        Unit::scaled("V", Dimension::new(2, 1, -3, -1, 0, 0, 0), 1.0),
        Unit::scaled("Wb", Dimension::new(2, 1, -2, -1, 0, 0, 0), 1.0),
        Unit::scaled("H", Dimension::new(2, 1, -2, -2, 0, 0, 0), 1.0),
        Unit::scaled("lm", LUMINOUS, 1.0),
        Unit::scaled("lx", Dimension::new(-2, 0, 0, 0, 0, 0, 1), 1.0),
        Unit::scaled("Bq", Dimension::new(0, 0, -1, 0, 0, 0, 0), 1.0),
        Unit::scaled("Gy", Dimension::new(2, 0, -2, 0, 0, 0, 0), 1.0),
        Unit::scaled("Sv", Dimension::new(2, 0, -2, 0, 0, 0, 0), 1.0),
        Unit::scaled("kat", Dimension::new(0, 0, -1, 0, 0, 1, 0), 1.0),
        // Non-SI units accepted for use with SI.
        Unit::scaled("min", TIME, 60.0),
        Unit::scaled("h", TIME, 3600.0),
        Unit::scaled("d", TIME, 86_400.0),
        Unit::scaled("wk", TIME, 604_800.0),
        Unit::scaled("L", LEN.powi(3), 1e-3),
        Unit::scaled("t", MASS, 1_000.0),
    ];

    let aliases = vec![
        Alias::new("Newton", units[9].clone()),
        Alias::new("Joule", units[10].clone()),
        Alias::new("Watt", units[11].clone()),
        Alias::new("Pascal", units[12].clone()),
        Alias::new("Hertz", units[13].clone()),
        Alias::new("Volt", units[14].clone()),
        Alias::new("degC", units[7].clone()),
        Alias::new("degF", units[8].clone()),
        Alias::new("liter", units[units.len() - 2].clone()),
        Alias::new("litre", units[units.len() - 2].clone()),
        Alias::new("tonne", units[units.len() - 1].clone()),
    ];

    let prefixes = vec![
        Prefix::new("Y", 1e24),
        Prefix::new("Z", 1e21),
        Prefix::new("E", 1e18),
        Prefix::new("P", 1e15),
        Prefix::new("T", 1e12),
        Prefix::new("G", 1e9),
        Prefix::new("M", 1e6),
        Prefix::new("k", 1e3),
        Prefix::new("h", 1e2),
        Prefix::new("da", 1e1),
        Prefix::new("d", 1e-1),
        Prefix::new("c", 1e-2),
        Prefix::new("m", 1e-3),
        Prefix::new("u", 1e-6),
        Prefix::new("n", 1e-9),
        Prefix::new("p", 1e-12),
        Prefix::new("f", 1e-15),
        Prefix::new("a", 1e-18),
        Prefix::new("z", 1e-21),
        Prefix::new("y", 1e-24),
    ];

    Registry::new("SI", units, aliases, prefixes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metre_is_exact() {
        let r = registry();
        let m = r.find_exact("m").unwrap();
        assert_eq!(m.scale, 1.0);
        assert_eq!(m.dim, LEN);
    }

    #[test]
    fn kilogram_is_prefix_plus_gram() {
        let r = registry();
        let kg = r.find("kg").unwrap();
        assert!((kg.scale - 1.0).abs() < 1e-15);
        assert_eq!(kg.dim, MASS);
    }

    #[test]
    fn celsius_alias_resolves() {
        let r = registry();
        let deg_c = r.find_exact("degC").unwrap();
        assert_eq!(deg_c.offset, 273.15);
    }

    #[test]
    fn hour_and_day_scale_correctly() {
        let r = registry();
        let h = r.find_exact("h").unwrap();
        let d = r.find_exact("d").unwrap();
        assert_eq!(h.scale, 3600.0);
        assert_eq!(d.scale, 86_400.0);
    }
}
