//! The CGS (centimetre-gram-second) registry and its named derived units.

use crate::dimension::Dimension;
use crate::registry::Registry;
use crate::unit::{Alias, Prefix, Unit};

const LEN: Dimension = Dimension::new(1, 0, 0, 0, 0, 0, 0);
const MASS: Dimension = Dimension::new(0, 1, 0, 0, 0, 0, 0);
const TIME: Dimension = Dimension::new(0, 0, 1, 0, 0, 0, 0);
const FORCE: Dimension = Dimension::new(1, 1, -2, 0, 0, 0, 0);
const ENERGY: Dimension = Dimension::new(2, 1, -2, 0, 0, 0, 0);
const ACCEL: Dimension = Dimension::new(1, 0, -2, 0, 0, 0, 0);
const PRESSURE: Dimension = Dimension::new(-1, 1, -2, 0, 0, 0, 0);
const VISCOSITY: Dimension = Dimension::new(-1, 1, -1, 0, 0, 0, 0);
const KINEMATIC_VISCOSITY: Dimension = Dimension::new(2, 0, -1, 0, 0, 0, 0);

/// Builds the CGS registry.
pub fn registry() -> Registry {
    let units = vec![
        Unit::scaled("cm", LEN, 0.01),
        Unit::scaled("g", MASS, 1e-3),
        Unit::scaled("s", TIME, 1.0),
        Unit::scaled("dyn", FORCE, 1e-5),
        Unit::scaled("erg", ENERGY, 1e-7),
        Unit::scaled("Gal", ACCEL, 1e-2),
        Unit::scaled("Ba", PRESSURE, 0.1),
        Unit::scaled("P", VISCOSITY, 0.1),
        Unit::scaled("St", KINEMATIC_VISCOSITY, 1e-4),
    ];

    let aliases = vec![
        Alias::new("dyne", units[3].clone()),
        Alias::new("poise", units[7].clone()),
        Alias::new("stokes", units[8].clone()),
    ];

    let prefixes = vec![Prefix::new("k", 1e3), Prefix::new("m", 1e-3)];

    Registry::new("CGS", units, aliases, prefixes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erg_is_ten_million_times_smaller_than_joule() {
        let r = registry();
        let erg = r.find_exact("erg").unwrap();
        assert!((erg.scale - 1e-7).abs() < 1e-18);
    }

    #[test]
    fn dyne_alias_resolves_to_dyn() {
        let r = registry();
        assert_eq!(r.find_exact("dyne").unwrap().scale, r.find_exact("dyn").unwrap().scale);
    }
}
