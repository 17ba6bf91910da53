//! The Imperial/US customary registry: length, mass, time duplicates,
//! volume, and force units scaled against the SI canonical base.

use crate::dimension::Dimension;
use crate::registry::Registry;
use crate::unit::{Alias, Prefix, Unit};

const LEN: Dimension = Dimension::new(1, 0, 0, 0, 0, 0, 0);
const MASS: Dimension = Dimension::new(0, 1, 0, 0, 0, 0, 0);
const FORCE: Dimension = Dimension::new(1, 1, -2, 0, 0, 0, 0);

/// Builds the Imperial registry.
pub fn registry() -> Registry {
    let units = vec![
        Unit::scaled("in", LEN, 0.0254),
        Unit::scaled("ft", LEN, 0.3048),
        Unit::scaled("yd", LEN, 0.9144),
        // "mi" is the mile, deliberately colliding in spelling (though not
        // in registry) with SI's milli-metre; within this registry it is
        // registered exact so it is never mistaken for a prefixed unit.
        Unit::scaled("mi", LEN, 1_609.344),
        Unit::scaled("lb", MASS, 0.453_592_37),
        Unit::scaled("oz", MASS, 0.028_349_523_125),
        Unit::scaled("st", MASS, 6.350_293_18),
        Unit::scaled("lbf", FORCE, 4.448_222),
    ];

    let aliases = vec![
        Alias::new("inch", units[0].clone()),
        Alias::new("foot", units[1].clone()),
        Alias::new("feet", units[1].clone()),
        Alias::new("yard", units[2].clone()),
        Alias::new("mile", units[3].clone()),
        Alias::new("pound", units[4].clone()),
        Alias::new("ounce", units[5].clone()),
        Alias::new("stone", units[6].clone()),
    ];

    // Imperial has no coherent prefix system; none are registered.
    let prefixes: Vec<Prefix> = vec![];

    Registry::new("Imperial", units, aliases, prefixes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mile_is_exact_not_milli_inch() {
        let r = registry();
        let mi = r.find_exact("mi").unwrap();
        assert!((mi.scale - 1_609.344).abs() < 1e-9);
    }

    #[test]
    fn foot_alias_resolves() {
        let r = registry();
        assert_eq!(r.find_exact("foot").unwrap().scale, r.find_exact("ft").unwrap().scale);
    }
}
