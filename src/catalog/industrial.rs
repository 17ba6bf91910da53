//! Industrial/engineering units in everyday use outside physics: pressure
//! gauges, horsepower, kilowatt-hours.

use crate::dimension::Dimension;
use crate::registry::Registry;
use crate::unit::{Alias, Prefix, Unit};

const PRESSURE: Dimension = Dimension::new(-1, 1, -2, 0, 0, 0, 0);
const POWER: Dimension = Dimension::new(2, 1, -3, 0, 0, 0, 0);
const ENERGY: Dimension = Dimension::new(2, 1, -2, 0, 0, 0, 0);

/// Builds the Industrial registry.
pub fn registry() -> Registry {
    let units = vec![
        Unit::scaled("bar", PRESSURE, 1e5),
        Unit::scaled("psi", PRESSURE, 6_894.757_293_168),
        Unit::scaled("atm", PRESSURE, 101_325.0),
        Unit::scaled("hp", POWER, 745.699_871_582_27),
        Unit::scaled("kWh", ENERGY, 3.6e6),
    ];

    let aliases = vec![Alias::new("horsepower", units[3].clone())];

    // No coherent prefix system for this catalogue's units.
    let prefixes: Vec<Prefix> = vec![];

    Registry::new("Industrial", units, aliases, prefixes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atmosphere_is_101325_pascal() {
        let r = registry();
        let atm = r.find_exact("atm").unwrap();
        assert_eq!(atm.scale, 101_325.0);
    }

    #[test]
    fn horsepower_alias_resolves() {
        let r = registry();
        assert_eq!(r.find_exact("horsepower").unwrap().scale, r.find_exact("hp").unwrap().scale);
    }
}
