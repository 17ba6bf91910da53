//! A registry bundles units, aliases, and prefixes and resolves symbols
//! under the **exact > alias > prefix+base** rule (§4.3). Prefix expansion
//! never crosses a registry boundary.

use ahash::AHashMap;

use crate::unit::{Alias, Prefix, Unit};

/// A bundle of (units, aliases, prefixes) with isolated lookup.
#[derive(Debug, Clone)]
pub struct Registry {
    pub name: &'static str,
    pub units: Vec<Unit>,
    pub aliases: Vec<Alias>,
    pub prefixes: Vec<Prefix>,
    unit_index: AHashMap<String, usize>,
    alias_index: AHashMap<String, usize>,
}

impl Registry {
    pub fn new(
        name: &'static str,
        units: Vec<Unit>,
        aliases: Vec<Alias>,
        prefixes: Vec<Prefix>,
    ) -> Self {
        let mut unit_index = AHashMap::default();
        for (idx, u) in units.iter().enumerate() {
            unit_index.entry(u.symbol.clone()).or_insert(idx);
        }
        let mut alias_index = AHashMap::default();
        for (idx, a) in aliases.iter().enumerate() {
            alias_index.entry(a.name.clone()).or_insert(idx);
        }
        Self {
            name,
            units,
            aliases,
            prefixes,
            unit_index,
            alias_index,
        }
    }

    /// Exact unit or alias lookup; never expands a prefix.
    pub fn find_exact(&self, sym: &str) -> Option<Unit> {
        if let Some(&idx) = self.unit_index.get(sym) {
            return Some(self.units[idx].clone());
        }
        if let Some(&idx) = self.alias_index.get(sym) {
            return Some(self.aliases[idx].unit.clone());
        }
        None
    }

    /// Exact -> alias -> prefix+base, in that order, within this registry
    /// only.
    pub fn find(&self, sym: &str) -> Option<Unit> {
        if let Some(u) = self.find_exact(sym) {
            return Some(u);
        }
        for prefix in &self.prefixes {
            if let Some(rest) = sym.strip_prefix(prefix.symbol) {
                if rest.is_empty() {
                    continue;
                }
                if let Some(&idx) = self.unit_index.get(rest) {
                    let base = &self.units[idx];
                    return Some(base.with_prefix(sym.to_string(), prefix.factor));
                }
            }
        }
        None
    }

    pub fn iter_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn iter_aliases(&self) -> impl Iterator<Item = &Alias> {
        self.aliases.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;

    fn sample_registry() -> Registry {
        let metre = Unit::scaled("m", Dimension::new(1, 0, 0, 0, 0, 0, 0), 1.0);
        let units = vec![metre];
        let aliases = vec![];
        let prefixes = vec![Prefix::new("k", 1e3), Prefix::new("m", 1e-3)];
        Registry::new("test", units, aliases, prefixes)
    }

    #[test]
    fn exact_beats_nothing_else() {
        let r = sample_registry();
        assert!(r.find_exact("m").is_some());
        assert!(r.find_exact("km").is_none());
    }

    #[test]
    fn prefix_expansion_scales_base() {
        let r = sample_registry();
        let km = r.find("km").unwrap();
        assert_eq!(km.scale, 1e3);
        assert_eq!(km.symbol, "km");
    }

    #[test]
    fn unknown_symbol_is_none() {
        let r = sample_registry();
        assert!(r.find("xyz").is_none());
    }
}
