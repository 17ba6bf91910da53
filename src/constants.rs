//! The session-scoped constants table: a name-to-unit map populated by
//! `define`, consulted before any built-in registry, with insertion order
//! preserved for `list`.
//!
//! The source material backs this with an arena allocator so symbol
//! lifetimes outlive individual evaluations without per-entry heap churn.
//! Rust's ownership model makes that unnecessary here: each entry simply
//! owns its `String`s, and the whole table (and therefore every string in
//! it) is dropped together on `clear_all`, which is the only lifetime
//! guarantee the arena was providing.

use ahash::AHashMap;

use crate::dimension::Dimension;
use crate::unit::Unit;

/// A session-scoped map from constant name to the unit it was defined as,
/// plus the insertion order needed for stable `list` output.
#[derive(Debug, Clone, Default)]
pub struct Constants {
    units: AHashMap<String, Unit>,
    order: Vec<String>,
}

impl Constants {
    pub fn new() -> Self {
        Self::default()
    }

    /// `define(name, q)`: builds a synthetic unit with `dim = q.dim`,
    /// `scale = q.value`, `offset = 0.0`, `symbol = name`. Replaces any
    /// existing entry while preserving its position in the listing order.
    pub fn define(&mut self, name: &str, dim: Dimension, value: f64) {
        let unit = Unit::scaled(name.to_string(), dim, value);
        if !self.units.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.units.insert(name.to_string(), unit);
    }

    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.units.get(name)
    }

    /// Removes a constant; returns whether it was present.
    pub fn clear(&mut self, name: &str) -> bool {
        let removed = self.units.remove(name).is_some();
        if removed {
            self.order.retain(|n| n != name);
        }
        removed
    }

    pub fn clear_all(&mut self) {
        self.units.clear();
        self.order.clear();
    }

    /// Constants in insertion order, for `list`.
    pub fn iter_in_order(&self) -> impl Iterator<Item = (&str, &Unit)> {
        self.order.iter().map(move |n| (n.as_str(), &self.units[n]))
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_then_get() {
        let mut c = Constants::new();
        c.define("pi_ish", Dimension::dimensionless(), 3.14);
        assert_eq!(c.get("pi_ish").unwrap().scale, 3.14);
    }

    #[test]
    fn redefine_keeps_listing_position() {
        let mut c = Constants::new();
        c.define("a", Dimension::dimensionless(), 1.0);
        c.define("b", Dimension::dimensionless(), 2.0);
        c.define("a", Dimension::dimensionless(), 9.0);
        let order: Vec<&str> = c.iter_in_order().map(|(n, _)| n).collect();
        assert_eq!(order, vec!["a", "b"]);
        assert_eq!(c.get("a").unwrap().scale, 9.0);
    }

    #[test]
    fn clear_removes_from_both_map_and_order() {
        let mut c = Constants::new();
        c.define("a", Dimension::dimensionless(), 1.0);
        assert!(c.clear("a"));
        assert!(c.get("a").is_none());
        assert!(c.is_empty());
    }

    #[test]
    fn clear_all_empties_everything() {
        let mut c = Constants::new();
        c.define("a", Dimension::dimensionless(), 1.0);
        c.define("b", Dimension::dimensionless(), 2.0);
        c.clear_all();
        assert!(c.is_empty());
    }
}
