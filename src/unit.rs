//! The unit model: a named conversion to canonical (SI) form.
//!
//! `canonical = (v + offset) * scale`, `v = canonical / scale - offset`.
//! Affine units (`offset != 0`) are only meaningful at exponent 1; callers
//! composing units at any other exponent must ignore the offset, which this
//! module enforces by exposing a separate multiplicative-only accessor.

use std::fmt;

use crate::dimension::Dimension;

/// A named conversion to canonical (SI) form.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub symbol: String,
    pub dim: Dimension,
    pub scale: f64,
    pub offset: f64,
}

impl Unit {
    pub fn new(symbol: impl Into<String>, dim: Dimension, scale: f64, offset: f64) -> Self {
        Self {
            symbol: symbol.into(),
            dim,
            scale,
            offset,
        }
    }

    /// Pure multiplicative unit (no affine offset).
    pub fn scaled(symbol: impl Into<String>, dim: Dimension, scale: f64) -> Self {
        Self::new(symbol, dim, scale, 0.0)
    }

    pub fn is_affine(&self) -> bool {
        self.offset != 0.0
    }

    /// `canonical = (v + offset) * scale`. Affine-aware: callers at
    /// exponent != 1 must instead use [`Unit::to_canonical_multiplicative`].
    pub fn to_canonical(&self, v: f64) -> f64 {
        (v + self.offset) * self.scale
    }

    /// `v = canonical / scale - offset`.
    pub fn from_canonical(&self, canonical: f64) -> f64 {
        canonical / self.scale - self.offset
    }

    /// Multiplicative-only canonical factor, ignoring any affine offset.
    /// Correct for any exponent other than 1, and for compound units.
    pub fn to_canonical_multiplicative(&self, v: f64) -> f64 {
        v * self.scale
    }

    /// The canonical factor for one unit quantity raised to `exp`,
    /// ignoring affine offset by construction (§4.7: `toCanonical(1)^exp`).
    pub fn canonical_factor_pow(&self, exp: i32) -> f64 {
        self.scale.powi(exp)
    }

    /// Expand this unit by a prefix: scale is multiplied by the prefix
    /// factor, the affine offset is preserved, and the reported symbol is
    /// the caller-supplied combined symbol (prefix + base).
    pub fn with_prefix(&self, combined_symbol: impl Into<String>, factor: f64) -> Unit {
        Unit {
            symbol: combined_symbol.into(),
            dim: self.dim,
            scale: self.scale * factor,
            offset: self.offset,
        }
    }

    /// Raise a unit to an integer exponent, producing a derived unit whose
    /// scale is multiplicative-only (affine offset dropped, per §4.2/§4.6).
    pub fn powi(&self, exp: i32) -> Unit {
        Unit {
            symbol: if exp == 1 {
                self.symbol.clone()
            } else {
                format!("{}^{}", self.symbol, exp)
            },
            dim: self.dim.powi(exp),
            scale: self.scale.powi(exp),
            offset: 0.0,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// A secondary name bound to a specific unit, e.g. `Newton -> N`.
#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    pub name: String,
    pub unit: Unit,
}

impl Alias {
    pub fn new(name: impl Into<String>, unit: Unit) -> Self {
        Self {
            name: name.into(),
            unit,
        }
    }
}

/// An SI-style prefix: a `(symbol, factor)` pair, scoped to one registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prefix {
    pub symbol: &'static str,
    pub factor: f64,
}

impl Prefix {
    pub const fn new(symbol: &'static str, factor: f64) -> Self {
        Self { symbol, factor }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;

    fn celsius() -> Unit {
        Unit::new("degC", Dimension::new(0, 0, 0, 0, 1, 0, 0), 1.0, 273.15)
    }

    #[test]
    fn affine_round_trips() {
        let c = celsius();
        for v in [-1e6, -273.15, 0.0, 100.0, 1e6] {
            let canonical = c.to_canonical(v);
            let back = c.from_canonical(canonical);
            assert!((back - v).abs() < 1e-9, "v={v} back={back}");
        }
    }

    #[test]
    fn celsius_zero_is_273_15_kelvin() {
        let c = celsius();
        assert!((c.to_canonical(0.0) - 273.15).abs() < 1e-12);
    }

    #[test]
    fn prefix_expansion_multiplies_scale_and_keeps_offset() {
        let metre = Unit::scaled("m", Dimension::new(1, 0, 0, 0, 0, 0, 0), 1.0);
        let milli = metre.with_prefix("mm", 1e-3);
        assert_eq!(milli.scale, 1e-3);
        assert_eq!(milli.offset, 0.0);
        assert_eq!(milli.symbol, "mm");
    }

    #[test]
    fn powi_drops_affine_offset() {
        let c = celsius();
        let squared = c.powi(2);
        assert_eq!(squared.offset, 0.0);
        assert_eq!(squared.dim, Dimension::new(0, 0, 0, 0, 2, 0, 0));
    }
}
