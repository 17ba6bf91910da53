//! The 7-exponent dimensional algebra.
//!
//! A [`Dimension`] is a tuple of signed integer exponents
//! `(L, M, T, I, Θ, N, J)` for length, mass, time, current, temperature,
//! amount, and luminous intensity. Equality is structural and exact; there
//! is no unit attached here at all, only the exponent vector.

use std::fmt;

use crate::error::DimError;

/// Basis index for length.
pub const L: usize = 0;
/// Basis index for mass.
pub const M: usize = 1;
/// Basis index for time.
pub const T: usize = 2;
/// Basis index for electric current.
pub const I: usize = 3;
/// Basis index for thermodynamic temperature.
pub const THETA: usize = 4;
/// Basis index for amount of substance.
pub const N: usize = 5;
/// Basis index for luminous intensity.
pub const J: usize = 6;

const BASIS_LABELS: [&str; 7] = ["L", "M", "T", "I", "Θ", "N", "J"];

/// The 7-integer exponent vector `(L, M, T, I, Θ, N, J)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Dimension {
    pub exponents: [i32; 7],
}

impl Dimension {
    /// Builds a dimension from its seven exponents, in SI-base order.
    pub const fn new(l: i32, m: i32, t: i32, i: i32, theta: i32, n: i32, j: i32) -> Self {
        Self {
            exponents: [l, m, t, i, theta, n, j],
        }
    }

    /// The dimensionless identity, `(0, 0, 0, 0, 0, 0, 0)`.
    pub const fn dimensionless() -> Self {
        Self::new(0, 0, 0, 0, 0, 0, 0)
    }

    pub const fn is_dimensionless(&self) -> bool {
        let e = self.exponents;
        e[0] == 0 && e[1] == 0 && e[2] == 0 && e[3] == 0 && e[4] == 0 && e[5] == 0 && e[6] == 0
    }

    /// Is this exactly a single basis axis raised to the first power? Used
    /// by the normalizer to discover basis symbols in a registry.
    pub fn is_single_axis_unit(&self) -> bool {
        let nonzero: Vec<i32> = self.exponents.iter().copied().filter(|&e| e != 0).collect();
        nonzero.len() == 1 && nonzero[0] == 1
    }

    /// True if exactly one of the 7 axes is nonzero, at any exponent
    /// (e.g. both `m` and `Hz` qualify; `N` does not). Used by the
    /// normalizer to exclude trivial axis relabelings from its one-step
    /// derived-reduction search (§4.9 step 3's "not basis vectors").
    pub fn is_axis_aligned(&self) -> bool {
        self.exponents.iter().filter(|&&e| e != 0).count() == 1
    }

    /// Componentwise addition: dimension of a product.
    pub fn add(&self, other: &Dimension) -> Dimension {
        let mut out = [0i32; 7];
        for k in 0..7 {
            out[k] = self.exponents[k] + other.exponents[k];
        }
        Dimension { exponents: out }
    }

    /// Componentwise subtraction: dimension of a quotient.
    pub fn sub(&self, other: &Dimension) -> Dimension {
        let mut out = [0i32; 7];
        for k in 0..7 {
            out[k] = self.exponents[k] - other.exponents[k];
        }
        Dimension { exponents: out }
    }

    /// Scalar multiply every exponent by an integer power.
    pub fn powi(&self, k: i32) -> Dimension {
        let mut out = [0i32; 7];
        for idx in 0..7 {
            out[idx] = self.exponents[idx] * k;
        }
        Dimension { exponents: out }
    }

    /// Fractional-exponent variant. Succeeds only when every resulting
    /// component rounds to an integer within `1e-9`; otherwise
    /// `DimError::NonIntegerDim`.
    pub fn powf(&self, k: f64) -> Result<Dimension, DimError> {
        let mut out = [0i32; 7];
        for idx in 0..7 {
            let raw = self.exponents[idx] as f64 * k;
            let rounded = raw.round();
            if (raw - rounded).abs() > 1e-9 {
                return Err(DimError::NonIntegerDim);
            }
            out[idx] = rounded as i32;
        }
        Ok(Dimension { exponents: out })
    }

    /// Sum of absolute values of the 7 exponents; used by the normalizer's
    /// "maximally reduces complexity" heuristic.
    pub fn complexity(&self) -> i32 {
        self.exponents.iter().map(|e| e.abs()).sum()
    }

    pub fn eql(&self, other: &Dimension) -> bool {
        self.exponents == other.exponents
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "[]");
        }
        write!(f, "[")?;
        let mut first = true;
        for (idx, &exp) in self.exponents.iter().enumerate() {
            if exp == 0 {
                continue;
            }
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write!(f, "{}^{}", BASIS_LABELS[idx], exp)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_identity() {
        let d = Dimension::new(1, -2, 3, 0, 0, 0, 0);
        assert_eq!(d.add(&Dimension::dimensionless()), d);
    }

    #[test]
    fn sub_self_is_zero() {
        let d = Dimension::new(1, -2, 3, 0, 0, 0, 0);
        assert_eq!(d.sub(&d), Dimension::dimensionless());
    }

    #[test]
    fn add_commutes() {
        let a = Dimension::new(1, 0, -1, 0, 0, 0, 0);
        let b = Dimension::new(0, 1, 2, 0, 0, 0, 0);
        assert_eq!(a.add(&b), b.add(&a));
    }

    #[test]
    fn powi_scales_every_component() {
        let d = Dimension::new(1, 0, -1, 0, 0, 0, 0);
        assert_eq!(d.powi(2), Dimension::new(2, 0, -2, 0, 0, 0, 0));
    }

    #[test]
    fn powf_integer_result_ok() {
        let area = Dimension::new(2, 0, 0, 0, 0, 0, 0);
        assert_eq!(area.powf(0.5).unwrap(), Dimension::new(1, 0, 0, 0, 0, 0, 0));
    }

    #[test]
    fn powf_non_integer_errs() {
        let length = Dimension::new(1, 0, 0, 0, 0, 0, 0);
        assert!(length.powf(0.5).is_err());
    }

    #[test]
    fn display_omits_zero_exponents() {
        let velocity = Dimension::new(1, 0, -1, 0, 0, 0, 0);
        assert_eq!(velocity.to_string(), "[L^1 T^-1]");
        assert_eq!(Dimension::dimensionless().to_string(), "[]");
    }
}
