//! Built-in unit catalogues: SI, Imperial, CGS, Industrial.
//!
//! Each catalogue populates one [`Registry`](crate::registry::Registry).
//! The driver consults them in the fixed order SI, Imperial, CGS,
//! Industrial (§4.3), after the constants table and before user extras.

pub mod cgs;
pub mod imperial;
pub mod industrial;
pub mod si;

use crate::registry::Registry;

/// Builds the four built-in registries in the order the driver expects.
pub fn builtin_registries() -> Vec<Registry> {
    vec![si::registry(), imperial::registry(), cgs::registry(), industrial::registry()]
}
