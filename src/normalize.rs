//! Reduces a bag of 7 exponents to a short, human-readable unit symbol
//! (§4.9). Consulted whenever the evaluator needs a display unit that
//! isn't simply inherited from an operand (`*`, `/`, `^` results).

use crate::dimension::Dimension;
use crate::registry::Registry;

/// Units preferred as tie-breakers during one-step derived reduction,
/// highest priority first.
const TIE_BREAK_PRIORITY: [&str; 8] = ["N", "J", "W", "Pa", "m/s^2", "m/s", "m^2", "m^3"];

const DEFAULT_BASIS: [&str; 7] = ["m", "kg", "s", "A", "K", "mol", "cd"];

/// Turns `dim` into a display string, consulting `registries` in order.
/// `fallback` is returned verbatim for a dimensionless result (§4.9 step
/// 5) and is also the tie-of-last-resort if no registry has anything
/// useful to say.
pub fn normalize(dim: &Dimension, registries: &[&Registry], fallback: &str) -> String {
    if dim.is_dimensionless() {
        return fallback.to_string();
    }

    // Step 1: an alias whose target unit has exactly this dimension.
    for registry in registries {
        for alias in registry.iter_aliases() {
            if alias.unit.dim.eql(dim) {
                return alias.name.clone();
            }
        }
    }

    // Step 2: a unit with the exact dimension and scale 1.0; otherwise
    // remember the first same-dimension unit (any scale) as a fallback.
    let mut same_dim_fallback: Option<String> = None;
    for registry in registries {
        for unit in registry.iter_units() {
            if unit.dim.eql(dim) {
                if unit.scale == 1.0 {
                    return unit.symbol.clone();
                }
                same_dim_fallback.get_or_insert_with(|| unit.symbol.clone());
            }
        }
    }

    // Step 3/4: one-step derived reduction, then emit basis units.
    if let Some(symbol) = derived_reduction(dim, registries) {
        return symbol;
    }

    if let Some(s) = same_dim_fallback {
        return s;
    }

    emit_from_basis(dim, registries)
}

/// Picks the scale-1.0, non-axis-aligned unit in `registries` whose
/// subtraction from `dim` maximally reduces complexity, then emits that
/// symbol followed by the remaining basis units.
fn derived_reduction(dim: &Dimension, registries: &[&Registry]) -> Option<String> {
    let base_complexity = dim.complexity();
    let mut best: Option<(i32, &str, Dimension)> = None;

    for registry in registries {
        for unit in registry.iter_units() {
            if unit.scale != 1.0 || unit.dim.is_axis_aligned() || unit.dim.is_dimensionless() {
                continue;
            }
            let remainder = dim.sub(&unit.dim);
            let reduced_complexity = remainder.complexity();
            if reduced_complexity >= base_complexity {
                continue;
            }
            let improvement = base_complexity - reduced_complexity;
            let is_better = match &best {
                None => true,
                Some((best_improvement, best_symbol, _)) => {
                    improvement > *best_improvement
                        || (improvement == *best_improvement && tie_break_rank(&unit.symbol) < tie_break_rank(best_symbol))
                }
            };
            if is_better {
                best = Some((improvement, unit.symbol.as_str(), remainder));
            }
        }
    }

    let (_, symbol, remainder) = best?;
    Some(compose_symbol(symbol, &remainder, registries))
}

fn tie_break_rank(symbol: &str) -> usize {
    TIE_BREAK_PRIORITY.iter().position(|s| *s == symbol).unwrap_or(TIE_BREAK_PRIORITY.len())
}

fn emit_from_basis(dim: &Dimension, registries: &[&Registry]) -> String {
    compose_symbol("", dim, registries)
}

/// Joins `lead` (a derived symbol, or empty) with the remaining
/// positive-exponent basis units (by `*`) and negative-exponent basis
/// units (by `/`), per §4.9 step 4.
fn compose_symbol(lead: &str, remainder: &Dimension, registries: &[&Registry]) -> String {
    let basis = basis_symbols(registries);
    let mut positives = Vec::new();
    let mut negatives = Vec::new();
    for (axis, &exp) in remainder.exponents.iter().enumerate() {
        if exp == 0 {
            continue;
        }
        let symbol = basis[axis];
        let piece = if exp.abs() == 1 { symbol.to_string() } else { format!("{symbol}^{}", exp.abs()) };
        if exp > 0 {
            positives.push(piece);
        } else {
            negatives.push(piece);
        }
    }

    let mut out = String::new();
    if !lead.is_empty() {
        out.push_str(lead);
    }
    for p in positives {
        if !out.is_empty() {
            out.push('*');
        }
        out.push_str(&p);
    }
    if !negatives.is_empty() {
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(&negatives.join("*"));
    }
    if out.is_empty() {
        out = lead.to_string();
    }
    out
}

/// Discovers the 7 basis symbols (one per axis) from `registries`: a unit
/// with `scale = 1.0` whose dimension is exactly that single axis at
/// exponent 1. Falls back to `m, kg, s, A, K, mol, cd` for any axis no
/// registry defines.
fn basis_symbols(registries: &[&Registry]) -> [&'static str; 7] {
    let mut found: [Option<&str>; 7] = [None; 7];
    for registry in registries {
        for unit in registry.iter_units() {
            if unit.scale != 1.0 || !unit.dim.is_single_axis_unit() {
                continue;
            }
            for (axis, &exp) in unit.dim.exponents.iter().enumerate() {
                if exp == 1 && found[axis].is_none() {
                    found[axis] = Some(leak_symbol(&unit.symbol));
                }
            }
        }
    }
    let mut out = DEFAULT_BASIS;
    for (axis, slot) in found.into_iter().enumerate() {
        if let Some(s) = slot {
            out[axis] = s;
        }
    }
    out
}

/// Registries are built once at engine construction and live for the
/// process, so leaking a handful of short basis symbols (at most 7,
/// deduplicated by the caller's `found` cache) is bounded and avoids
/// threading a lifetime through every normalizer call.
fn leak_symbol(s: &str) -> &'static str {
    Box::leak(s.to_string().into_boxed_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::si;

    #[test]
    fn velocity_normalizes_to_m_per_s() {
        let si = si::registry();
        let velocity = Dimension::new(1, 0, -1, 0, 0, 0, 0);
        let out = normalize(&velocity, &[&si], "?");
        assert_eq!(out, "m/s");
    }

    #[test]
    fn area_normalizes_to_m2() {
        let si = si::registry();
        let area = Dimension::new(2, 0, 0, 0, 0, 0, 0);
        let out = normalize(&area, &[&si], "?");
        assert_eq!(out, "m^2");
    }

    #[test]
    fn force_dimension_normalizes_to_newton() {
        let si = si::registry();
        let force = Dimension::new(1, 1, -2, 0, 0, 0, 0);
        let out = normalize(&force, &[&si], "?");
        assert_eq!(out, "N");
    }

    #[test]
    fn dimensionless_returns_fallback() {
        let si = si::registry();
        let out = normalize(&Dimension::dimensionless(), &[&si], "ratio");
        assert_eq!(out, "ratio");
    }

    #[test]
    fn energy_normalizes_to_joule_not_newton_metre() {
        let si = si::registry();
        let energy = Dimension::new(2, 1, -2, 0, 0, 0, 0);
        let out = normalize(&energy, &[&si], "?");
        assert_eq!(out, "J");
    }
}
