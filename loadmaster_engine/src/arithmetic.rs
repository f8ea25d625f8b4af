//! Loadmaster Engine: Arithmetic Primitives
//!
//! All masses in kilograms, arms in metres, moments in kg·m.
//! Every helper here is total: no panics, no NaN for finite input.

/// Percentage scale applied when converting a CG arm to %MAC.
pub const PERCENT: f64 = 100.0;

/// Moment of a mass placed at an arm.
pub fn moment(mass: f64, arm: f64) -> f64 {
    mass * arm
}

/// CG position as a percentage of the mean aerodynamic chord.
///
/// `(moment / mass) * 100 / mac_length`. A non-positive mass has no
/// meaningful CG, so the result is defined as `0.0` instead of dividing
/// by zero.
pub fn percent_mac(moment: f64, mass: f64, mac_length: f64) -> f64 {
    if mass <= 0.0 {
        return 0.0;
    }
    ((moment / mass) * PERCENT) / mac_length
}

/// Round half away from zero to one decimal place, as printed on the
/// load sheet. Never returns `-0.0`.
pub fn round_to_tenth(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Relative closeness test used by self-checks and tests.
pub fn approx_eq(a: f64, b: f64, rel_tol: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs()).max(f64::MIN_POSITIVE);
    (a - b).abs() <= rel_tol * scale
}
