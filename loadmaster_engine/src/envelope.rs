//! Loadmaster Engine: Envelope Validator
//!
//! Polygon containment in (%MAC, kg) space plus absolute mass-limit
//! checks. Never fails: every outcome is a verdict.
//!
//! Boundary rule: a point on an edge or vertex (within `BOUNDARY_EPS`)
//! is inside. It is tested before the ray cast so the answer does not
//! depend on edge orientation.

use crate::cg::ResolvedPhases;
use crate::domain::EnvelopeVerdict;
use crate::profile::{EnvelopePoint, MassLimits};

/// Absolute tolerance for the on-boundary test, in axis units.
pub const BOUNDARY_EPS: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Polygon geometry
// ---------------------------------------------------------------------------

/// Edges of an implicitly closed polygon, last vertex back to the first.
fn edges(polygon: &[EnvelopePoint]) -> impl Iterator<Item = (EnvelopePoint, EnvelopePoint)> + '_ {
    polygon
        .iter()
        .copied()
        .zip(polygon.iter().copied().cycle().skip(1))
}

/// Signed area by the shoelace formula. Positive for counter-clockwise.
pub fn signed_area(polygon: &[EnvelopePoint]) -> f64 {
    edges(polygon)
        .map(|(a, b)| a.mac_percent * b.mass - b.mac_percent * a.mass)
        .sum::<f64>()
        / 2.0
}

/// Area centroid. `None` for a degenerate polygon.
pub fn centroid(polygon: &[EnvelopePoint]) -> Option<EnvelopePoint> {
    let area = signed_area(polygon);
    if polygon.len() < 3 || area == 0.0 {
        return None;
    }
    let (mut cx, mut cy) = (0.0, 0.0);
    for (a, b) in edges(polygon) {
        let cross = a.mac_percent * b.mass - b.mac_percent * a.mass;
        cx += (a.mac_percent + b.mac_percent) * cross;
        cy += (a.mass + b.mass) * cross;
    }
    Some(EnvelopePoint::new(cx / (6.0 * area), cy / (6.0 * area)))
}

fn on_segment(a: EnvelopePoint, b: EnvelopePoint, p: EnvelopePoint) -> bool {
    let (dx, dy) = (b.mac_percent - a.mac_percent, b.mass - a.mass);
    let (px, py) = (p.mac_percent - a.mac_percent, p.mass - a.mass);

    let within_box = p.mac_percent >= a.mac_percent.min(b.mac_percent) - BOUNDARY_EPS
        && p.mac_percent <= a.mac_percent.max(b.mac_percent) + BOUNDARY_EPS
        && p.mass >= a.mass.min(b.mass) - BOUNDARY_EPS
        && p.mass <= a.mass.max(b.mass) + BOUNDARY_EPS;
    if !within_box {
        return false;
    }

    let length = dx.hypot(dy);
    if length == 0.0 {
        return px.hypot(py) <= BOUNDARY_EPS;
    }
    (dx * py - dy * px).abs() / length <= BOUNDARY_EPS
}

/// True if `point` lies on any edge of the polygon.
pub fn on_boundary(polygon: &[EnvelopePoint], point: EnvelopePoint) -> bool {
    edges(polygon).any(|(a, b)| on_segment(a, b, point))
}

/// Even-odd ray casting: a horizontal ray from `point` towards +%MAC,
/// counting edge crossings. Boundary points count as inside.
pub fn contains(polygon: &[EnvelopePoint], point: EnvelopePoint) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    if on_boundary(polygon, point) {
        return true;
    }

    let mut inside = false;
    for (a, b) in edges(polygon) {
        // Half-open test on mass so a vertex on the ray is counted once.
        if (a.mass > point.mass) != (b.mass > point.mass) {
            let t = (point.mass - a.mass) / (b.mass - a.mass);
            let x_cross = a.mac_percent + t * (b.mac_percent - a.mac_percent);
            if point.mac_percent < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Check the zero-fuel point against the envelope and every phase
/// against its mass limit. Equality with a limit passes.
pub fn evaluate(
    polygon: &[EnvelopePoint],
    limits: &MassLimits,
    phases: &ResolvedPhases,
) -> EnvelopeVerdict {
    let zf = &phases.zero_fuel;
    EnvelopeVerdict {
        polygon_ok: contains(polygon, EnvelopePoint::new(zf.cg_percent_mac, zf.mass)),
        zero_fuel_ok: zf.mass <= limits.zero_fuel,
        takeoff_ok: phases.takeoff.mass <= limits.takeoff,
        landing_ok: phases.landing.mass <= limits.landing,
    }
}
