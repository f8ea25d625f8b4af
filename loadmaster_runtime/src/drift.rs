//! Drift detection: determinism verification and result comparison.

use loadmaster_engine::domain::{FlightPhase, FlightPreparation, Violation};
use loadmaster_engine::engine::WeightBalanceEngine;
use loadmaster_engine::events::LoadEdit;
use loadmaster_engine::result::LoadResult;
use serde::Serialize;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::replay;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriftError {
    #[error("determinism failure: two replays produced different hashes ({first} vs {second})")]
    Nondeterministic { first: String, second: String },
}

/// Replay the same edits twice and require identical hashes.
/// Returns the agreed hash.
pub fn verify_determinism(
    engine: &WeightBalanceEngine,
    edits: &[LoadEdit],
    preparation: &FlightPreparation,
) -> Result<String, DriftError> {
    let first = replay::rebuild_hash(engine, edits, preparation);
    let second = replay::rebuild_hash(engine, edits, preparation);
    if first != second {
        return Err(DriftError::Nondeterministic { first, second });
    }
    Ok(first)
}

/// How the overall verdict moved from `a` to `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyTransition {
    StillSafe,
    StillUnsafe,
    BecameUnsafe,
    BecameSafe,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseDelta {
    pub phase: FlightPhase,
    pub mass_a: f64,
    pub mass_b: f64,
    pub mass_delta: f64,
    pub cg_a: f64,
    pub cg_b: f64,
    pub cg_delta: f64,
}

/// Structured comparison of two results, `b` relative to `a`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadDelta {
    /// Flight order: ZFM, TOW, LND.
    pub phases: Vec<PhaseDelta>,
    pub landing_fuel_delta: f64,
    pub safety: SafetyTransition,
    /// Violations present in `b` but not in `a`.
    pub raised: Vec<Violation>,
    pub cleared: Vec<Violation>,
}

pub fn compare_results(a: &LoadResult, b: &LoadResult) -> LoadDelta {
    let phases = FlightPhase::iter()
        .map(|phase| {
            let (pa, pb) = (a.phase(phase), b.phase(phase));
            PhaseDelta {
                phase,
                mass_a: pa.mass,
                mass_b: pb.mass,
                mass_delta: pb.mass - pa.mass,
                cg_a: pa.cg_percent_mac,
                cg_b: pb.cg_percent_mac,
                cg_delta: pb.cg_percent_mac - pa.cg_percent_mac,
            }
        })
        .collect();

    let safety = match (a.is_safe, b.is_safe) {
        (true, true) => SafetyTransition::StillSafe,
        (false, false) => SafetyTransition::StillUnsafe,
        (true, false) => SafetyTransition::BecameUnsafe,
        (false, true) => SafetyTransition::BecameSafe,
    };

    let (va, vb) = (a.violations(), b.violations());
    let raised = vb.iter().copied().filter(|v| !va.contains(v)).collect();
    let cleared = va.iter().copied().filter(|v| !vb.contains(v)).collect();

    LoadDelta {
        phases,
        landing_fuel_delta: b.landing_fuel_mass - a.landing_fuel_mass,
        safety,
        raised,
        cleared,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadmaster_engine::domain::MassField;
    use loadmaster_engine::loading::LoadConfiguration;

    fn engine() -> WeightBalanceEngine {
        WeightBalanceEngine::reference().unwrap()
    }

    #[test]
    fn replays_agree() {
        let edits = vec![
            LoadEdit::mass(MassField::RampFuel, "412.5"),
            LoadEdit::SecondPilot { present: true },
        ];
        let hash = verify_determinism(&engine(), &edits, &FlightPreparation::default()).unwrap();
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn identical_results_have_zero_delta() {
        let r = engine().recompute(&LoadConfiguration::new(), &FlightPreparation::default());
        let d = compare_results(&r, &r);
        assert_eq!(d.phases.len(), 3);
        assert!(d.phases.iter().all(|p| p.mass_delta == 0.0 && p.cg_delta == 0.0));
        assert_eq!(d.safety, SafetyTransition::StillSafe);
        assert!(d.raised.is_empty() && d.cleared.is_empty());
    }

    #[test]
    fn overweight_shows_as_raised_violation() {
        let e = engine();
        let prep = FlightPreparation::default();
        let a = e.recompute(&LoadConfiguration::new(), &prep);
        let mut cfg = LoadConfiguration::new();
        cfg.set_mass(MassField::RampFuel, 1200.0).unwrap();
        cfg.set_mass(MassField::PlannedBurn, 1000.0).unwrap();
        let b = e.recompute(&cfg, &prep);

        let d = compare_results(&a, &b);
        assert_eq!(d.safety, SafetyTransition::BecameUnsafe);
        assert_eq!(d.raised, vec![Violation::TakeoffOverweight]);
        assert!((d.phases[1].mass_delta - 1200.0).abs() < 1e-9);
        assert!((d.landing_fuel_delta - 200.0).abs() < 1e-9);

        let back = compare_results(&b, &a);
        assert_eq!(back.safety, SafetyTransition::BecameSafe);
        assert_eq!(back.cleared, vec![Violation::TakeoffOverweight]);
    }
}
