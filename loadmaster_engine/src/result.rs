//! Loadmaster Engine: Result Assembler
//!
//! Packages phase results, derived landing fuel, the verdict and the
//! echoed inputs into one immutable record. No arithmetic happens here.

use serde::{Deserialize, Serialize};

use crate::accumulator::PhaseTotals;
use crate::cg::ResolvedPhases;
use crate::domain::{EnvelopeVerdict, FlightPhase, FlightPreparation, PhaseResult, Violation};
use crate::loading::LoadConfiguration;

/// Snapshot of one recomputation. Superseded by the next one, never
/// mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadResult {
    pub zero_fuel: PhaseResult,
    pub takeoff: PhaseResult,
    pub landing: PhaseResult,
    pub landing_fuel_mass: f64,
    pub is_safe: bool,
    pub verdict: EnvelopeVerdict,
    /// Inputs this result was computed from.
    pub inputs: LoadConfiguration,
    pub preparation: FlightPreparation,
}

impl LoadResult {
    pub fn phase(&self, phase: FlightPhase) -> &PhaseResult {
        match phase {
            FlightPhase::ZeroFuel => &self.zero_fuel,
            FlightPhase::Takeoff => &self.takeoff,
            FlightPhase::Landing => &self.landing,
        }
    }

    pub fn violations(&self) -> Vec<Violation> {
        self.verdict.violations()
    }
}

pub fn assemble(
    phases: ResolvedPhases,
    totals: &PhaseTotals,
    verdict: EnvelopeVerdict,
    config: &LoadConfiguration,
    preparation: &FlightPreparation,
) -> LoadResult {
    LoadResult {
        zero_fuel: phases.zero_fuel,
        takeoff: phases.takeoff,
        landing: phases.landing,
        landing_fuel_mass: totals.landing_fuel_mass,
        is_safe: verdict.is_safe(),
        verdict,
        inputs: config.clone(),
        preparation: preparation.clone(),
    }
}
