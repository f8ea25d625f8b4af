//! Loadmaster Engine: CG Resolver
//!
//! Mass/moment pairs to %MAC. Pure; a non-positive mass resolves to 0.

use crate::accumulator::PhaseTotals;
use crate::arithmetic::percent_mac;
use crate::domain::{FlightPhase, MassMoment, PhaseResult};

/// Resolve one phase.
pub fn resolve(totals: MassMoment, mac_length: f64) -> PhaseResult {
    PhaseResult {
        mass: totals.mass,
        moment: totals.moment,
        cg_percent_mac: percent_mac(totals.moment, totals.mass, mac_length),
    }
}

/// Resolved results for all three phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPhases {
    pub zero_fuel: PhaseResult,
    pub takeoff: PhaseResult,
    pub landing: PhaseResult,
}

impl ResolvedPhases {
    pub fn get(&self, phase: FlightPhase) -> &PhaseResult {
        match phase {
            FlightPhase::ZeroFuel => &self.zero_fuel,
            FlightPhase::Takeoff => &self.takeoff,
            FlightPhase::Landing => &self.landing,
        }
    }
}

pub fn resolve_all(totals: &PhaseTotals, mac_length: f64) -> ResolvedPhases {
    ResolvedPhases {
        zero_fuel: resolve(totals.zero_fuel, mac_length),
        takeoff: resolve(totals.ramp, mac_length),
        landing: resolve(totals.landing, mac_length),
    }
}
