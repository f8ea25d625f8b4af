//! Loadmaster Engine: Engine
//!
//! Owns one validated profile and runs the pipeline on every explicit
//! recompute: accumulate, resolve CG, check envelope, assemble.
//! Holds no mutable state, so one engine can serve any number of
//! threads and snapshots.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::accumulator::accumulate;
use crate::cg::resolve_all;
use crate::domain::FlightPreparation;
use crate::envelope;
use crate::invariants::{validate_profile, validate_result, ProfileError};
use crate::loading::LoadConfiguration;
use crate::profile::{AircraftProfile, EnvelopePoint};
use crate::result::{assemble, LoadResult};

/// Weight & balance engine bound to one airframe.
#[derive(Debug, Clone)]
pub struct WeightBalanceEngine {
    profile: Arc<AircraftProfile>,
}

impl WeightBalanceEngine {
    /// Validate `profile` and build an engine. A malformed profile is
    /// refused outright.
    pub fn new(profile: AircraftProfile) -> Result<Self, ProfileError> {
        validate_profile(&profile)?;
        info!(
            registration = %profile.identity.registration,
            vertices = profile.envelope.len(),
            "aircraft profile accepted"
        );
        Ok(Self {
            profile: Arc::new(profile),
        })
    }

    /// Engine for the compiled-in G-CMCY profile.
    pub fn reference() -> Result<Self, ProfileError> {
        Self::new(AircraftProfile::g_cmcy())
    }

    pub fn profile(&self) -> &AircraftProfile {
        &self.profile
    }

    /// Whether a (%MAC, kg) point lies in the certified envelope.
    pub fn envelope_contains(&self, cg_percent_mac: f64, mass: f64) -> bool {
        envelope::contains(
            &self.profile.envelope,
            EnvelopePoint::new(cg_percent_mac, mass),
        )
    }

    /// Recompute a full result from a configuration snapshot.
    ///
    /// Deterministic: the same inputs always give a bit-identical result.
    pub fn recompute(
        &self,
        config: &LoadConfiguration,
        preparation: &FlightPreparation,
    ) -> LoadResult {
        let profile = &*self.profile;

        let totals = accumulate(profile, config);
        let phases = resolve_all(&totals, profile.mac_length);
        let verdict = envelope::evaluate(&profile.envelope, &profile.mass_limits, &phases);
        let result = assemble(phases, &totals, verdict, config, preparation);

        debug!(
            zfm = result.zero_fuel.mass,
            zfm_mac = result.zero_fuel.cg_percent_mac,
            tow = result.takeoff.mass,
            tow_mac = result.takeoff.cg_percent_mac,
            lnd = result.landing.mass,
            lnd_mac = result.landing.cg_percent_mac,
            safe = result.is_safe,
            "recomputed"
        );
        if result.landing_fuel_mass < 0.0 {
            debug!(
                landing_fuel = result.landing_fuel_mass,
                "planned burn exceeds ramp fuel"
            );
        }
        if !result.is_safe {
            let reasons: Vec<String> = result.violations().iter().map(|v| v.to_string()).collect();
            warn!(reasons = ?reasons, "load outside limits");
        }
        if let Err(e) = validate_result(&result) {
            warn!(error = %e, "non-finite figure in result");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MassField, SeatType, Violation};

    #[test]
    fn malformed_profile_refused() {
        let mut profile = AircraftProfile::g_cmcy();
        profile.envelope.truncate(1);
        let err = WeightBalanceEngine::new(profile).unwrap_err();
        assert_eq!(err, ProfileError::TooFewVertices { got: 1 });
    }

    #[test]
    fn empty_aircraft_is_safe() {
        let engine = WeightBalanceEngine::reference().unwrap();
        let r = engine.recompute(&LoadConfiguration::new(), &FlightPreparation::default());
        assert!(r.is_safe);
        assert!(r.violations().is_empty());
        assert!((r.zero_fuel.cg_percent_mac - 21.15).abs() < 0.01);
    }

    #[test]
    fn aft_heavy_load_leaves_envelope() {
        let engine = WeightBalanceEngine::reference().unwrap();
        let mut cfg = LoadConfiguration::new();
        cfg.set_mass(MassField::AftBaggage, 239.0).unwrap();
        for station in 6..9 {
            cfg.set_seat(station, SeatType::Male).unwrap();
        }
        let r = engine.recompute(&cfg, &FlightPreparation::default());
        assert!(r.zero_fuel.cg_percent_mac > 31.0);
        assert!(!r.is_safe);
        assert!(r.violations().contains(&Violation::EnvelopeExcursion));
    }

    #[test]
    fn overweight_takeoff_flagged() {
        let engine = WeightBalanceEngine::reference().unwrap();
        let mut cfg = LoadConfiguration::new();
        for station in 0..9 {
            cfg.set_seat(station, SeatType::Male).unwrap();
        }
        cfg.set_mass(MassField::RampFuel, 540.0).unwrap();
        let r = engine.recompute(&cfg, &FlightPreparation::default());
        assert!(r.takeoff.mass > 3680.0);
        assert!(!r.verdict.takeoff_ok);
        assert!(!r.is_safe);
    }

    #[test]
    fn envelope_query() {
        let engine = WeightBalanceEngine::reference().unwrap();
        assert!(engine.envelope_contains(25.0, 3000.0));
        assert!(!engine.envelope_contains(17.0, 3000.0));
    }
}
