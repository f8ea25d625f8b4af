//! Loadmaster Engine: Invariant Checks
//!
//! A profile that fails any check here is a certification-data integrity
//! problem. The engine refuses to construct from it.

use thiserror::Error;

use crate::domain::{FlightPhase, Station};
use crate::envelope::signed_area;
use crate::profile::AircraftProfile;
use crate::result::LoadResult;

/// Minimum number of envelope vertices.
pub const MIN_ENVELOPE_VERTICES: usize = 3;

/// Malformed aircraft profile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("[INVARIANT:basic_mass] basic mass must be finite and positive, got {0}")]
    BasicMass(f64),
    #[error("[INVARIANT:basic_arm] basic arm must be finite, got {0}")]
    BasicArm(f64),
    #[error("[INVARIANT:mac_length] MAC length must be finite and positive, got {0}")]
    MacLength(f64),
    #[error("[INVARIANT:envelope_vertices] envelope needs at least {min} vertices, got {got}", min = MIN_ENVELOPE_VERTICES)]
    TooFewVertices { got: usize },
    #[error("[INVARIANT:envelope_finite] envelope vertex {index} is not finite")]
    NonFiniteVertex { index: usize },
    #[error("[INVARIANT:envelope_area] envelope encloses no area")]
    DegenerateEnvelope,
    #[error("[INVARIANT:mass_limit] {phase} limit must be finite and positive, got {value}")]
    MassLimit { phase: FlightPhase, value: f64 },
    #[error("[INVARIANT:station_arm] arm for {station:?} must be finite, got {arm}")]
    StationArm { station: Station, arm: f64 },
    #[error("[INVARIANT:second_pilot_mass] second pilot mass must be finite and non-negative, got {0}")]
    SecondPilotMass(f64),
    #[error("[INVARIANT:passenger_label] passenger station {0} has an empty label")]
    PassengerLabel(usize),
}

/// A recomputation produced a non-finite figure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[INVARIANT:finite_result] {field} is not finite")]
pub struct NonFiniteResult {
    pub field: &'static str,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run every profile check. Returns the first failure.
pub fn validate_profile(profile: &AircraftProfile) -> Result<(), ProfileError> {
    check_basic(profile)?;
    check_envelope(profile)?;
    check_mass_limits(profile)?;
    check_station_arms(profile)?;
    check_passenger_labels(profile)?;
    Ok(())
}

/// Every number in a result must be finite.
pub fn validate_result(result: &LoadResult) -> Result<(), NonFiniteResult> {
    let fields = [
        ("zero_fuel.mass", result.zero_fuel.mass),
        ("zero_fuel.moment", result.zero_fuel.moment),
        ("zero_fuel.cg_percent_mac", result.zero_fuel.cg_percent_mac),
        ("takeoff.mass", result.takeoff.mass),
        ("takeoff.moment", result.takeoff.moment),
        ("takeoff.cg_percent_mac", result.takeoff.cg_percent_mac),
        ("landing.mass", result.landing.mass),
        ("landing.moment", result.landing.moment),
        ("landing.cg_percent_mac", result.landing.cg_percent_mac),
        ("landing_fuel_mass", result.landing_fuel_mass),
    ];
    match fields.iter().find(|(_, v)| !v.is_finite()) {
        Some(&(field, _)) => Err(NonFiniteResult { field }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Individual checks (private)
// ---------------------------------------------------------------------------

fn check_basic(profile: &AircraftProfile) -> Result<(), ProfileError> {
    if !(profile.basic_mass.is_finite() && profile.basic_mass > 0.0) {
        return Err(ProfileError::BasicMass(profile.basic_mass));
    }
    if !profile.basic_arm.is_finite() {
        return Err(ProfileError::BasicArm(profile.basic_arm));
    }
    if !(profile.mac_length.is_finite() && profile.mac_length > 0.0) {
        return Err(ProfileError::MacLength(profile.mac_length));
    }
    if !(profile.second_pilot_mass.is_finite() && profile.second_pilot_mass >= 0.0) {
        return Err(ProfileError::SecondPilotMass(profile.second_pilot_mass));
    }
    Ok(())
}

fn check_envelope(profile: &AircraftProfile) -> Result<(), ProfileError> {
    let envelope = &profile.envelope;
    if envelope.len() < MIN_ENVELOPE_VERTICES {
        return Err(ProfileError::TooFewVertices {
            got: envelope.len(),
        });
    }
    if let Some(index) = envelope
        .iter()
        .position(|p| !(p.mac_percent.is_finite() && p.mass.is_finite()))
    {
        return Err(ProfileError::NonFiniteVertex { index });
    }
    if signed_area(envelope) == 0.0 {
        return Err(ProfileError::DegenerateEnvelope);
    }
    Ok(())
}

fn check_mass_limits(profile: &AircraftProfile) -> Result<(), ProfileError> {
    let limits = &profile.mass_limits;
    for (phase, value) in [
        (FlightPhase::ZeroFuel, limits.zero_fuel),
        (FlightPhase::Takeoff, limits.takeoff),
        (FlightPhase::Landing, limits.landing),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(ProfileError::MassLimit { phase, value });
        }
    }
    Ok(())
}

fn check_station_arms(profile: &AircraftProfile) -> Result<(), ProfileError> {
    match profile
        .station_arms
        .all()
        .into_iter()
        .find(|(_, arm)| !arm.is_finite())
    {
        Some((station, arm)) => Err(ProfileError::StationArm { station, arm }),
        None => Ok(()),
    }
}

fn check_passenger_labels(profile: &AircraftProfile) -> Result<(), ProfileError> {
    match profile
        .passenger_labels
        .iter()
        .position(|l| l.trim().is_empty())
    {
        Some(station) => Err(ProfileError::PassengerLabel(station)),
        None => Ok(()),
    }
}
