//! Loadmaster Engine: Load Configuration
//!
//! The one mutable input record. It is owned by the caller, edited in
//! place, and handed to the engine by reference on every recompute.
//! Every value stored here is finite and non-negative: bad input is
//! rejected at this boundary and the previous value is kept.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::domain::{MassField, SeatType, PASSENGER_STATIONS};
use crate::events::LoadEdit;

/// Rejected user input. The configuration is left unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field}: {raw:?} is not a number")]
    NotANumber { field: MassField, raw: String },
    #[error("{field}: {raw:?} is not a finite mass")]
    NotFinite { field: MassField, raw: String },
    #[error("{field}: {value} kg is negative")]
    Negative { field: MassField, value: f64 },
    #[error("passenger station {station} does not exist (0..{max})", max = PASSENGER_STATIONS)]
    StationOutOfRange { station: usize },
}

/// Parse a mass entry. Blank text means zero.
pub fn parse_mass(field: MassField, raw: &str) -> Result<f64, InputError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(0.0);
    }
    let value: f64 = text.parse().map_err(|_| InputError::NotANumber {
        field,
        raw: raw.to_string(),
    })?;
    check_mass(field, value).map_err(|e| match e {
        InputError::NotFinite { field, .. } => InputError::NotFinite {
            field,
            raw: raw.to_string(),
        },
        other => other,
    })
}

fn check_mass(field: MassField, value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite {
            field,
            raw: value.to_string(),
        });
    }
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    // Normalise -0.0 so snapshots hash identically.
    Ok(if value == 0.0 { 0.0 } else { value })
}

/// Current loading inputs.
///
/// Masses are private so they can only change through `set_mass` and
/// friends. Deserialization goes through the same checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLoadConfiguration")]
pub struct LoadConfiguration {
    pub second_pilot: bool,
    pub seats: [SeatType; PASSENGER_STATIONS],
    forward_baggage: f64,
    aft_baggage: f64,
    deicing_fluid: f64,
    ramp_fuel: f64,
    /// Not checked against `ramp_fuel`; landing fuel may go negative.
    planned_burn: f64,
}

/// Wire form of `LoadConfiguration`, unchecked.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLoadConfiguration {
    second_pilot: bool,
    seats: [SeatType; PASSENGER_STATIONS],
    forward_baggage: f64,
    aft_baggage: f64,
    deicing_fluid: f64,
    ramp_fuel: f64,
    planned_burn: f64,
}

impl TryFrom<RawLoadConfiguration> for LoadConfiguration {
    type Error = InputError;

    fn try_from(raw: RawLoadConfiguration) -> Result<Self, Self::Error> {
        let mut config = Self {
            second_pilot: raw.second_pilot,
            seats: raw.seats,
            ..Self::default()
        };
        for (field, value) in [
            (MassField::ForwardBaggage, raw.forward_baggage),
            (MassField::AftBaggage, raw.aft_baggage),
            (MassField::DeicingFluid, raw.deicing_fluid),
            (MassField::RampFuel, raw.ramp_fuel),
            (MassField::PlannedBurn, raw.planned_burn),
        ] {
            config.set_mass(field, value)?;
        }
        Ok(config)
    }
}

impl LoadConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mass(&self, field: MassField) -> f64 {
        match field {
            MassField::ForwardBaggage => self.forward_baggage,
            MassField::AftBaggage => self.aft_baggage,
            MassField::DeicingFluid => self.deicing_fluid,
            MassField::RampFuel => self.ramp_fuel,
            MassField::PlannedBurn => self.planned_burn,
        }
    }

    fn mass_mut(&mut self, field: MassField) -> &mut f64 {
        match field {
            MassField::ForwardBaggage => &mut self.forward_baggage,
            MassField::AftBaggage => &mut self.aft_baggage,
            MassField::DeicingFluid => &mut self.deicing_fluid,
            MassField::RampFuel => &mut self.ramp_fuel,
            MassField::PlannedBurn => &mut self.planned_burn,
        }
    }

    /// Store a numeric mass.
    pub fn set_mass(&mut self, field: MassField, value: f64) -> Result<(), InputError> {
        let value = check_mass(field, value)?;
        *self.mass_mut(field) = value;
        Ok(())
    }

    /// Store a mass typed as text.
    pub fn set_mass_text(&mut self, field: MassField, raw: &str) -> Result<(), InputError> {
        let value = parse_mass(field, raw)?;
        *self.mass_mut(field) = value;
        Ok(())
    }

    pub fn seat(&self, station: usize) -> Option<SeatType> {
        self.seats.get(station).copied()
    }

    pub fn set_seat(&mut self, station: usize, seat: SeatType) -> Result<(), InputError> {
        let slot = self
            .seats
            .get_mut(station)
            .ok_or(InputError::StationOutOfRange { station })?;
        *slot = seat;
        Ok(())
    }

    pub fn set_second_pilot(&mut self, present: bool) {
        self.second_pilot = present;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of occupied passenger seats.
    pub fn occupied_seats(&self) -> usize {
        self.seats.iter().filter(|s| **s != SeatType::Empty).count()
    }

    /// Apply one edit. On error nothing changes.
    pub fn apply(&mut self, edit: &LoadEdit) -> Result<(), InputError> {
        let outcome = match edit {
            LoadEdit::SecondPilot { present } => {
                self.set_second_pilot(*present);
                Ok(())
            }
            LoadEdit::Seat { station, seat } => self.set_seat(*station, *seat),
            LoadEdit::Mass { field, raw } => self.set_mass_text(*field, raw),
            LoadEdit::Reset => {
                self.reset();
                Ok(())
            }
        };
        if let Err(e) = &outcome {
            warn!(edit = edit.kind(), error = %e, "input rejected, previous value kept");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_zero() {
        let mut cfg = LoadConfiguration::new();
        cfg.set_mass(MassField::ForwardBaggage, 40.0).unwrap();
        cfg.set_mass_text(MassField::ForwardBaggage, "  ").unwrap();
        assert_eq!(cfg.mass(MassField::ForwardBaggage), 0.0);
    }

    #[test]
    fn invalid_text_keeps_previous_value() {
        let mut cfg = LoadConfiguration::new();
        cfg.set_mass_text(MassField::RampFuel, "540").unwrap();

        let err = cfg.set_mass_text(MassField::RampFuel, "54o").unwrap_err();
        assert!(matches!(err, InputError::NotANumber { .. }));
        assert_eq!(cfg.mass(MassField::RampFuel), 540.0);

        let err = cfg.set_mass_text(MassField::RampFuel, "-3").unwrap_err();
        assert!(matches!(err, InputError::Negative { .. }));
        assert_eq!(cfg.mass(MassField::RampFuel), 540.0);

        let err = cfg.set_mass_text(MassField::RampFuel, "NaN").unwrap_err();
        assert!(matches!(err, InputError::NotFinite { .. }));
        let err = cfg.set_mass_text(MassField::RampFuel, "inf").unwrap_err();
        assert!(matches!(err, InputError::NotFinite { .. }));
        assert_eq!(cfg.mass(MassField::RampFuel), 540.0);
    }

    #[test]
    fn negative_zero_is_normalised() {
        let mut cfg = LoadConfiguration::new();
        cfg.set_mass_text(MassField::AftBaggage, "-0").unwrap();
        assert!(cfg.mass(MassField::AftBaggage).is_sign_positive());
    }

    #[test]
    fn seat_out_of_range_rejected() {
        let mut cfg = LoadConfiguration::new();
        let err = cfg.set_seat(9, SeatType::Male).unwrap_err();
        assert_eq!(err, InputError::StationOutOfRange { station: 9 });
        assert_eq!(cfg.occupied_seats(), 0);
    }

    #[test]
    fn apply_edits_and_reset() {
        let mut cfg = LoadConfiguration::new();
        cfg.apply(&LoadEdit::SecondPilot { present: true }).unwrap();
        cfg.apply(&LoadEdit::Seat {
            station: 8,
            seat: SeatType::Child,
        })
        .unwrap();
        cfg.apply(&LoadEdit::mass(MassField::DeicingFluid, "60"))
            .unwrap();
        assert!(cfg.second_pilot);
        assert_eq!(cfg.seat(8), Some(SeatType::Child));
        assert_eq!(cfg.mass(MassField::DeicingFluid), 60.0);

        cfg.apply(&LoadEdit::Reset).unwrap();
        assert_eq!(cfg, LoadConfiguration::default());
    }

    #[test]
    fn burn_may_exceed_fuel() {
        let mut cfg = LoadConfiguration::new();
        cfg.set_mass(MassField::RampFuel, 100.0).unwrap();
        cfg.set_mass(MassField::PlannedBurn, 150.0).unwrap();
        assert_eq!(cfg.mass(MassField::PlannedBurn), 150.0);
    }

    #[test]
    fn deserialize_accepts_valid_masses() {
        let mut cfg = LoadConfiguration::new();
        cfg.set_mass(MassField::RampFuel, 540.0).unwrap();
        cfg.set_seat(3, SeatType::Female).unwrap();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: LoadConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn deserialize_rejects_negative_mass() {
        let mut value = serde_json::to_value(LoadConfiguration::new()).unwrap();
        value["forward_baggage"] = serde_json::json!(-500.0);
        let err = serde_json::from_value::<LoadConfiguration>(value).unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn deserialize_rejects_unknown_field() {
        let mut value = serde_json::to_value(LoadConfiguration::new()).unwrap();
        value["ballast"] = serde_json::json!(10.0);
        assert!(serde_json::from_value::<LoadConfiguration>(value).is_err());
    }
}
