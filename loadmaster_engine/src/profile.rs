//! Loadmaster Engine: Aircraft Profile
//!
//! Certified data for G-CMCY, a Tecnam P2012 Traveller. These values come
//! from the aircraft's weight & balance documentation and are compiled in.
//! A profile is checked by `invariants::validate_profile` before any
//! engine will use it.

use serde::{Deserialize, Serialize};

use crate::domain::{Station, PASSENGER_ROWS, PASSENGER_STATIONS};

/// A vertex of the certified envelope in (%MAC, kg) space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvelopePoint {
    pub mac_percent: f64,
    pub mass: f64,
}

impl EnvelopePoint {
    pub const fn new(mac_percent: f64, mass: f64) -> Self {
        Self { mac_percent, mass }
    }
}

/// Absolute structural mass limits (kg).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MassLimits {
    /// MZFM
    pub zero_fuel: f64,
    /// MTOM
    pub takeoff: f64,
    /// MLND
    pub landing: f64,
}

/// Station arms, metres from the datum. Negative is forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StationArms {
    pub second_pilot: f64,
    pub passenger_rows: [f64; PASSENGER_ROWS],
    pub forward_baggage: f64,
    pub aft_baggage: f64,
    pub deicing_fluid: f64,
    pub fuel: f64,
}

impl StationArms {
    /// Every station with its arm, passenger rows in order.
    pub fn all(&self) -> Vec<(Station, f64)> {
        let mut out = vec![(Station::SecondPilot, self.second_pilot)];
        out.extend(
            self.passenger_rows
                .iter()
                .enumerate()
                .map(|(row, arm)| (Station::PassengerRow(row), *arm)),
        );
        out.extend([
            (Station::ForwardBaggage, self.forward_baggage),
            (Station::AftBaggage, self.aft_baggage),
            (Station::DeicingFluid, self.deicing_fluid),
            (Station::Fuel, self.fuel),
        ]);
        out
    }
}

/// Registration and document identity printed on the load sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AircraftIdentity {
    pub registration: String,
    pub aircraft_type: String,
    pub sheet_version: String,
}

/// All certified constants for one airframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AircraftProfile {
    pub identity: AircraftIdentity,
    pub basic_mass: f64,
    pub basic_arm: f64,
    pub mac_length: f64,
    /// Implicitly closed: the last vertex connects back to the first.
    pub envelope: Vec<EnvelopePoint>,
    pub mass_limits: MassLimits,
    pub station_arms: StationArms,
    pub second_pilot_mass: f64,
    pub passenger_labels: [String; PASSENGER_STATIONS],
}

impl AircraftProfile {
    /// G-CMCY reference data.
    pub fn g_cmcy() -> Self {
        Self {
            identity: AircraftIdentity {
                registration: "G-CMCY".to_string(),
                aircraft_type: "P2012 Traveller".to_string(),
                sheet_version: "V1".to_string(),
            },
            basic_mass: 2563.7,
            basic_arm: 0.389,
            mac_length: 1.839,
            envelope: vec![
                EnvelopePoint::new(18.0, 2400.0),
                EnvelopePoint::new(18.0, 3000.0),
                EnvelopePoint::new(22.5, 3680.0),
                EnvelopePoint::new(31.0, 3680.0),
                EnvelopePoint::new(31.0, 2400.0),
            ],
            mass_limits: MassLimits {
                zero_fuel: 3560.0,
                takeoff: 3680.0,
                landing: 3630.0,
            },
            station_arms: StationArms {
                second_pilot: -1.739,
                passenger_rows: [-0.707, 0.106, 0.919, 1.732, 2.545],
                forward_baggage: -3.345,
                aft_baggage: 3.539,
                deicing_fluid: 1.495,
                fuel: 0.787,
            },
            second_pilot_mass: 85.0,
            passenger_labels: [
                "R1 L", "R1 R", "R2 L", "R2 R", "R3 L", "R3 R", "R4 L", "R4 R", "R5 R",
            ]
            .map(String::from),
        }
    }

    /// Moment of the aircraft at basic mass.
    pub fn basic_moment(&self) -> f64 {
        crate::arithmetic::moment(self.basic_mass, self.basic_arm)
    }

    /// Label of a passenger station, e.g. `"R3 L"`.
    pub fn passenger_label(&self, station: usize) -> Option<&str> {
        self.passenger_labels.get(station).map(String::as_str)
    }
}
