//! Loadmaster Engine: Core Domain Types
//!
//! Pure data. No accumulation or validation logic lives here.
//! Masses in kg, arms in metres from the datum, CG in %MAC.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Number of passenger seat stations in the cabin.
pub const PASSENGER_STATIONS: usize = 9;

/// Number of passenger row arms. Stations pair up onto a row arm; the
/// last station sits alone on the last row.
pub const PASSENGER_ROWS: usize = PASSENGER_STATIONS.div_ceil(2);

/// Row arm index used by a passenger station.
pub const fn row_of_station(station: usize) -> usize {
    station / 2
}

// ── Seats ──────────────────────────────────────────────────────────

/// Occupant of a passenger seat, each with a standard mass.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum SeatType {
    #[default]
    #[strum(to_string = "EMPTY", serialize = "E")]
    Empty,
    #[strum(to_string = "MALE", serialize = "M")]
    Male,
    #[strum(to_string = "FEMALE", serialize = "F")]
    Female,
    #[strum(to_string = "CHILD", serialize = "C")]
    Child,
}

impl SeatType {
    /// Standard occupant mass in kg.
    pub const fn mass(self) -> u32 {
        match self {
            SeatType::Empty => 0,
            SeatType::Male => 90,
            SeatType::Female => 72,
            SeatType::Child => 35,
        }
    }

    pub fn mass_kg(self) -> f64 {
        f64::from(self.mass())
    }
}

// ── Stations ───────────────────────────────────────────────────────

/// A load station with a certified arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Station {
    SecondPilot,
    /// Passenger row arm, `0..PASSENGER_ROWS`.
    PassengerRow(usize),
    ForwardBaggage,
    AftBaggage,
    DeicingFluid,
    Fuel,
}

/// A numeric entry field of the load configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MassField {
    ForwardBaggage,
    AftBaggage,
    DeicingFluid,
    RampFuel,
    PlannedBurn,
}

// ── Phases ─────────────────────────────────────────────────────────

/// The three flight phases checked against the limits.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
pub enum FlightPhase {
    #[strum(to_string = "ZFM")]
    ZeroFuel,
    #[strum(to_string = "TOW")]
    Takeoff,
    #[strum(to_string = "LND")]
    Landing,
}

/// Mass and moment totals for one phase, before CG resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MassMoment {
    pub mass: f64,
    pub moment: f64,
}

impl MassMoment {
    pub const ZERO: MassMoment = MassMoment {
        mass: 0.0,
        moment: 0.0,
    };

    /// Add `mass` placed at `arm`.
    pub fn add(self, mass: f64, arm: f64) -> MassMoment {
        MassMoment {
            mass: self.mass + mass,
            moment: self.moment + crate::arithmetic::moment(mass, arm),
        }
    }

    /// Remove `mass` taken from `arm`.
    pub fn remove(self, mass: f64, arm: f64) -> MassMoment {
        MassMoment {
            mass: self.mass - mass,
            moment: self.moment - crate::arithmetic::moment(mass, arm),
        }
    }
}

/// Mass, moment and CG for one flight phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseResult {
    pub mass: f64,
    pub moment: f64,
    pub cg_percent_mac: f64,
}

// ── Verdict ────────────────────────────────────────────────────────

/// Why a load is unsafe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    #[strum(to_string = "zero-fuel CG outside envelope")]
    EnvelopeExcursion,
    #[strum(to_string = "zero-fuel mass above MZFM")]
    ZeroFuelOverweight,
    #[strum(to_string = "take-off mass above MTOM")]
    TakeoffOverweight,
    #[strum(to_string = "landing mass above MLND")]
    LandingOverweight,
}

/// Outcome of the envelope and mass-limit checks, one flag per reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvelopeVerdict {
    pub polygon_ok: bool,
    pub zero_fuel_ok: bool,
    pub takeoff_ok: bool,
    pub landing_ok: bool,
}

impl EnvelopeVerdict {
    pub fn is_safe(&self) -> bool {
        self.polygon_ok && self.zero_fuel_ok && self.takeoff_ok && self.landing_ok
    }

    /// Failed checks, in evaluation order.
    pub fn violations(&self) -> Vec<Violation> {
        [
            (self.polygon_ok, Violation::EnvelopeExcursion),
            (self.zero_fuel_ok, Violation::ZeroFuelOverweight),
            (self.takeoff_ok, Violation::TakeoffOverweight),
            (self.landing_ok, Violation::LandingOverweight),
        ]
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, v)| v)
        .collect()
    }
}

// ── Caller-owned fields ────────────────────────────────────────────

/// Crew and time fields owned by the presentation layer and passed
/// through to the result untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlightPreparation {
    pub timestamp: String,
    pub captain: String,
    pub prepared_by: String,
}
