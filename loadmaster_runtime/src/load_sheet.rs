//! Load Sheet: the printable weight & balance report for one flight.
//!
//! - `LoadSheet::build`:   result + profile → report content
//! - `encode` / `decode`:  JSON (strict, unknown fields denied)
//! - `export_to_dir` / `import_from_file`: file I/O
//! - `hash`:               SHA-256 of the encoded JSON (lowercase hex)
//! - `Display`:            fixed plain-text layout
//!
//! Masses and %MAC are rounded to one decimal here and nowhere else.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use loadmaster_engine::arithmetic::round_to_tenth;
use loadmaster_engine::domain::{FlightPhase, MassField, SeatType, Violation, PASSENGER_STATIONS};
use loadmaster_engine::hashing::hex_digest;
use loadmaster_engine::profile::AircraftProfile;
use loadmaster_engine::result::LoadResult;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::info;

/// File-name timestamp layout.
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M";

#[derive(Debug, Error)]
pub enum LoadSheetError {
    #[error("load sheet serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error("load sheet deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),
    #[error("malformed load sheet: {0}")]
    Malformed(String),
    #[error("load sheet I/O failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeatLine {
    pub label: String,
    pub occupant: SeatType,
}

impl fmt::Display for SeatLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.occupant)
    }
}

/// One line of the final weight & balance summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryRow {
    pub phase: FlightPhase,
    /// e.g. "Zero Fuel Mass (MAX 3560)".
    pub station: String,
    pub mass: f64,
    pub limit: f64,
    pub cg_percent_mac: f64,
}

fn phase_title(phase: FlightPhase) -> &'static str {
    match phase {
        FlightPhase::ZeroFuel => "Zero Fuel Mass",
        FlightPhase::Takeoff => "Take-off Mass",
        FlightPhase::Landing => "Landing Mass",
    }
}

fn phase_limit(profile: &AircraftProfile, phase: FlightPhase) -> f64 {
    let limits = &profile.mass_limits;
    match phase {
        FlightPhase::ZeroFuel => limits.zero_fuel,
        FlightPhase::Takeoff => limits.takeoff,
        FlightPhase::Landing => limits.landing,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadSheet {
    pub registration: String,
    pub title: String,
    pub aircraft: String,
    pub date_time: String,
    pub commander: String,
    pub prepared_by: String,
    pub second_pilot: bool,
    pub seats: Vec<SeatLine>,
    pub forward_baggage: f64,
    pub aft_baggage: f64,
    pub deicing_fluid: f64,
    pub takeoff_fuel: f64,
    pub trip_fuel: f64,
    pub landing_fuel: f64,
    pub summary: Vec<SummaryRow>,
    pub is_safe: bool,
    pub status: String,
    pub violations: Vec<Violation>,
}

impl LoadSheet {
    pub fn build(profile: &AircraftProfile, result: &LoadResult) -> Self {
        let identity = &profile.identity;
        let inputs = &result.inputs;
        let prep = &result.preparation;

        let seats = inputs
            .seats
            .iter()
            .enumerate()
            .map(|(station, &occupant)| SeatLine {
                label: profile
                    .passenger_label(station)
                    .unwrap_or_default()
                    .to_string(),
                occupant,
            })
            .collect();

        let summary = FlightPhase::iter()
            .map(|phase| {
                let p = result.phase(phase);
                let limit = phase_limit(profile, phase);
                SummaryRow {
                    phase,
                    station: format!("{} (MAX {})", phase_title(phase), limit),
                    mass: round_to_tenth(p.mass),
                    limit,
                    cg_percent_mac: round_to_tenth(p.cg_percent_mac),
                }
            })
            .collect();

        let status = if result.is_safe {
            format!("LOAD SAFE: {:.1}% MAC", result.zero_fuel.cg_percent_mac)
        } else {
            "LOAD UNSAFE / OVERWEIGHT".to_string()
        };

        Self {
            registration: identity.registration.clone(),
            title: format!("{} - ELECTRONIC LOAD SHEET", identity.registration),
            aircraft: format!(
                "Aircraft: {} | Version: {}",
                identity.aircraft_type, identity.sheet_version
            ),
            date_time: prep.timestamp.clone(),
            commander: prep.captain.to_uppercase(),
            prepared_by: prep.prepared_by.to_uppercase(),
            second_pilot: inputs.second_pilot,
            seats,
            forward_baggage: round_to_tenth(inputs.mass(MassField::ForwardBaggage)),
            aft_baggage: round_to_tenth(inputs.mass(MassField::AftBaggage)),
            deicing_fluid: round_to_tenth(inputs.mass(MassField::DeicingFluid)),
            takeoff_fuel: round_to_tenth(inputs.mass(MassField::RampFuel)),
            trip_fuel: round_to_tenth(inputs.mass(MassField::PlannedBurn)),
            landing_fuel: round_to_tenth(result.landing_fuel_mass),
            summary,
            is_safe: result.is_safe,
            status,
            violations: result.violations(),
        }
    }

    /// `GCMCY_LoadSheet_20261016_0745.json` for G-CMCY at that minute.
    pub fn file_name(&self, at: NaiveDateTime) -> String {
        format!(
            "{}_LoadSheet_{}.json",
            self.registration.replace('-', ""),
            at.format(FILE_STAMP_FORMAT)
        )
    }

    pub fn summary_row(&self, phase: FlightPhase) -> Option<&SummaryRow> {
        self.summary.iter().find(|r| r.phase == phase)
    }

    // -----------------------------------------------------------------------
    // Codec
    // -----------------------------------------------------------------------

    pub fn encode(&self) -> Result<String, LoadSheetError> {
        serde_json::to_string(self).map_err(LoadSheetError::Serialization)
    }

    /// Strict decode. Also checks the seat and summary tables are whole.
    pub fn decode(json: &str) -> Result<Self, LoadSheetError> {
        let sheet: Self = serde_json::from_str(json).map_err(LoadSheetError::Deserialization)?;
        if sheet.seats.len() != PASSENGER_STATIONS {
            return Err(LoadSheetError::Malformed(format!(
                "expected {} seat lines, got {}",
                PASSENGER_STATIONS,
                sheet.seats.len()
            )));
        }
        if let Some(phase) = FlightPhase::iter().find(|p| sheet.summary_row(*p).is_none()) {
            return Err(LoadSheetError::Malformed(format!(
                "summary row {phase} missing"
            )));
        }
        Ok(sheet)
    }

    /// SHA-256 of the encoded JSON, lowercase hex.
    pub fn hash(&self) -> Result<String, LoadSheetError> {
        Ok(hex_digest(self.encode()?.as_bytes()))
    }

    // -----------------------------------------------------------------------
    // File I/O
    // -----------------------------------------------------------------------

    /// Write the sheet to `path`, creating parent directories.
    pub fn export_to_file(&self, path: &Path) -> Result<(), LoadSheetError> {
        let json = self.encode()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json.as_bytes())?;
        Ok(())
    }

    /// Write the sheet into `dir` under its standard file name.
    pub fn export_to_dir(&self, dir: &Path, at: NaiveDateTime) -> Result<PathBuf, LoadSheetError> {
        let path = dir.join(self.file_name(at));
        self.export_to_file(&path)?;
        info!(path = %path.display(), "load sheet exported");
        Ok(path)
    }

    pub fn import_from_file(path: &Path) -> Result<Self, LoadSheetError> {
        let content = fs::read_to_string(path)?;
        Self::decode(&content)
    }
}

impl fmt::Display for LoadSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.aircraft)?;
        writeln!(f)?;

        writeln!(f, " FLIGHT PREPARATION")?;
        writeln!(
            f,
            "{:<40}Commander: {}",
            format!("Date/Time: {}", self.date_time),
            self.commander
        )?;
        writeln!(f, "Prepared By: {}", self.prepared_by)?;
        writeln!(f)?;

        writeln!(f, " CABIN & CARGO DISTRIBUTION")?;
        // Two seats per row, the odd one out on its own line.
        for pair in self.seats.chunks(2) {
            match pair {
                [left, right] => writeln!(f, "{:<20}{}", left.to_string(), right)?,
                [single] => writeln!(f, "{single}")?,
                _ => {}
            }
        }
        writeln!(
            f,
            "SECOND PILOT: {}",
            if self.second_pilot { "YES" } else { "NO" }
        )?;
        writeln!(
            f,
            "FWD BAGGAGE: {:.1} kg | AFT BAGGAGE: {:.1} kg",
            self.forward_baggage, self.aft_baggage
        )?;
        writeln!(f, "TKS FLUID: {:.1} kg", self.deicing_fluid)?;
        writeln!(f)?;

        writeln!(f, " FUEL PLANNING")?;
        writeln!(
            f,
            "TAKEOFF FUEL: {:.1} kg   TRIP FUEL: {:.1} kg   LANDING FUEL: {:.1} kg",
            self.takeoff_fuel, self.trip_fuel, self.landing_fuel
        )?;
        writeln!(f)?;

        writeln!(f, " FINAL WEIGHT & BALANCE SUMMARY")?;
        writeln!(
            f,
            "{:<28}{:>12}{:>12}{:>12}",
            "STATION", "MASS (kg)", "LIMIT (kg)", "CG (% MAC)"
        )?;
        for row in &self.summary {
            writeln!(
                f,
                "{:<28}{:>12}{:>12}{:>12.1}",
                row.station,
                format!("{:.1} kg", row.mass),
                format!("{} kg", row.limit),
                row.cg_percent_mac
            )?;
        }
        writeln!(f)?;

        write!(f, "{}", self.status)?;
        for v in &self.violations {
            write!(f, "\n  - {v}")?;
        }
        Ok(())
    }
}
