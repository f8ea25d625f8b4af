//! Envelope plot model: everything a chart needs, no drawing.
//!
//! The outline is closed explicitly (first vertex repeated) because
//! plotting front-ends draw open polylines.

use loadmaster_engine::domain::FlightPhase;
use loadmaster_engine::envelope;
use loadmaster_engine::profile::{AircraftProfile, EnvelopePoint};
use loadmaster_engine::result::LoadResult;
use serde::Serialize;
use strum::IntoEnumIterator;

pub const X_AXIS_TITLE: &str = "Center of Gravity (% MAC)";
pub const Y_AXIS_TITLE: &str = "Weight (kg)";
pub const X_RANGE: AxisRange = AxisRange { min: 15.0, max: 35.0 };
pub const Y_RANGE: AxisRange = AxisRange {
    min: 2300.0,
    max: 3900.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Square,
    Circle,
    Cross,
}

/// One phase plotted at (%MAC, kg).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseMarker {
    pub phase: FlightPhase,
    pub label: String,
    pub shape: MarkerShape,
    pub cg_percent_mac: f64,
    pub mass: f64,
    pub in_envelope: bool,
}

/// Horizontal dashed line at a mass limit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub label: String,
    pub mass: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotModel {
    pub outline: Vec<EnvelopePoint>,
    pub markers: Vec<PhaseMarker>,
    pub reference_lines: Vec<ReferenceLine>,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub x_title: String,
    pub y_title: String,
}

impl PlotModel {
    pub fn build(profile: &AircraftProfile, result: &LoadResult) -> Self {
        let mut outline = profile.envelope.clone();
        if let Some(&first) = outline.first() {
            outline.push(first);
        }

        let markers = FlightPhase::iter()
            .map(|phase| {
                let p = result.phase(phase);
                PhaseMarker {
                    phase,
                    label: phase.to_string(),
                    shape: match phase {
                        FlightPhase::ZeroFuel => MarkerShape::Square,
                        FlightPhase::Takeoff => MarkerShape::Circle,
                        FlightPhase::Landing => MarkerShape::Cross,
                    },
                    cg_percent_mac: p.cg_percent_mac,
                    mass: p.mass,
                    in_envelope: envelope::contains(
                        &profile.envelope,
                        EnvelopePoint::new(p.cg_percent_mac, p.mass),
                    ),
                }
            })
            .collect();

        let limits = &profile.mass_limits;
        let reference_lines = [
            ("MTOM", limits.takeoff),
            ("MLND", limits.landing),
            ("MZFM", limits.zero_fuel),
        ]
        .into_iter()
        .map(|(label, mass)| ReferenceLine {
            label: label.to_string(),
            mass,
        })
        .collect();

        Self {
            outline,
            markers,
            reference_lines,
            x_range: X_RANGE,
            y_range: Y_RANGE,
            x_title: X_AXIS_TITLE.to_string(),
            y_title: Y_AXIS_TITLE.to_string(),
        }
    }

    pub fn marker(&self, phase: FlightPhase) -> Option<&PhaseMarker> {
        self.markers.iter().find(|m| m.phase == phase)
    }

    /// Markers that would fall outside the fixed axes.
    pub fn off_chart(&self) -> Vec<FlightPhase> {
        self.markers
            .iter()
            .filter(|m| !(self.x_range.contains(m.cg_percent_mac) && self.y_range.contains(m.mass)))
            .map(|m| m.phase)
            .collect()
    }
}
