//! Loadmaster Engine: Load Edits
//!
//! Edits are pure data. They carry intent and raw payload only; all
//! validation happens in `LoadConfiguration::apply`.

use serde::{Deserialize, Serialize};

use crate::domain::{MassField, SeatType};

/// A single user edit to the load configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "edit", rename_all = "snake_case")]
pub enum LoadEdit {
    /// Second pilot on board or not.
    SecondPilot { present: bool },
    /// Assign an occupant to passenger station `station`.
    Seat { station: usize, seat: SeatType },
    /// Raw text typed into a mass entry field.
    Mass { field: MassField, raw: String },
    /// Back to an empty aircraft.
    Reset,
}

impl LoadEdit {
    pub fn mass(field: MassField, raw: impl Into<String>) -> Self {
        LoadEdit::Mass {
            field,
            raw: raw.into(),
        }
    }

    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadEdit::SecondPilot { .. } => "second_pilot",
            LoadEdit::Seat { .. } => "seat",
            LoadEdit::Mass { .. } => "mass",
            LoadEdit::Reset => "reset",
        }
    }
}
