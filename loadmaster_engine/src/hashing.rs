//! Loadmaster Engine: Canonical Hashing
//!
//! Deterministic canonical serialization + SHA-256 of a load result.
//! Two results hash equal iff every figure is bit-identical.
//!
//! Rules:
//!   - engine_version first, then phases in flight order
//!   - floats in shortest round-trip form (so -0.0 and 0.0 differ)
//!   - seats as labels, in station order
//!   - UTF-8 JSON, no whitespace

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use strum::IntoEnumIterator;

use crate::domain::{FlightPhase, MassField, PhaseResult};
use crate::result::LoadResult;
use crate::ENGINE_VERSION;

/// Canonical serialization of a result to UTF-8 JSON bytes.
pub fn canonical_serialize(result: &LoadResult) -> Vec<u8> {
    // A Value tree always serializes; non-finite floats were mapped to null.
    serde_json::to_vec(&build_canonical_value(result)).unwrap_or_default()
}

/// SHA-256 of the canonical serialization, lowercase hex.
pub fn canonical_hash(result: &LoadResult) -> String {
    hex_digest(&canonical_serialize(result))
}

/// Lowercase hex SHA-256 of arbitrary bytes.
pub fn hex_digest(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

fn number(value: f64) -> Value {
    Value::from(value)
}

fn phase_value(phase: &PhaseResult) -> Value {
    let mut map = Map::new();
    map.insert("mass".to_string(), number(phase.mass));
    map.insert("moment".to_string(), number(phase.moment));
    map.insert("cg_percent_mac".to_string(), number(phase.cg_percent_mac));
    Value::Object(map)
}

/// Field order: engine_version, phases, landing_fuel_mass, is_safe,
/// verdict, inputs, preparation.
fn build_canonical_value(result: &LoadResult) -> Value {
    // -- phases (flight order) ---
    let mut phases = Map::new();
    for phase in FlightPhase::iter() {
        let key: &'static str = phase.into();
        phases.insert(key.to_string(), phase_value(result.phase(phase)));
    }

    // -- verdict ---
    let v = &result.verdict;
    let mut verdict = Map::new();
    verdict.insert("polygon_ok".to_string(), Value::Bool(v.polygon_ok));
    verdict.insert("zero_fuel_ok".to_string(), Value::Bool(v.zero_fuel_ok));
    verdict.insert("takeoff_ok".to_string(), Value::Bool(v.takeoff_ok));
    verdict.insert("landing_ok".to_string(), Value::Bool(v.landing_ok));

    // -- inputs ---
    let cfg = &result.inputs;
    let mut inputs = Map::new();
    inputs.insert("second_pilot".to_string(), Value::Bool(cfg.second_pilot));
    inputs.insert(
        "seats".to_string(),
        Value::Array(
            cfg.seats
                .iter()
                .map(|s| Value::String(s.to_string()))
                .collect(),
        ),
    );
    for field in MassField::iter() {
        inputs.insert(field.to_string(), number(cfg.mass(field)));
    }

    // -- preparation ---
    let prep = &result.preparation;
    let mut preparation = Map::new();
    preparation.insert("timestamp".to_string(), Value::String(prep.timestamp.clone()));
    preparation.insert("captain".to_string(), Value::String(prep.captain.clone()));
    preparation.insert(
        "prepared_by".to_string(),
        Value::String(prep.prepared_by.clone()),
    );

    // -- top-level (strict field order) ---
    let mut root = Map::new();
    root.insert(
        "engine_version".to_string(),
        Value::Number(ENGINE_VERSION.into()),
    );
    root.insert("phases".to_string(), Value::Object(phases));
    root.insert(
        "landing_fuel_mass".to_string(),
        number(result.landing_fuel_mass),
    );
    root.insert("is_safe".to_string(), Value::Bool(result.is_safe));
    root.insert("verdict".to_string(), Value::Object(verdict));
    root.insert("inputs".to_string(), Value::Object(inputs));
    root.insert("preparation".to_string(), Value::Object(preparation));

    Value::Object(root)
}
