//! Replay orchestrator: rebuild a result from an edit journal.
//!
//! Starts from an empty configuration and delegates every edit to the
//! engine's validation boundary. No cached figures are trusted.

use loadmaster_engine::domain::FlightPreparation;
use loadmaster_engine::engine::WeightBalanceEngine;
use loadmaster_engine::events::LoadEdit;
use loadmaster_engine::hashing::canonical_hash;
use loadmaster_engine::loading::LoadConfiguration;
use loadmaster_engine::result::LoadResult;
use tracing::debug;

/// Replay `edits` in order on a fresh configuration.
///
/// Edits the configuration rejects are skipped, exactly as a live
/// session would have refused them. Returns (result, canonical_hash).
pub fn rebuild_result(
    engine: &WeightBalanceEngine,
    edits: &[LoadEdit],
    preparation: &FlightPreparation,
) -> (LoadResult, String) {
    let config = rebuild_config(edits);
    let result = engine.recompute(&config, preparation);
    let hash = canonical_hash(&result);
    (result, hash)
}

/// Replay and return only the canonical hash.
pub fn rebuild_hash(
    engine: &WeightBalanceEngine,
    edits: &[LoadEdit],
    preparation: &FlightPreparation,
) -> String {
    let (_, hash) = rebuild_result(engine, edits, preparation);
    hash
}

/// The configuration an edit list produces.
pub fn rebuild_config(edits: &[LoadEdit]) -> LoadConfiguration {
    let mut config = LoadConfiguration::new();
    for (seq, edit) in edits.iter().enumerate() {
        if config.apply(edit).is_err() {
            debug!(seq, edit = edit.kind(), "replay skipped rejected edit");
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadmaster_engine::domain::{MassField, SeatType};

    #[test]
    fn empty_journal_is_empty_aircraft() {
        let engine = WeightBalanceEngine::reference().unwrap();
        let prep = FlightPreparation::default();
        let (result, hash) = rebuild_result(&engine, &[], &prep);
        assert_eq!(result, engine.recompute(&LoadConfiguration::new(), &prep));
        assert_eq!(hash, canonical_hash(&result));
    }

    #[test]
    fn rejected_edits_are_skipped() {
        let edits = vec![
            LoadEdit::mass(MassField::ForwardBaggage, "20"),
            LoadEdit::mass(MassField::ForwardBaggage, "abc"),
            LoadEdit::Seat {
                station: 12,
                seat: SeatType::Male,
            },
            LoadEdit::Seat {
                station: 8,
                seat: SeatType::Child,
            },
        ];
        let config = rebuild_config(&edits);
        assert_eq!(config.mass(MassField::ForwardBaggage), 20.0);
        assert_eq!(config.seat(8), Some(SeatType::Child));
        assert_eq!(config.occupied_seats(), 1);
    }

    #[test]
    fn reset_in_journal_starts_over() {
        let edits = vec![
            LoadEdit::SecondPilot { present: true },
            LoadEdit::Reset,
            LoadEdit::mass(MassField::RampFuel, "100"),
        ];
        let config = rebuild_config(&edits);
        assert!(!config.second_pilot);
        assert_eq!(config.mass(MassField::RampFuel), 100.0);
    }
}
