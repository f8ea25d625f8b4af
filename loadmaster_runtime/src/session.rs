//! Session manager: one live load configuration with explicit recompute.
//!
//! Each session owns its engine handle, configuration, crew fields, an
//! in-memory journal of accepted edits and the latest result.
//! Concurrency: Mutex for write serialization, no global mutable state.
//!
//! Apply-before-journal order:
//!   1. config.apply(edit)  (may reject; nothing changes then)
//!   2. journal.push(edit)  (only if step 1 succeeded)
//!   3. engine.recompute()

use std::sync::{Mutex, PoisonError};

use loadmaster_engine::domain::{FlightPreparation, SeatType};
use loadmaster_engine::engine::WeightBalanceEngine;
use loadmaster_engine::events::LoadEdit;
use loadmaster_engine::hashing::canonical_hash;
use loadmaster_engine::invariants::ProfileError;
use loadmaster_engine::loading::{InputError, LoadConfiguration};
use loadmaster_engine::result::LoadResult;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::replay;

/// Seat type after `seat` in the cycle Empty, Male, Female, Child.
pub fn next_seat(seat: SeatType) -> SeatType {
    SeatType::iter()
        .cycle()
        .skip_while(|s| *s != seat)
        .nth(1)
        .unwrap_or_default()
}

/// A live loading session for one flight.
pub struct LoadSession {
    engine: WeightBalanceEngine,
    config: LoadConfiguration,
    preparation: FlightPreparation,
    journal: Vec<LoadEdit>,
    result: LoadResult,
}

impl LoadSession {
    /// Start from an empty aircraft.
    pub fn new(engine: WeightBalanceEngine) -> Self {
        let config = LoadConfiguration::new();
        let preparation = FlightPreparation::default();
        let result = engine.recompute(&config, &preparation);
        Self {
            engine,
            config,
            preparation,
            journal: Vec::new(),
            result,
        }
    }

    /// Session on the compiled-in G-CMCY profile.
    pub fn reference() -> Result<Self, ProfileError> {
        Ok(Self::new(WeightBalanceEngine::reference()?))
    }

    /// Apply one edit, journal it and recompute.
    ///
    /// A rejected edit is neither journaled nor recomputed; the previous
    /// result stays current.
    pub fn apply_edit(&mut self, edit: LoadEdit) -> Result<&LoadResult, InputError> {
        self.config.apply(&edit)?;
        debug!(edit = edit.kind(), seq = self.journal.len() + 1, "edit accepted");
        self.journal.push(edit);
        self.recompute();
        Ok(&self.result)
    }

    /// Advance one passenger seat to the next occupant type.
    pub fn cycle_seat(&mut self, station: usize) -> Result<SeatType, InputError> {
        let current = self
            .config
            .seat(station)
            .ok_or(InputError::StationOutOfRange { station })?;
        let seat = next_seat(current);
        self.apply_edit(LoadEdit::Seat { station, seat })?;
        Ok(seat)
    }

    pub fn set_timestamp(&mut self, timestamp: impl Into<String>) {
        self.preparation.timestamp = timestamp.into();
        self.recompute();
    }

    pub fn set_captain(&mut self, captain: impl Into<String>) {
        self.preparation.captain = captain.into();
        self.recompute();
    }

    pub fn set_prepared_by(&mut self, prepared_by: impl Into<String>) {
        self.preparation.prepared_by = prepared_by.into();
        self.recompute();
    }

    /// Back to an empty aircraft with blank crew fields.
    pub fn reset(&mut self) -> &LoadResult {
        self.config.reset();
        self.preparation = FlightPreparation::default();
        self.journal.push(LoadEdit::Reset);
        info!("session reset");
        self.recompute();
        &self.result
    }

    /// Rebuild the result from the journal alone and return its hash.
    pub fn replay_journal(&self) -> (LoadResult, String) {
        replay::rebuild_result(&self.engine, &self.journal, &self.preparation)
    }

    fn recompute(&mut self) {
        self.result = self.engine.recompute(&self.config, &self.preparation);
    }

    pub fn result(&self) -> &LoadResult {
        &self.result
    }

    pub fn config(&self) -> &LoadConfiguration {
        &self.config
    }

    pub fn preparation(&self) -> &FlightPreparation {
        &self.preparation
    }

    pub fn engine(&self) -> &WeightBalanceEngine {
        &self.engine
    }

    /// Accepted edits, oldest first.
    pub fn journal(&self) -> &[LoadEdit] {
        &self.journal
    }

    pub fn current_hash(&self) -> String {
        canonical_hash(&self.result)
    }
}

/// Thread-safe session handle using Mutex.
pub struct SharedSession {
    inner: Mutex<LoadSession>,
}

impl SharedSession {
    pub fn new(session: LoadSession) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    fn with<T>(&self, f: impl FnOnce(&mut LoadSession) -> T) -> T {
        // A panic mid-edit cannot leave the session half-updated: apply
        // either fully succeeds or changes nothing.
        let mut session = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }

    /// Apply edit under lock.
    pub fn apply_edit(&self, edit: LoadEdit) -> Result<LoadResult, InputError> {
        self.with(|s| s.apply_edit(edit).cloned())
    }

    pub fn cycle_seat(&self, station: usize) -> Result<SeatType, InputError> {
        self.with(|s| s.cycle_seat(station))
    }

    pub fn reset(&self) -> LoadResult {
        self.with(|s| s.reset().clone())
    }

    pub fn result(&self) -> LoadResult {
        self.with(|s| s.result().clone())
    }

    /// Get current hash under lock.
    pub fn current_hash(&self) -> String {
        self.with(|s| s.current_hash())
    }

    pub fn journal_len(&self) -> usize {
        self.with(|s| s.journal().len())
    }
}
