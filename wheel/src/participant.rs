//! Participant model: who is on the wheel, the global settings, and the roster.
//!
//! This module defines the data types the rest of the crate computes over
//! (`Participant`, `Settings`), the ordered list that owns all participants
//! (`Roster`), and the identity/color generation used when a participant is
//! created.
//!
//! Data flows into this layer from persistence (JSON deserialization) and from
//! user edits (add, remove, toggles). The layout pipeline reads a `Roster` and
//! `Settings` as immutable inputs and never mutates them.

#[cfg(test)]
#[path = "participant_test.rs"]
mod participant_test;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    BASE_SLOT_COUNT_RANGE, BOOST_MULTIPLIER_RANGE, DEFAULT_BASE_SLOT_COUNT, DEFAULT_BOOST_MULTIPLIER,
    DEFAULT_MIN_FULL_TURNS, DEFAULT_SPIN_DURATION_MS, SPIN_DURATION_MS_RANGE,
};

/// Opaque unique identifier for a participant. Only compared for equality.
///
/// Stored as the raw string so records written by other clients (which use
/// `"<millis>-<base36>"` ids) load unchanged. New ids are v4 UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ParticipantId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for ParticipantId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

/// One entrant on the wheel, as stored and on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier.
    pub id: ParticipantId,
    /// Display name.
    pub name: String,
    /// CSS color used to fill this participant's wedges.
    pub color: String,
    /// Excluded participants have zero weight and never enter the pool.
    #[serde(rename = "isExcluded")]
    pub excluded: bool,
    /// Boosted participants get `boost_multiplier` times the slots, clustered together.
    #[serde(rename = "isSpecial")]
    pub boosted: bool,
}

impl Participant {
    /// Create an eligible, unboosted participant with a fresh id and pastel color.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::with_id(generate_id(), name, generate_pastel_color())
    }

    /// Create an eligible, unboosted participant with explicit identity.
    #[must_use]
    pub fn with_id(id: ParticipantId, name: &str, color: String) -> Self {
        Self { id, name: name.trim().to_owned(), color, excluded: false, boosted: false }
    }
}

/// Generate a fresh participant id.
#[must_use]
pub fn generate_id() -> ParticipantId {
    ParticipantId(Uuid::new_v4().to_string())
}

/// Generate a random pastel CSS color: any hue, 60-80% saturation, 75-85% lightness.
#[must_use]
pub fn generate_pastel_color() -> String {
    let mut rng = rand::rng();
    let hue: u32 = rng.random_range(0..360);
    let saturation = 60.0 + rng.random::<f64>() * 20.0;
    let lightness = 75.0 + rng.random::<f64>() * 10.0;
    format!("hsl({hue}, {saturation:.1}%, {lightness:.1}%)")
}

// =============================================================================
// SETTINGS
// =============================================================================

/// Global wheel configuration.
///
/// The core treats every field as pre-validated. Range checks live in
/// [`Settings::validate`] and [`Settings::clamped`], which only the
/// configuration layer calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Repeat rounds applied uniformly to every eligible participant.
    #[serde(rename = "globalSlotCount")]
    pub base_slot_count: u32,
    /// Slot multiplier for boosted participants.
    #[serde(rename = "specialMultiplier")]
    pub boost_multiplier: u32,
    /// Spin animation length in milliseconds.
    #[serde(rename = "spinDuration")]
    pub spin_duration_ms: u32,
    /// Full turns made before the wheel settles.
    #[serde(rename = "minFullTurns", default = "default_min_full_turns")]
    pub min_full_turns: u32,
}

fn default_min_full_turns() -> u32 {
    DEFAULT_MIN_FULL_TURNS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_slot_count: DEFAULT_BASE_SLOT_COUNT,
            boost_multiplier: DEFAULT_BOOST_MULTIPLIER,
            spin_duration_ms: DEFAULT_SPIN_DURATION_MS,
            min_full_turns: DEFAULT_MIN_FULL_TURNS,
        }
    }
}

/// A settings field outside its allowed range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("base slot count {value} out of range ({min}..={max})")]
    BaseSlotCount { value: u32, min: u32, max: u32 },
    #[error("boost multiplier {value} out of range ({min}..={max})")]
    BoostMultiplier { value: u32, min: u32, max: u32 },
    #[error("spin duration {value}ms out of range ({min}..={max})")]
    SpinDuration { value: u32, min: u32, max: u32 },
    #[error("minimum full turns must be at least 1")]
    MinFullTurns,
}

impl Settings {
    /// Check every field against its allowed range, reporting the first violation.
    ///
    /// # Errors
    ///
    /// Returns the [`SettingsError`] variant naming the offending field.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let (min, max) = BASE_SLOT_COUNT_RANGE;
        if !(min..=max).contains(&self.base_slot_count) {
            return Err(SettingsError::BaseSlotCount { value: self.base_slot_count, min, max });
        }
        let (min, max) = BOOST_MULTIPLIER_RANGE;
        if !(min..=max).contains(&self.boost_multiplier) {
            return Err(SettingsError::BoostMultiplier { value: self.boost_multiplier, min, max });
        }
        let (min, max) = SPIN_DURATION_MS_RANGE;
        if !(min..=max).contains(&self.spin_duration_ms) {
            return Err(SettingsError::SpinDuration { value: self.spin_duration_ms, min, max });
        }
        if self.min_full_turns == 0 {
            return Err(SettingsError::MinFullTurns);
        }
        Ok(())
    }

    /// Copy of these settings with every field coerced into its allowed range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            base_slot_count: self
                .base_slot_count
                .clamp(BASE_SLOT_COUNT_RANGE.0, BASE_SLOT_COUNT_RANGE.1),
            boost_multiplier: self
                .boost_multiplier
                .clamp(BOOST_MULTIPLIER_RANGE.0, BOOST_MULTIPLIER_RANGE.1),
            spin_duration_ms: self
                .spin_duration_ms
                .clamp(SPIN_DURATION_MS_RANGE.0, SPIN_DURATION_MS_RANGE.1),
            min_full_turns: self.min_full_turns.max(1),
        }
    }
}

// =============================================================================
// ROSTER
// =============================================================================

/// Ordered list of participants. List order drives pool and wedge order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from a comma-separated name list, skipping blank entries.
    #[must_use]
    pub fn from_names(raw: &str) -> Self {
        let participants = raw
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Participant::new)
            .collect();
        Self { participants }
    }

    /// Append a new participant. Returns its id, or `None` if the name is blank.
    pub fn add(&mut self, name: &str) -> Option<ParticipantId> {
        if name.trim().is_empty() {
            return None;
        }
        let participant = Participant::new(name);
        let id = participant.id.clone();
        self.participants.push(participant);
        Some(id)
    }

    /// Append an already-constructed participant.
    pub fn push(&mut self, participant: Participant) {
        self.participants.push(participant);
    }

    /// Remove a participant by id. Returns false if no such participant exists.
    pub fn remove(&mut self, id: &ParticipantId) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.id != *id);
        self.participants.len() != before
    }

    /// Flip the excluded flag. Returns false if no such participant exists.
    pub fn toggle_excluded(&mut self, id: &ParticipantId) -> bool {
        let Some(p) = self.get_mut(id) else {
            return false;
        };
        p.excluded = !p.excluded;
        true
    }

    /// Flip the boosted flag. Returns false if no such participant exists.
    pub fn toggle_boosted(&mut self, id: &ParticipantId) -> bool {
        let Some(p) = self.get_mut(id) else {
            return false;
        };
        p.boosted = !p.boosted;
        true
    }

    /// Look up a participant by id.
    #[must_use]
    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == *id)
    }

    fn get_mut(&mut self, id: &ParticipantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == *id)
    }

    /// Participants that can currently win, in list order.
    #[must_use]
    pub fn eligible(&self) -> Vec<&Participant> {
        self.participants.iter().filter(|p| !p.excluded).collect()
    }

    /// All participants in list order.
    #[must_use]
    pub fn as_slice(&self) -> &[Participant] {
        &self.participants
    }

    /// Number of participants, eligible or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Returns `true` if the roster has no participants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

impl From<Vec<Participant>> for Roster {
    fn from(participants: Vec<Participant>) -> Self {
        Self { participants }
    }
}
