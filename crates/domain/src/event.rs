//! Event — a scheduled gathering with participant check-in/out records.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{EventId, UserId};
use crate::time::{Timestamp, ensure_ordered};
use crate::user::User;

/// A scheduled event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub start: Timestamp,
    pub end: Timestamp,
    /// Check-in/out records, in registration order.
    pub participants: Vec<Participant>,
}

/// One participant's attendance window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Weak reference to the attending [`User`].
    pub user_id: UserId,
    pub arrival: Timestamp,
    pub departure: Timestamp,
}

/// Insert payload for an [`Event`]; also the merged form of an [`EventPatch`].
#[derive(Debug, Clone, Deserialize)]
pub struct EventPayload {
    pub name: String,
    pub start: Timestamp,
    pub end: Timestamp,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl EventPayload {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] for a blank name and
    /// [`ValidationError::InvalidTimeRange`] when the event or a participant
    /// ends before it starts.
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::require_non_empty("name", &self.name)?;
        ensure_ordered("end", self.start, self.end)?;
        for participant in &self.participants {
            ensure_ordered("departure", participant.arrival, participant.departure)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            name: self.name,
            start: self.start,
            end: self.end,
            participants: self.participants,
        }
    }
}

/// Partial update for an [`Event`]. A given `participants` list replaces
/// the stored one wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    pub name: Option<String>,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub participants: Option<Vec<Participant>>,
}

impl EventPatch {
    /// Merge onto `current`; the merged payload is validated as a whole, so
    /// moving only `start` past the stored `end` is rejected.
    #[must_use]
    pub fn apply(self, current: Event) -> EventPayload {
        EventPayload {
            name: self.name.unwrap_or(current.name),
            start: self.start.unwrap_or(current.start),
            end: self.end.unwrap_or(current.end),
            participants: self.participants.unwrap_or(current.participants),
        }
    }
}

impl From<EventPayload> for EventPatch {
    fn from(payload: EventPayload) -> Self {
        Self {
            name: Some(payload.name),
            start: Some(payload.start),
            end: Some(payload.end),
            participants: Some(payload.participants),
        }
    }
}

impl Event {
    /// Whether the event starts at or after `now`.
    #[must_use]
    pub fn is_upcoming(&self, now: Timestamp) -> bool {
        self.start >= now
    }
}

/// Pick the upcoming event with the earliest start; ties go to the lowest id.
pub fn next_event<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    now: Timestamp,
) -> Option<&'a Event> {
    events
        .into_iter()
        .filter(|event| event.is_upcoming(now))
        .min_by_key(|event| (event.start, event.id))
}

/// A participant record with its user resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantView {
    pub user: User,
    pub arrival: Timestamp,
    pub departure: Timestamp,
}
