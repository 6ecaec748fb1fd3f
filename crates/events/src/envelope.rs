use serde::{Deserialize, Serialize};

use fairsplit_core::EventId;

/// Envelope for an event: the unit appended to the session journal.
///
/// `sequence_number` starts at 1 and increases by one per journalled event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: EventId,
    sequence_number: u64,
    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(event_id: EventId, sequence_number: u64, payload: E) -> Self {
        Self {
            event_id,
            sequence_number,
            payload,
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }
}
