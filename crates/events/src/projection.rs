use crate::{Event, EventEnvelope};

/// A projection builds a read model from the append-only journal.
///
/// Read models are disposable: dropping one and replaying the journal into a
/// fresh instance must yield the same state.
///
/// ## Idempotency
///
/// Applying an envelope whose sequence number was already seen must be a
/// no-op, so a journal can be replayed over a partially built projection.
///
/// ## Error Handling
///
/// `apply` doesn't return errors. Events were validated before they were
/// journalled; a projection ignores events it has no interest in.
pub trait Projection {
    type Ev: Event;

    /// Apply a single event to the projection, updating the read model.
    fn apply(&mut self, envelope: &EventEnvelope<Self::Ev>);

    /// Apply a sequence of envelopes in journal order.
    fn apply_all<'a, I>(&mut self, envelopes: I)
    where
        I: IntoIterator<Item = &'a EventEnvelope<Self::Ev>>,
        Self::Ev: 'a,
    {
        for envelope in envelopes {
            self.apply(envelope);
        }
    }
}
