use chrono::{DateTime, Utc};

/// A fact recorded by the ledger.
///
/// Once journalled an event is never changed; `event_type` and `version`
/// together identify its serialized shape.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Dotted name, e.g. "ledger.expense.recorded".
    fn event_type(&self) -> &'static str;

    fn version(&self) -> u32;

    fn occurred_at(&self) -> DateTime<Utc>;
}
