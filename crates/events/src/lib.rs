//! Ledger events, the journal envelope and the projection contract.
//!
//! Accepted commands become events; events are journalled in envelopes and
//! fed to projections that build the read models (expense history, balances).

pub mod envelope;
pub mod event;
pub mod projection;

pub use envelope::EventEnvelope;
pub use event::Event;
pub use projection::Projection;
