//! `fairsplit-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no front-end concerns).

pub mod aggregate;
pub mod amount;
pub mod error;
pub mod id;
pub mod model;

pub use aggregate::{Aggregate, AggregateRoot};
pub use amount::Amount;
pub use error::{DomainError, DomainResult};
pub use id::{EventId, ExpenseId, LedgerId, UserId};
pub use model::{Entity, ValueObject};
