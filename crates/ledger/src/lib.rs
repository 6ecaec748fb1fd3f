//! Shared-expense ledger.
//!
//! Pure domain logic only: no IO, no prompts, no persistence. The
//! [`Ledger`] aggregate validates commands and emits events; the
//! [`ExpenseHistory`] and [`BalanceSheet`] projections build the read models;
//! [`SplitService`] wires them together behind the surface a front end uses.

pub mod balance;
pub mod expense;
pub mod ledger;
pub mod service;
pub mod split;
pub mod user;

pub use balance::{BalanceEntry, BalanceSheet};
pub use expense::{Expense, ExpenseHistory};
pub use ledger::{
    DuplicateUserPolicy, ExpenseRecorded, Ledger, LedgerCommand, LedgerConfig, LedgerEvent,
    RecordExpense, RegisterUser, UserRegistered,
};
pub use service::{BalanceView, ExpenseView, SplitService};
pub use split::{Debt, EqualSplit, SplitStrategy};
pub use user::{User, UserRegistry};
