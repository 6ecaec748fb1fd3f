//! Balance accumulator: who owes whom how much.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fairsplit_core::UserId;
use fairsplit_events::{EventEnvelope, Projection};

use crate::ledger::LedgerEvent;
use crate::split::Debt;

/// A single debtor → creditor running total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub debtor: UserId,
    pub creditor: UserId,
    pub amount: f64,
}

/// Read model: accumulated debts keyed by debtor, then creditor.
///
/// Opposite directions are kept apart: if A owes B and B owes A, both entries
/// persist. Nothing is netted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceSheet {
    owed: BTreeMap<UserId, BTreeMap<UserId, f64>>,
    last_sequence: u64,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge debt deltas into the running totals. Self-debts are dropped.
    pub fn accumulate(&mut self, debts: &[Debt]) {
        for debt in debts {
            if debt.debtor == debt.creditor {
                continue;
            }
            *self
                .owed
                .entry(debt.debtor.clone())
                .or_default()
                .entry(debt.creditor.clone())
                .or_insert(0.0) += debt.amount;
        }
    }

    /// What `debtor` owes `creditor` (0 when they never shared an expense).
    pub fn balance(&self, debtor: &UserId, creditor: &UserId) -> f64 {
        self.owed
            .get(debtor)
            .and_then(|inner| inner.get(creditor))
            .copied()
            .unwrap_or(0.0)
    }

    /// Positive entries ordered by debtor id, then creditor id.
    pub fn list(&self) -> Vec<BalanceEntry> {
        self.owed
            .iter()
            .flat_map(|(debtor, inner)| {
                inner
                    .iter()
                    .filter(|(_, amount)| **amount > 0.0)
                    .map(move |(creditor, amount)| BalanceEntry {
                        debtor: debtor.clone(),
                        creditor: creditor.clone(),
                        amount: *amount,
                    })
            })
            .collect()
    }

    /// True when no positive entry exists.
    pub fn is_settled(&self) -> bool {
        self.owed
            .values()
            .all(|inner| inner.values().all(|amount| *amount <= 0.0))
    }
}

impl Projection for BalanceSheet {
    type Ev = LedgerEvent;

    fn apply(&mut self, envelope: &EventEnvelope<Self::Ev>) {
        if envelope.sequence_number() <= self.last_sequence {
            return;
        }
        self.last_sequence = envelope.sequence_number();

        if let LedgerEvent::ExpenseRecorded(e) = envelope.payload() {
            self.accumulate(&e.debts);
        }
    }
}
