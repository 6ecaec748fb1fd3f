use serde::{Deserialize, Serialize};

use fairsplit_core::{Amount, DomainError, DomainResult, Entity, ExpenseId, UserId};
use fairsplit_events::{EventEnvelope, Projection};

use crate::ledger::LedgerEvent;

/// A recorded expense (immutable).
///
/// `participants` is never empty and holds each user once, in the order they
/// were first given. The payer may or may not be among them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    id: ExpenseId,
    title: String,
    amount: Amount,
    payer: UserId,
    participants: Vec<UserId>,
}

impl Expense {
    pub fn new(
        id: ExpenseId,
        title: impl AsRef<str>,
        amount: Amount,
        payer: UserId,
        participants: impl IntoIterator<Item = UserId>,
    ) -> DomainResult<Self> {
        let mut unique: Vec<UserId> = Vec::new();
        for participant in participants {
            if !unique.contains(&participant) {
                unique.push(participant);
            }
        }
        if unique.is_empty() {
            return Err(DomainError::validation("participants must not be empty"));
        }

        Ok(Self {
            id,
            title: title.as_ref().trim().to_string(),
            amount,
            payer,
            participants: unique,
        })
    }

    pub fn id_typed(&self) -> ExpenseId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn payer(&self) -> &UserId {
        &self.payer
    }

    pub fn participants(&self) -> &[UserId] {
        &self.participants
    }
}

impl Entity for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Read model: every recorded expense in recording order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseHistory {
    expenses: Vec<Expense>,
    last_sequence: u64,
}

impl ExpenseHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

impl Projection for ExpenseHistory {
    type Ev = LedgerEvent;

    fn apply(&mut self, envelope: &EventEnvelope<Self::Ev>) {
        if envelope.sequence_number() <= self.last_sequence {
            return;
        }
        self.last_sequence = envelope.sequence_number();

        if let LedgerEvent::ExpenseRecorded(e) = envelope.payload() {
            self.expenses.push(e.expense.clone());
        }
    }
}
