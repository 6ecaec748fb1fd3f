//! Session-level orchestration of the ledger.
//!
//! ```text
//! Command
//!   ↓
//! 1. Ledger::handle (pure validation + decision, produces events)
//!   ↓
//! 2. Ledger::apply (registry/version)
//!   ↓
//! 3. Journal append (sequence number + event id)
//!   ↓
//! 4. Projections (expense history, balance sheet)
//! ```
//!
//! A rejected command stops at step 1, so nothing is recorded.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use fairsplit_core::{
    Aggregate, AggregateRoot, DomainError, DomainResult, EventId, ExpenseId, LedgerId, UserId,
};
use fairsplit_events::{Event, EventEnvelope, Projection};

use crate::balance::BalanceSheet;
use crate::expense::ExpenseHistory;
use crate::ledger::{
    Ledger, LedgerCommand, LedgerConfig, LedgerEvent, RecordExpense, RegisterUser,
};
use crate::split::SplitStrategy;
use crate::user::{User, UserRegistry};

/// One expense as shown to a person.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseView {
    pub id: ExpenseId,
    pub title: String,
    pub amount: f64,
    pub payer_id: UserId,
    pub payer_name: String,
    pub participants: Vec<UserId>,
}

/// One balance entry as shown to a person.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceView {
    pub debtor_id: UserId,
    pub debtor_name: String,
    pub creditor_id: UserId,
    pub creditor_name: String,
    pub amount: f64,
}

/// The surface a front end talks to: register users, record expenses, read
/// back expenses and balances.
#[derive(Debug)]
pub struct SplitService {
    ledger: Ledger,
    history: ExpenseHistory,
    balances: BalanceSheet,
    journal: Vec<EventEnvelope<LedgerEvent>>,
}

impl SplitService {
    pub fn new(config: LedgerConfig) -> Self {
        Self::from_ledger(Ledger::new(LedgerId::new(), config))
    }

    pub fn with_strategy(config: LedgerConfig, strategy: Box<dyn SplitStrategy>) -> Self {
        Self::from_ledger(Ledger::with_strategy(LedgerId::new(), config, strategy))
    }

    fn from_ledger(ledger: Ledger) -> Self {
        Self {
            ledger,
            history: ExpenseHistory::new(),
            balances: BalanceSheet::new(),
            journal: Vec::new(),
        }
    }

    /// Rebuild a session from a journal.
    ///
    /// Debts were computed when each expense was recorded, so the result does
    /// not depend on which split strategy the new session uses. Sequence
    /// numbers must strictly increase (gaps are fine) and every entry must
    /// apply; otherwise the journal is refused with
    /// [`DomainError::InvariantViolation`].
    pub fn replay(
        config: LedgerConfig,
        journal: Vec<EventEnvelope<LedgerEvent>>,
    ) -> DomainResult<Self> {
        let mut service = Self::new(config);
        let mut last_sequence = 0;
        for envelope in &journal {
            let sequence_number = envelope.sequence_number();
            if sequence_number <= last_sequence {
                return Err(DomainError::invariant(format!(
                    "journal sequence {sequence_number} does not follow {last_sequence}"
                )));
            }
            last_sequence = sequence_number;

            let before = service.ledger.version();
            service.ledger.apply(envelope.payload());
            if service.ledger.version() == before {
                return Err(DomainError::invariant(format!(
                    "journal entry {sequence_number} could not be applied"
                )));
            }
        }
        service.history.apply_all(&journal);
        service.balances.apply_all(&journal);
        service.journal = journal;

        info!(
            events = service.journal.len(),
            expenses = service.history.len(),
            "ledger replayed"
        );
        Ok(service)
    }

    /// Register (or, under the overwrite policy, rename) a user.
    pub fn register_user(&mut self, id: &str, name: &str) -> DomainResult<UserId> {
        let user_id = UserId::new(id)?;
        let command = LedgerCommand::RegisterUser(RegisterUser {
            user_id: user_id.clone(),
            name: name.to_string(),
            occurred_at: Utc::now(),
        });
        self.execute(command)?;
        Ok(user_id)
    }

    /// Record an expense and split it among its participants.
    pub fn record_expense<I, S>(
        &mut self,
        title: &str,
        amount: f64,
        payer_id: &str,
        participant_ids: I,
    ) -> DomainResult<ExpenseId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let payer = UserId::new(payer_id)?;
        let participants = participant_ids
            .into_iter()
            .map(UserId::new)
            .collect::<DomainResult<Vec<_>>>()?;

        let expense_id = ExpenseId::new();
        let command = LedgerCommand::RecordExpense(RecordExpense {
            expense_id,
            title: title.to_string(),
            amount,
            payer,
            participants,
            occurred_at: Utc::now(),
        });
        self.execute(command)?;
        Ok(expense_id)
    }

    fn execute(&mut self, command: LedgerCommand) -> DomainResult<()> {
        let events = match self.ledger.handle(&command) {
            Ok(events) => events,
            Err(err) => {
                warn!(error = %err, "command rejected");
                return Err(err);
            }
        };

        for event in events {
            self.log_accepted(&event);
            self.ledger.apply(&event);

            let sequence_number = self
                .journal
                .last()
                .map_or(0, |last| last.sequence_number())
                + 1;
            let envelope = EventEnvelope::new(EventId::new(), sequence_number, event);
            self.history.apply(&envelope);
            self.balances.apply(&envelope);
            self.journal.push(envelope);
        }
        Ok(())
    }

    fn log_accepted(&self, event: &LedgerEvent) {
        match event {
            LedgerEvent::UserRegistered(e) => {
                if let Some(previous) = &e.replaced {
                    warn!(
                        user_id = %e.user_id,
                        previous = %previous,
                        name = %e.name,
                        "user id re-registered, name overwritten"
                    );
                } else {
                    info!(user_id = %e.user_id, name = %e.name, "user registered");
                }
            }
            LedgerEvent::ExpenseRecorded(e) => {
                info!(
                    event_type = event.event_type(),
                    expense_id = %e.expense.id_typed(),
                    payer = %e.expense.payer(),
                    amount = e.expense.amount().value(),
                    participants = e.expense.participants().len(),
                    "expense recorded"
                );
            }
        }
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.ledger.users().get(id)
    }

    pub fn users(&self) -> &UserRegistry {
        self.ledger.users()
    }

    /// Every expense in recording order. Empty on a fresh session.
    pub fn list_expenses(&self) -> Vec<ExpenseView> {
        self.history
            .list()
            .iter()
            .map(|e| ExpenseView {
                id: e.id_typed(),
                title: e.title().to_string(),
                amount: e.amount().value(),
                payer_id: e.payer().clone(),
                payer_name: self.display_name(e.payer()),
                participants: e.participants().to_vec(),
            })
            .collect()
    }

    /// Positive balances ordered by debtor id, then creditor id.
    pub fn list_balances(&self) -> Vec<BalanceView> {
        self.balances
            .list()
            .into_iter()
            .map(|entry| BalanceView {
                debtor_name: self.display_name(&entry.debtor),
                creditor_name: self.display_name(&entry.creditor),
                debtor_id: entry.debtor,
                creditor_id: entry.creditor,
                amount: entry.amount,
            })
            .collect()
    }

    /// What `debtor` owes `creditor`.
    pub fn balance(&self, debtor: &UserId, creditor: &UserId) -> f64 {
        self.balances.balance(debtor, creditor)
    }

    pub fn journal(&self) -> &[EventEnvelope<LedgerEvent>] {
        &self.journal
    }

    pub fn version(&self) -> u64 {
        self.ledger.version()
    }

    // Users are never removed, so the fallback only covers foreign journals.
    fn display_name(&self, id: &UserId) -> String {
        self.user(id)
            .map(|u| u.name().to_string())
            .unwrap_or_else(|| id.to_string())
    }
}
