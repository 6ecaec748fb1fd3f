use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use fairsplit_core::{
    Aggregate, AggregateRoot, Amount, DomainError, Entity, ExpenseId, LedgerId, UserId,
};
use fairsplit_events::Event;

use crate::expense::Expense;
use crate::split::{Debt, EqualSplit, SplitStrategy};
use crate::user::{User, UserRegistry};

/// What registering an already known user id does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateUserPolicy {
    /// Last write wins: the new name replaces the old one.
    #[default]
    Overwrite,
    /// Registration fails with [`DomainError::DuplicateUser`].
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub duplicate_users: DuplicateUserPolicy,
}

/// Aggregate root: Ledger.
///
/// Holds the user registry (needed to validate commands) and the split
/// strategy. Expense history and balances are read models built from the
/// events this aggregate emits.
#[derive(Debug)]
pub struct Ledger {
    id: LedgerId,
    config: LedgerConfig,
    strategy: Box<dyn SplitStrategy>,
    users: UserRegistry,
    expenses_recorded: u64,
    version: u64,
}

impl Ledger {
    /// Empty ledger using [`EqualSplit`].
    pub fn new(id: LedgerId, config: LedgerConfig) -> Self {
        Self::with_strategy(id, config, Box::new(EqualSplit))
    }

    pub fn with_strategy(
        id: LedgerId,
        config: LedgerConfig,
        strategy: Box<dyn SplitStrategy>,
    ) -> Self {
        Self {
            id,
            config,
            strategy,
            users: UserRegistry::new(),
            expenses_recorded: 0,
            version: 0,
        }
    }

    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    pub fn expenses_recorded(&self) -> u64 {
        self.expenses_recorded
    }
}

impl AggregateRoot for Ledger {
    type Id = LedgerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RegisterUser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUser {
    pub user_id: UserId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RecordExpense.
///
/// `amount` is raw input; the ledger validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordExpense {
    pub expense_id: ExpenseId,
    pub title: String,
    pub amount: f64,
    pub payer: UserId,
    pub participants: Vec<UserId>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerCommand {
    RegisterUser(RegisterUser),
    RecordExpense(RecordExpense),
}

/// Event: UserRegistered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegistered {
    pub user_id: UserId,
    pub name: String,
    /// Name previously registered under the same id, if it was overwritten.
    pub replaced: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ExpenseRecorded.
///
/// Carries the debts computed at decision time, so projections never need
/// the split strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecorded {
    pub expense: Expense,
    pub debts: Vec<Debt>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    UserRegistered(UserRegistered),
    ExpenseRecorded(ExpenseRecorded),
}

impl Event for LedgerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::UserRegistered(_) => "ledger.user.registered",
            LedgerEvent::ExpenseRecorded(_) => "ledger.expense.recorded",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            LedgerEvent::UserRegistered(e) => e.occurred_at,
            LedgerEvent::ExpenseRecorded(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Ledger {
    type Command = LedgerCommand;
    type Event = LedgerEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            LedgerEvent::UserRegistered(e) => {
                // Names were validated in `handle`; a foreign journal entry
                // with a blank name is not applied and does not count.
                match User::new(e.user_id.clone(), &e.name) {
                    Ok(user) => {
                        self.users.insert(user);
                    }
                    Err(_) => return,
                }
            }
            LedgerEvent::ExpenseRecorded(_) => {
                self.expenses_recorded += 1;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            LedgerCommand::RegisterUser(cmd) => self.handle_register(cmd),
            LedgerCommand::RecordExpense(cmd) => self.handle_record(cmd),
        }
    }
}

impl Ledger {
    fn handle_register(&self, cmd: &RegisterUser) -> Result<Vec<LedgerEvent>, DomainError> {
        let user = User::new(cmd.user_id.clone(), &cmd.name)?;

        let replaced = match (self.users.get(&cmd.user_id), self.config.duplicate_users) {
            (Some(_), DuplicateUserPolicy::Reject) => {
                return Err(DomainError::DuplicateUser(cmd.user_id.clone()));
            }
            (existing, _) => existing.map(|u| u.name().to_string()),
        };

        Ok(vec![LedgerEvent::UserRegistered(UserRegistered {
            user_id: user.id().clone(),
            name: user.name().to_string(),
            replaced,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_record(&self, cmd: &RecordExpense) -> Result<Vec<LedgerEvent>, DomainError> {
        let amount = Amount::new(cmd.amount)?;
        if cmd.participants.is_empty() {
            return Err(DomainError::validation("participants must not be empty"));
        }

        self.users.require(&cmd.payer)?;
        for participant in &cmd.participants {
            self.users.require(participant)?;
        }

        let expense = Expense::new(
            cmd.expense_id,
            &cmd.title,
            amount,
            cmd.payer.clone(),
            cmd.participants.iter().cloned(),
        )?;
        let debts = self.strategy.split(&expense);

        debug!(
            expense_id = %expense.id_typed(),
            strategy = self.strategy.name(),
            debts = debts.len(),
            "expense split"
        );

        Ok(vec![LedgerEvent::ExpenseRecorded(ExpenseRecorded {
            expense,
            debts,
            occurred_at: cmd.occurred_at,
        })])
    }
}
