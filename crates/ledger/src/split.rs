//! Split strategies: how one expense turns into individual debts.

use serde::{Deserialize, Serialize};

use fairsplit_core::UserId;

use crate::expense::Expense;

/// One debt delta: `debtor` now owes `creditor` an extra `amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub debtor: UserId,
    pub creditor: UserId,
    pub amount: f64,
}

/// Turns an expense into debt deltas.
///
/// Strategies only compute; merging the deltas into running balances is the
/// job of [`crate::BalanceSheet`].
pub trait SplitStrategy: core::fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn split(&self, expense: &Expense) -> Vec<Debt>;
}

/// Every participant carries `amount / participants` of the cost.
///
/// The payer's own share is computed but never turned into a debt. There is no
/// rounding correction across participants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EqualSplit;

impl SplitStrategy for EqualSplit {
    fn name(&self) -> &'static str {
        "equal"
    }

    fn split(&self, expense: &Expense) -> Vec<Debt> {
        // `Expense` guarantees at least one participant.
        let share = expense.amount().value() / expense.participants().len() as f64;

        expense
            .participants()
            .iter()
            .filter(|p| *p != expense.payer())
            .map(|p| Debt {
                debtor: p.clone(),
                creditor: expense.payer().clone(),
                amount: share,
            })
            .collect()
    }
}
