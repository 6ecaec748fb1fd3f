//! Turning views into text or JSON.

use fairsplit_ledger::{BalanceView, ExpenseView};

use crate::config::OutputFormat;
use crate::error::CliError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    currency: String,
    format: OutputFormat,
}

impl Renderer {
    pub fn new(currency: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            currency: currency.into(),
            format,
        }
    }

    /// `title | ₹amount | Paid by name`, one line per expense.
    pub fn expenses(&self, expenses: &[ExpenseView]) -> Result<Vec<String>, CliError> {
        match self.format {
            OutputFormat::Json => Ok(vec![serde_json::to_string_pretty(expenses)?]),
            OutputFormat::Text if expenses.is_empty() => Ok(vec!["No expenses yet.".to_string()]),
            OutputFormat::Text => Ok(expenses
                .iter()
                .map(|e| {
                    format!(
                        "{} | {}{:.2} | Paid by {}",
                        e.title, self.currency, e.amount, e.payer_name
                    )
                })
                .collect()),
        }
    }

    /// `debtor owes creditor ₹amount`, one line per balance.
    pub fn balances(&self, balances: &[BalanceView]) -> Result<Vec<String>, CliError> {
        match self.format {
            OutputFormat::Json => Ok(vec![serde_json::to_string_pretty(balances)?]),
            OutputFormat::Text if balances.is_empty() => Ok(vec!["No balances yet.".to_string()]),
            OutputFormat::Text => Ok(balances
                .iter()
                .map(|b| {
                    format!(
                        "{} owes {} {}{:.2}",
                        b.debtor_name, b.creditor_name, self.currency, b.amount
                    )
                })
                .collect()),
        }
    }
}
