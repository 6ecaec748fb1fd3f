//! Command-line and environment configuration.

use clap::{Parser, ValueEnum};

use fairsplit_ledger::{DuplicateUserPolicy, LedgerConfig};
use fairsplit_observability::TracingConfig;

use crate::render::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplicateUsers {
    /// Re-registering an id replaces the name.
    Overwrite,
    /// Re-registering an id is an error.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "fairsplit")]
#[command(author, version, about = "Track shared expenses and who owes whom", long_about = None)]
pub struct Cli {
    #[arg(long, env = "FAIRSPLIT_DUPLICATE_USERS", value_enum, default_value_t = DuplicateUsers::Overwrite)]
    pub duplicate_users: DuplicateUsers,

    /// Symbol printed in front of amounts.
    #[arg(long, env = "FAIRSPLIT_CURRENCY", default_value = "₹")]
    pub currency: String,

    #[arg(long, env = "FAIRSPLIT_OUTPUT", value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, env = "FAIRSPLIT_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    pub fn ledger_config(&self) -> LedgerConfig {
        let duplicate_users = match self.duplicate_users {
            DuplicateUsers::Overwrite => DuplicateUserPolicy::Overwrite,
            DuplicateUsers::Reject => DuplicateUserPolicy::Reject,
        };
        LedgerConfig { duplicate_users }
    }

    pub fn tracing_config(&self) -> TracingConfig {
        TracingConfig {
            default_filter: self.log_level.clone(),
            json: self.log_json,
        }
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.currency.clone(), self.output)
    }
}
