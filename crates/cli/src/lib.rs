//! `fairsplit-cli`
//!
//! Interactive text front end over [`fairsplit_ledger::SplitService`]. It owns
//! prompting, re-prompting on malformed numbers and formatting; every ledger
//! rule lives in the ledger crate.

pub mod config;
pub mod error;
pub mod menu;
pub mod prompt;
pub mod render;

pub use config::{Cli, DuplicateUsers, OutputFormat};
pub use error::CliError;
pub use menu::Menu;
pub use prompt::Prompter;
pub use render::Renderer;
