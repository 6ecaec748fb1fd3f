//! The interactive menu loop.

use std::io::{BufRead, Write};

use tracing::debug;

use fairsplit_core::UserId;
use fairsplit_ledger::SplitService;

use crate::error::CliError;
use crate::prompt::Prompter;
use crate::render::Renderer;

const MENU: [&str; 5] = [
    "1. Add User",
    "2. Add Expense",
    "3. View Expenses",
    "4. Show Balances",
    "5. Exit",
];

enum Flow {
    Continue,
    Exit,
}

pub struct Menu<R, W> {
    prompter: Prompter<R, W>,
    service: SplitService,
    renderer: Renderer,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, service: SplitService, renderer: Renderer) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            service,
            renderer,
        }
    }

    /// Run until the user picks Exit or input ends.
    pub fn run(&mut self) -> Result<(), CliError> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) | Err(CliError::Eof) => {
                    self.prompter.say("Exiting...")?;
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
    }

    pub fn service(&self) -> &SplitService {
        &self.service
    }

    pub fn into_parts(self) -> (SplitService, W) {
        (self.service, self.prompter.into_output())
    }

    fn step(&mut self) -> Result<Flow, CliError> {
        self.prompter.say("")?;
        for entry in MENU {
            self.prompter.say(entry)?;
        }

        let choice = self.prompter.int("Enter choice: ")?;
        debug!(choice, "menu choice");
        match choice {
            1 => self.add_user()?,
            2 => self.add_expense()?,
            3 => self.view_expenses()?,
            4 => self.show_balances()?,
            5 => return Ok(Flow::Exit),
            _ => self.prompter.say("Invalid choice.")?,
        }
        Ok(Flow::Continue)
    }

    fn add_user(&mut self) -> Result<(), CliError> {
        let id = self.prompter.line("Enter User ID: ")?;
        let name = self.prompter.line("Enter Name: ")?;

        if id.is_empty() || name.is_empty() {
            return self.prompter.say("Invalid input.");
        }

        match self.service.register_user(&id, &name) {
            Ok(_) => self.prompter.say("User Added."),
            Err(err) => self.prompter.say(format!("User not added: {err}")),
        }
    }

    fn add_expense(&mut self) -> Result<(), CliError> {
        let title = self.prompter.line("Enter Title: ")?;

        let amount = self.prompter.decimal("Enter Amount: ")?;
        if amount <= 0.0 {
            return self.prompter.say("Amount must be positive.");
        }

        let payer = self.prompter.line("Enter Payer ID: ")?;
        if !self.is_registered(&payer) {
            return self.prompter.say("Payer not found.");
        }

        let count = self.prompter.int("Enter number of participants: ")?;
        if count <= 0 {
            return self.prompter.say("Invalid participant count.");
        }

        let mut participants = Vec::new();
        for _ in 0..count {
            let id = self.prompter.line("Enter participant ID: ")?;
            if !self.is_registered(&id) {
                self.prompter.say(format!("User not found: {id}"))?;
                return self.prompter.say("Expense not added.");
            }
            participants.push(id);
        }

        match self
            .service
            .record_expense(&title, amount, &payer, &participants)
        {
            Ok(_) => self.prompter.say("Expense Added."),
            Err(err) => self.prompter.say(format!("Expense not added: {err}")),
        }
    }

    fn view_expenses(&mut self) -> Result<(), CliError> {
        let lines = self.renderer.expenses(&self.service.list_expenses())?;
        for line in lines {
            self.prompter.say(line)?;
        }
        Ok(())
    }

    fn show_balances(&mut self) -> Result<(), CliError> {
        let lines = self.renderer.balances(&self.service.list_balances())?;
        for line in lines {
            self.prompter.say(line)?;
        }
        Ok(())
    }

    fn is_registered(&self, raw: &str) -> bool {
        UserId::new(raw)
            .map(|id| self.service.user(&id).is_some())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use fairsplit_ledger::{DuplicateUserPolicy, LedgerConfig};
    use std::io::Cursor;

    fn run_with(config: LedgerConfig, script: &[&str]) -> (SplitService, String) {
        let mut input = script.join("\n");
        input.push('\n');
        let mut menu = Menu::new(
            Cursor::new(input.into_bytes()),
            Vec::new(),
            SplitService::new(config),
            Renderer::new("₹", OutputFormat::Text),
        );
        menu.run().unwrap();
        let (service, output) = menu.into_parts();
        (service, String::from_utf8(output).unwrap())
    }

    fn run(script: &[&str]) -> (SplitService, String) {
        run_with(LedgerConfig::default(), script)
    }

    const USERS: [&str; 9] = ["1", "A", "Alice", "1", "B", "Bob", "1", "C", "Carol"];

    fn uid(s: &str) -> UserId {
        s.parse().unwrap()
    }

    #[test]
    fn full_session_prints_expenses_and_balances() {
        let mut script = USERS.to_vec();
        script.extend([
            "2", "Dinner", "90", "A", "3", "A", "B", "C",
            "2", "Cab", "30", "B", "2", "A", "B",
            "3", "4", "5",
        ]);
        let (service, out) = run(&script);

        assert_eq!(out.matches("User Added.").count(), 3);
        assert_eq!(out.matches("Expense Added.").count(), 2);
        assert!(out.contains("Dinner | ₹90.00 | Paid by Alice"));
        assert!(out.contains("Cab | ₹30.00 | Paid by Bob"));
        assert!(out.contains("Alice owes Bob ₹15.00"));
        assert!(out.contains("Bob owes Alice ₹30.00"));
        assert!(out.contains("Carol owes Alice ₹30.00"));
        assert!(out.trim_end().ends_with("Exiting..."));
        assert_eq!(service.balance(&uid("B"), &uid("A")), 30.0);
    }

    #[test]
    fn empty_listings_on_a_fresh_session() {
        let (_, out) = run(&["3", "4", "5"]);
        assert!(out.contains("No expenses yet."));
        assert!(out.contains("No balances yet."));
    }

    #[test]
    fn malformed_numbers_reprompt_instead_of_failing() {
        let mut script = vec!["menu?", "1", "A", "Alice", "1", "B", "Bob"];
        script.extend(["2", "Tea", "ten", "10", "A", "two", "2", "A", "B", "5"]);
        let (service, out) = run(&script);

        assert_eq!(out.matches("Please enter a valid integer.").count(), 2);
        assert_eq!(out.matches("Please enter a valid number.").count(), 1);
        assert_eq!(service.balance(&uid("B"), &uid("A")), 5.0);
    }

    #[test]
    fn invalid_expenses_are_not_recorded() {
        let mut script = USERS.to_vec();
        script.extend([
            "2", "Free", "0",
            "2", "Ghost", "10", "Z",
            "2", "Nobody", "10", "A", "0",
            "2", "Stranger", "10", "A", "2", "B", "Z",
            "5",
        ]);
        let (service, out) = run(&script);

        assert!(out.contains("Amount must be positive."));
        assert!(out.contains("Payer not found."));
        assert!(out.contains("Invalid participant count."));
        assert!(out.contains("User not found: Z"));
        assert!(!out.contains("Expense Added."));
        assert!(service.list_expenses().is_empty());
        assert!(service.list_balances().is_empty());
    }

    #[test]
    fn blank_user_input_is_refused() {
        let (service, out) = run(&["1", "", "Alice", "5"]);
        assert!(out.contains("Invalid input."));
        assert!(service.users().is_empty());
    }

    #[test]
    fn rejected_duplicate_is_reported() {
        let config = LedgerConfig {
            duplicate_users: DuplicateUserPolicy::Reject,
        };
        let (service, out) = run_with(config, &["1", "A", "Alice", "1", "A", "Eve", "5"]);
        assert!(out.contains("User not added: user already registered: A"));
        assert_eq!(service.user(&uid("A")).unwrap().name(), "Alice");
    }

    #[test]
    fn unknown_choice_and_end_of_input_are_handled() {
        let (_, out) = run(&["9"]);
        assert!(out.contains("Invalid choice."));
        assert!(out.trim_end().ends_with("Exiting..."));
    }
}
