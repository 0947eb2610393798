// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Command dispatch for the interactive shell.
//!
//! The [`Shell`] owns no I/O: it maps one input line to one [`Outcome`], and
//! the binary's prompt loop does the printing. Commands that operate on an
//! account are gated on an authenticated session; every accepted command
//! refreshes the session's activity timestamp so the expiry monitor sees the
//! user as active.

use crate::authorization::Authorization;
use crate::base::AccountId;
use crate::ledger::Ledger;
use crate::session::Session;
use std::sync::Arc;
use tracing::info;

const HELP: &str = "Available Commands:
\tauthorize\tauthorize the user to perform transactions
\tbalance  \treturn the account balance
\tdeposit  \tmake a deposit
\tend      \texit the application
\thelp     \tshow available commands
\thistory  \tview transaction history
\tlogout   \tlog out the user
\twithdraw \twithdraw funds";

/// What the prompt loop should do with a line's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this reply and keep prompting.
    Reply(String),
    /// Nothing to print (blank input).
    Silent,
    /// Terminate the shell.
    Exit,
}

/// Maps command lines onto the ledger, authorization and session services.
pub struct Shell {
    ledger: Arc<Ledger>,
    authorization: Arc<Authorization>,
    session: Arc<Session>,
}

impl Shell {
    pub fn new(
        ledger: Arc<Ledger>,
        authorization: Arc<Authorization>,
        session: Arc<Session>,
    ) -> Self {
        Shell {
            ledger,
            authorization,
            session,
        }
    }

    /// Executes one input line.
    pub fn execute(&self, line: &str) -> Outcome {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = tokens.split_first() else {
            return Outcome::Silent;
        };

        // Account commands require an authenticated session; authorize,
        // logout, help and end are always allowed.
        if matches!(name, "balance" | "deposit" | "withdraw" | "history")
            && !self.session.is_authenticated()
        {
            return Outcome::Reply("Authorization required.".to_string());
        }

        let outcome = match name {
            "authorize" => self.authorize(args),
            "balance" => self.balance(args),
            "deposit" => self.deposit(args),
            "withdraw" => self.withdraw(args),
            "history" => self.history(args),
            "logout" => self.logout(),
            "help" => Outcome::Reply(HELP.to_string()),
            "end" => Outcome::Exit,
            _ => {
                return Outcome::Reply(format!(
                    "Unknown command '{name}'. Enter 'help' for available commands."
                ));
            }
        };
        self.session.touch();
        outcome
    }

    fn authorize(&self, args: &[&str]) -> Outcome {
        if args.len() != 2 {
            return Outcome::Reply(
                "authorize requires 2 parameters: account number, pin".to_string(),
            );
        }

        let account_id = AccountId::from(args[0]);
        match self.authorization.authenticate(&account_id, args[1]) {
            Ok(true) => {
                info!(%account_id, "successful login");
                self.session.login(account_id.clone());
                Outcome::Reply(format!("{account_id} successfully authorized."))
            }
            Ok(false) => {
                info!(%account_id, "invalid login attempt");
                Outcome::Reply("Authorization failed.".to_string())
            }
            Err(e) => Outcome::Reply(e.to_string()),
        }
    }

    fn balance(&self, args: &[&str]) -> Outcome {
        if !args.is_empty() {
            return Outcome::Reply("the balance command does not take any parameters".to_string());
        }
        let Some(account_id) = self.session.account_id() else {
            // The expiry monitor can clear the session between the gate check
            // and here.
            return Outcome::Reply("Authorization required.".to_string());
        };
        Outcome::Reply(format!(
            "balance: ${:.2}",
            self.ledger.get_balance(&account_id)
        ))
    }

    fn deposit(&self, args: &[&str]) -> Outcome {
        if args.len() != 1 {
            return Outcome::Reply(
                "deposit takes one parameter - amount of the deposit".to_string(),
            );
        }
        let Some(account_id) = self.session.account_id() else {
            return Outcome::Reply("Authorization required.".to_string());
        };
        match self.ledger.deposit(&account_id, args[0]) {
            Ok(new_balance) => Outcome::Reply(format!("Current balance: ${new_balance:.2}")),
            Err(e) => Outcome::Reply(e.to_string()),
        }
    }

    fn withdraw(&self, args: &[&str]) -> Outcome {
        if args.len() != 1 {
            return Outcome::Reply(
                "withdraw takes one parameter - amount of the withdrawal".to_string(),
            );
        }
        let Some(account_id) = self.session.account_id() else {
            return Outcome::Reply("Authorization required.".to_string());
        };
        match self.ledger.withdraw(&account_id, args[0]) {
            Ok(result) => {
                let mut reply = format!("Amount dispensed: ${:.2}\n", result.amount_withdrawn);
                if result.was_overdrawn {
                    reply.push_str("You have been charged an overdraft fee of $5. ");
                }
                reply.push_str(&format!("Current balance: ${:.2}", result.remaining_balance));
                Outcome::Reply(reply)
            }
            Err(e) => Outcome::Reply(e.to_string()),
        }
    }

    fn history(&self, args: &[&str]) -> Outcome {
        if !args.is_empty() {
            return Outcome::Reply("the history command does not take any parameters".to_string());
        }
        let Some(account_id) = self.session.account_id() else {
            return Outcome::Reply("Authorization required.".to_string());
        };

        let entries = self.ledger.get_history(&account_id);
        if entries.is_empty() {
            return Outcome::Reply("No history found".to_string());
        }

        let mut reply = String::from("date\t\t\t\tamount\t\tbalance");
        for entry in entries {
            reply.push_str(&format!(
                "\n{}\t\t{:.2}\t\t{:.2}",
                entry.date.format("%Y-%m-%d %H:%M:%SZ"),
                entry.amount,
                entry.balance
            ));
        }
        Outcome::Reply(reply)
    }

    fn logout(&self) -> Outcome {
        match self.session.logout() {
            Some(account_id) => Outcome::Reply(format!("Account {account_id} logged out.")),
            None => Outcome::Reply("No account is currently authorized.".to_string()),
        }
    }
}
