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

use atm_sim_rs::{
    Authorization, ExpiryMonitor, IDLE_TIMEOUT, Ledger, Outcome, SWEEP_PERIOD, Session, Shell,
    loader,
};
use clap::Parser;
use rust_decimal::Decimal;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// ATM Simulator - a single-session command shell over an in-memory ledger
///
/// Loads account data from a CSV file at startup, then prompts for commands.
/// Enter 'help' at the prompt for the command list.
#[derive(Parser, Debug)]
#[command(name = "atm-sim-rs")]
#[command(about = "An ATM simulator with a PIN-authenticated command shell", long_about = None)]
struct Args {
    /// Path to the account data CSV (columns: ACCOUNT_ID, PIN, BALANCE)
    #[arg(long, value_name = "FILE", default_value = "data/accounts.csv")]
    data_file: PathBuf,

    /// Cash loaded into the machine at startup
    #[arg(long, value_name = "AMOUNT", default_value = "10000.00")]
    starting_cash: Decimal,

    /// Path to the diagnostic log file
    #[arg(long, value_name = "FILE", default_value = "logfile.log")]
    log_file: PathBuf,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_file) {
        eprintln!(
            "Failed to open log file '{}': {}",
            args.log_file.display(),
            e
        );
        process::exit(1);
    }
    info!("logging started");

    // A missing data file or a missing required column is fatal at startup.
    let data = match loader::load_accounts(&args.data_file) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error loading account data: {e}");
            process::exit(1);
        }
    };

    let ledger = Arc::new(Ledger::new());
    ledger.set_initial_balances(args.starting_cash, data.balances);

    let authorization = Arc::new(Authorization::new());
    authorization.set_auth_data(data.credentials);

    let session = Arc::new(Session::new());

    let _monitor = ExpiryMonitor::spawn(
        Arc::clone(&session),
        SWEEP_PERIOD,
        IDLE_TIMEOUT,
        |_account_id| println!("Session expired due to inactivity."),
    );

    let shell = Shell::new(ledger, authorization, session);

    println!("Welcome to the ATM simulator. Enter 'help' for available commands.");
    run_prompt(&shell);
}

/// Reads lines from stdin until EOF or the `end` command.
fn run_prompt(shell: &Shell) {
    let stdin = io::stdin();
    loop {
        print!(">> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        }

        match shell.execute(&line) {
            Outcome::Reply(text) => println!("{text}"),
            Outcome::Silent => {}
            Outcome::Exit => {
                println!("exiting...");
                break;
            }
        }
    }
}

/// Routes diagnostics to the log file; the terminal stays clean for the
/// prompt.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
