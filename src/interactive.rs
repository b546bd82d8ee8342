//! Menu-driven terminal front end.
//!
//! Input is read as whitespace-separated tokens, so answers may be typed
//! on one line or several. End of input behaves like choosing "Exit".

use crate::core::transaction::Amount;
use crate::session::Session;
use crate::store::audit::AuditSink;
use crate::store::auth::CredentialStore;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::Path;

const MENU: &str = "
Menu:
1. Add New Entity
2. Add Transaction
3. Minimize Transactions
4. View Transaction History
5. Undo Last Transaction
6. Redo Last Transaction
7. Clear All Transactions
8. View Latest Transactions
9. View Specific Person Transactions
10. Sorted Transactions using BST
11. Exit
";

/// Token reader and writer pair for prompting a user.
pub struct Prompt<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `question` and read the next token; `None` at end of input.
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        self.next_token()
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }

    pub fn say(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", text.as_ref())
    }
}

/// Login / create-account gate. Returns whether the session may proceed.
///
/// Creating an account never logs the user in; they must log in on the
/// next run.
pub fn authenticate<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    store: &mut CredentialStore,
) -> io::Result<bool> {
    let Some(choice) = prompt.ask("1. Login\n2. Create New Account\nEnter your choice: ")? else {
        return Ok(false);
    };
    match choice.as_str() {
        "1" => {
            let Some(user) = prompt.ask("Enter username: ")? else {
                return Ok(false);
            };
            let Some(pass) = prompt.ask("Enter password: ")? else {
                return Ok(false);
            };
            if store.verify(&user, &pass) {
                prompt.say(format!("Login successful. Welcome, {user}!"))?;
                Ok(true)
            } else {
                prompt.say("Invalid username or password.")?;
                Ok(false)
            }
        }
        "2" => {
            let Some(user) = prompt.ask("Enter new username: ")? else {
                return Ok(false);
            };
            let Some(pass) = prompt.ask("Enter new password: ")? else {
                return Ok(false);
            };
            match store.create_account(&user, &pass) {
                Ok(()) => prompt.say("Account created successfully. Please login to continue.")?,
                Err(e) => prompt.say(format!("Error: {e}"))?,
            }
            Ok(false)
        }
        _ => {
            prompt.say("Invalid choice.")?;
            Ok(false)
        }
    }
}

/// Run the main menu until the user exits, then save to `data_file`.
pub fn run_menu<R, W, A>(
    prompt: &mut Prompt<R, W>,
    session: &mut Session<A>,
    data_file: &Path,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    A: AuditSink,
{
    loop {
        let Some(choice) = prompt.ask(&format!("{MENU}\nEnter your choice: "))? else {
            break;
        };
        match choice.as_str() {
            "1" => add_entity(prompt, session)?,
            "2" => add_transaction(prompt, session)?,
            "3" => {
                let report = session.settle();
                if report.is_settled() {
                    prompt.say("\nNo transactions are required as all debts are already settled.")?;
                } else {
                    prompt.say("\nOptimized Transactions:")?;
                    for instruction in report.rounds() {
                        prompt.say(instruction.to_string())?;
                    }
                    prompt.say(format!("\n{report}"))?;
                }
            }
            "4" => match session.audit().entries() {
                Ok(lines) if lines.is_empty() => prompt.say("No transaction history found.")?,
                Ok(lines) => {
                    prompt.say("\nTransaction History with Timestamps:")?;
                    for line in lines {
                        prompt.say(line)?;
                    }
                }
                Err(e) => prompt.say(format!("Error: {e}"))?,
            },
            "5" => match session.undo() {
                Ok(()) => {
                    prompt.say("Undo successful. Current transactions:")?;
                    show_current(prompt, session)?;
                }
                Err(e) => prompt.say(format!("{e}."))?,
            },
            "6" => match session.redo() {
                Ok(()) => {
                    prompt.say("Redo successful. Current transactions:")?;
                    show_current(prompt, session)?;
                }
                Err(e) => prompt.say(format!("{e}."))?,
            },
            "7" => {
                session.clear_transactions();
                prompt.say("All transactions have been cleared.")?;
            }
            "8" => {
                prompt.say("\nCurrent Transactions:")?;
                show_current(prompt, session)?;
            }
            "9" => {
                let Some(person) = prompt.ask("Enter person's name: ")? else {
                    break;
                };
                show_person(prompt, session, &person)?;
            }
            "10" => {
                prompt.say("\nTransactions Sorted by Amount (Ascending):")?;
                for record in session.sorted_transactions() {
                    prompt.say(record.to_string())?;
                }
            }
            "11" => break,
            _ => prompt.say("Invalid choice. Please try again.")?,
        }
    }

    match session.save(data_file) {
        Ok(()) => prompt.say("\nProgram Ended! Data is successfully saved."),
        Err(e) => prompt.say(format!("Error: unable to save data: {e}")),
    }
}

fn add_entity<R: BufRead, W: Write, A: AuditSink>(
    prompt: &mut Prompt<R, W>,
    session: &mut Session<A>,
) -> io::Result<()> {
    let Some(name) = prompt.ask("Enter New Entity Name: ")? else {
        return Ok(());
    };
    match session.add_entity(&name) {
        Ok(_) => prompt.say(format!("Entity {name} added.")),
        Err(e) => prompt.say(format!("Error: {e}")),
    }
}

fn add_transaction<R: BufRead, W: Write, A: AuditSink>(
    prompt: &mut Prompt<R, W>,
    session: &mut Session<A>,
) -> io::Result<()> {
    let Some(debtor) = prompt.ask("Enter Debtor Name: ")? else {
        return Ok(());
    };
    let Some(creditor) = prompt.ask("Enter Creditor Name: ")? else {
        return Ok(());
    };
    let Some(raw) = prompt.ask("Enter Amount: ")? else {
        return Ok(());
    };
    let Ok(amount) = raw.parse::<Amount>() else {
        return prompt.say(format!("Error: '{raw}' is not a whole number."));
    };
    match session.record_debt(&debtor, &creditor, amount) {
        Ok(_) => prompt.say(format!(
            "Transaction added: {debtor} owes {amount} to {creditor}"
        )),
        Err(e) => prompt.say(format!("Error: {e}")),
    }
}

fn show_current<R: BufRead, W: Write, A: AuditSink>(
    prompt: &mut Prompt<R, W>,
    session: &Session<A>,
) -> io::Result<()> {
    if session.history().is_empty() {
        return prompt.say("No transactions found.");
    }
    for record in session.current_transactions() {
        prompt.say(record.to_string())?;
    }
    Ok(())
}

fn show_person<R: BufRead, W: Write, A: AuditSink>(
    prompt: &mut Prompt<R, W>,
    session: &Session<A>,
    person: &str,
) -> io::Result<()> {
    let pending = match session.pending_for(person) {
        Ok(pending) => pending,
        Err(_) => return prompt.say(format!("Person {person} not found in the transaction data.")),
    };
    if pending.is_empty() {
        return prompt.say(format!("No pending transactions found involving {person}."));
    }
    prompt.say(format!("\nPending Transactions involving {person}:"))?;
    for debt in &pending {
        prompt.say(session.describe(debt))?;
    }
    Ok(())
}
