//! Walking the transaction history backwards and forwards.
//!
//! Undo, redo and clear move through the recorded history without
//! touching the debt totals or the amount-sorted view.

use cashflow_minimizer::prelude::*;
use std::error::Error;

fn print_current(session: &Session<MemoryAuditLog>) {
    let current: Vec<String> = session
        .current_transactions()
        .map(|record| format!("{}->{} {}", record.debtor_name(), record.creditor_name(), record.amount()))
        .collect();
    if current.is_empty() {
        println!("  current: (none)");
    } else {
        println!("  current: {}", current.join(", "));
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("╔════════════════════════════════════════╗");
    println!("║  cashflow-minimizer: Undo / Redo Demo  ║");
    println!("╚════════════════════════════════════════╝\n");

    let mut session = Session::new(MemoryAuditLog::new());
    for name in ["A", "B", "C"] {
        session.add_entity(name)?;
    }

    session.record_debt("A", "B", 50)?;
    session.record_debt("B", "C", 10)?;
    session.record_debt("C", "A", 30)?;
    println!("Recorded three debts.");
    print_current(&session);

    println!("\nUndo twice:");
    session.undo()?;
    session.undo()?;
    print_current(&session);

    println!("\nRedo once:");
    session.redo()?;
    print_current(&session);

    println!("\nRecord a new debt (discards what was left to redo):");
    session.record_debt("A", "C", 5)?;
    print_current(&session);
    if let Err(e) = session.redo() {
        println!("  redo: {}", e);
    }

    println!("\nClear, then undo the clear:");
    session.clear_transactions();
    print_current(&session);
    session.undo()?;
    print_current(&session);

    println!("\nSorted view (every debt ever recorded):");
    for record in session.sorted_transactions() {
        println!("  {}", record.amount());
    }

    println!("\nNet balances are unaffected by history moves: {:?}", session.net_balances());

    Ok(())
}
