//! Settling a shared trip between five friends.
//!
//! Records who fronted which costs, then prints the net position of each
//! person and the short list of payments that clears everything.

use cashflow_minimizer::prelude::*;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("╔═════════════════════════════════════════════╗");
    println!("║  cashflow-minimizer: Group Settlement Demo  ║");
    println!("╚═════════════════════════════════════════════╝\n");

    let mut session = Session::new(MemoryAuditLog::new());
    for name in ["Asha", "Ben", "Chen", "Dara", "Eli"] {
        session.add_entity(name)?;
    }

    let debts = [
        ("Ben", "Asha", 120),
        ("Chen", "Asha", 120),
        ("Dara", "Asha", 120),
        ("Asha", "Chen", 45),
        ("Eli", "Chen", 45),
        ("Dara", "Eli", 80),
        ("Ben", "Dara", 30),
        ("Eli", "Ben", 60),
    ];

    println!("━━━ Recorded debts ━━━\n");
    for (debtor, creditor, amount) in debts {
        let record = session.record_debt(debtor, creditor, amount)?;
        println!("  {}", record);
    }

    println!("\n━━━ Net positions ━━━\n");
    for (name, net) in session
        .registry()
        .names()
        .iter()
        .zip(session.net_balances())
    {
        let status = match net {
            n if n > 0 => "receives",
            n if n < 0 => "pays",
            _ => "settled",
        };
        println!("  {:<6} {:>6}  ({})", name, net, status);
    }

    let report = session.settle();
    println!("\n{}", report);

    let remaining = SettlementEngine::apply(&session.net_balances(), report.instructions());
    println!(
        "After paying: every balance is zero? {}",
        remaining.iter().all(|&b| b == 0)
    );
    println!("Audit lines written: {}", session.audit().lines().len());

    Ok(())
}
