//! # cashflow-minimizer
//!
//! Multi-party debt tracking with cash flow minimization.
//!
//! Given a group of entities and the debts recorded between them, this
//! crate computes a small set of payments that settles every outstanding
//! balance, and keeps a reversible history of the recorded debts.
//!
//! ## Architecture
//!
//! - **core**: Entities and their registry, transaction records, errors
//! - **graph**: The gross debt matrix and net balance computation
//! - **optimization**: Greedy settlement engine and stable merge sort
//! - **ledger**: Undo/redo transaction history and the amount-sorted view
//! - **session**: One user's working state tying the above together
//! - **store**: Snapshot persistence, audit log, credential file
//! - **interactive**: Menu-driven terminal front end
//! - **simulation**: Random debt networks for stress testing

pub mod config;
pub mod core;
pub mod graph;
pub mod interactive;
pub mod ledger;
pub mod optimization;
pub mod session;
pub mod simulation;
pub mod store;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::entity::{EntityId, EntityRegistry};
    pub use crate::core::error::LedgerError;
    pub use crate::core::transaction::{Amount, TransactionRecord};
    pub use crate::graph::debt_graph::DebtGraph;
    pub use crate::ledger::history::TransactionHistory;
    pub use crate::ledger::sorted_view::SortedView;
    pub use crate::optimization::settlement::{
        SettlementEngine, SettlementInstruction, SettlementReport,
    };
    pub use crate::session::Session;
    pub use crate::store::audit::{AuditSink, FileAuditLog, MemoryAuditLog};
}
