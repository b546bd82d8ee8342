use crate::core::entity::{EntityId, EntityRegistry};
use crate::core::error::LedgerError;
use crate::core::transaction::{Amount, TransactionRecord};
use crate::graph::debt_graph::PendingDebt;
use crate::ledger::history::{TransactionHistory, Transactions};
use crate::ledger::sorted_view::{InOrder, SortedView};
use crate::optimization::settlement::{SettlementEngine, SettlementReport};
use crate::store::audit::AuditSink;
use crate::store::snapshot::Snapshot;
use crate::store::StoreError;
use log::{info, warn};
use std::path::Path;

/// One user's working state: entities, debts, history and the sorted view.
///
/// Recording a debt touches every component in one step: the debt matrix,
/// the history, the sorted view and the audit log. Undo, redo and clear
/// only move the history pointer. The matrix keeps every debt ever
/// recorded, and the sorted view keeps every record ever inserted.
///
/// Audit log failures never fail an operation; they are logged and the
/// session carries on.
///
/// # Examples
///
/// ```
/// use cashflow_minimizer::session::Session;
/// use cashflow_minimizer::store::audit::MemoryAuditLog;
///
/// let mut session = Session::new(MemoryAuditLog::new());
/// for name in ["A", "B", "C"] {
///     session.add_entity(name).unwrap();
/// }
/// session.record_debt("A", "B", 100).unwrap();
/// session.record_debt("B", "C", 100).unwrap();
/// session.record_debt("C", "A", 50).unwrap();
///
/// let report = session.settle();
/// assert_eq!(report.instructions().len(), 1);
/// assert_eq!(report.instructions()[0].to_string(), "A pays 50 to C");
/// ```
#[derive(Debug)]
pub struct Session<A> {
    registry: EntityRegistry,
    history: TransactionHistory,
    sorted: SortedView,
    audit: A,
}

impl<A: AuditSink> Session<A> {
    pub fn new(audit: A) -> Self {
        Self {
            registry: EntityRegistry::new(),
            history: TransactionHistory::new(),
            sorted: SortedView::new(),
            audit,
        }
    }

    /// Resume from persisted names and matrix. History starts empty.
    pub fn from_snapshot(snapshot: Snapshot, audit: A) -> Result<Self, LedgerError> {
        let registry = EntityRegistry::from_parts(snapshot.names, snapshot.matrix)?;
        Ok(Self {
            registry,
            history: TransactionHistory::new(),
            sorted: SortedView::new(),
            audit,
        })
    }

    pub fn add_entity(&mut self, name: &str) -> Result<EntityId, LedgerError> {
        self.registry.register(name)
    }

    /// Record that `debtor` owes `creditor` `amount`.
    ///
    /// Every check runs before anything is mutated.
    pub fn record_debt(
        &mut self,
        debtor: &str,
        creditor: &str,
        amount: Amount,
    ) -> Result<TransactionRecord, LedgerError> {
        let d = self.registry.lookup(debtor)?;
        let c = self.registry.lookup(creditor)?;
        if d == c {
            return Err(LedgerError::SelfDebt(debtor.to_string()));
        }
        let record = TransactionRecord::new(d, c, amount)?.with_names(debtor, creditor);

        self.registry.graph_mut().record_debt(d, c, amount)?;
        let record = self.history.push(record);
        self.sorted.insert(record.clone());
        info!("recorded debt: {debtor} owes {amount} to {creditor}");

        self.audit_line(&format!("{debtor} pays {amount} to {creditor}"));
        Ok(record)
    }

    /// Run the settlement engine over the current debt matrix.
    ///
    /// Each instruction is written to the audit log in the order its
    /// greedy round produced it.
    pub fn settle(&mut self) -> SettlementReport {
        let report = SettlementEngine::settle(self.registry.graph(), self.registry.names());
        info!(
            "settlement: {} payments, net {} of gross {}",
            report.instructions().len(),
            report.net_total(),
            report.gross_total()
        );
        for instruction in report.rounds() {
            self.audit_line(&instruction.to_string());
        }
        report
    }

    pub fn undo(&mut self) -> Result<(), LedgerError> {
        self.history.undo()
    }

    pub fn redo(&mut self) -> Result<(), LedgerError> {
        self.history.redo()
    }

    pub fn clear_transactions(&mut self) {
        self.history.clear();
        info!("cleared current transactions");
    }

    pub fn current_transactions(&self) -> Transactions<'_> {
        self.history.current_transactions()
    }

    /// Every transaction recorded this session, ascending by amount.
    pub fn sorted_transactions(&self) -> InOrder<'_> {
        self.sorted.in_order()
    }

    /// Outstanding gross debts involving `name`, in either direction.
    pub fn pending_for(&self, name: &str) -> Result<Vec<PendingDebt>, LedgerError> {
        let id = self.registry.lookup(name)?;
        self.registry.graph().obligations_involving(id)
    }

    /// `"<debtor> pays <amount> to <creditor>"` for a pending debt.
    pub fn describe(&self, debt: &PendingDebt) -> String {
        format!(
            "{} pays {} to {}",
            self.registry.name(debt.debtor).unwrap_or("?"),
            debt.amount,
            self.registry.name(debt.creditor).unwrap_or("?")
        )
    }

    pub fn net_balances(&self) -> Vec<Amount> {
        self.registry.graph().net_balances()
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn history(&self) -> &TransactionHistory {
        &self.history
    }

    pub fn sorted_view(&self) -> &SortedView {
        &self.sorted
    }

    pub fn audit(&self) -> &A {
        &self.audit
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_registry(&self.registry)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        self.snapshot().save(path)
    }

    fn audit_line(&mut self, line: &str) {
        if let Err(e) = self.audit.record(line) {
            warn!("audit log write failed: {e}");
        }
    }
}
