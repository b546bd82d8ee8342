use crate::core::entity::EntityId;
use crate::core::error::LedgerError;
use crate::core::transaction::{Amount, TransactionRecord};
use log::{debug, warn};

/// Index of a state inside the history arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StateId(usize);

/// One immutable point in the history: a record plus the state before it.
#[derive(Debug, Clone)]
struct LedgerState {
    record: TransactionRecord,
    previous: Option<StateId>,
}

/// Reversible, append-only history of recorded transactions.
///
/// States live in an arena and are never mutated or freed during a session;
/// `current` points at the newest state that is "live" (`None` is the empty
/// origin). Every step that moves `current` (append, clear, undo, redo)
/// remembers the pointer it replaced, so navigation is exact:
///
/// - append / clear push the old pointer on the undo stack and drop the
///   redo stack;
/// - undo pushes the current pointer on the redo stack and pops the undo
///   stack;
/// - redo does the inverse.
///
/// # Examples
///
/// ```
/// use cashflow_minimizer::core::entity::EntityId;
/// use cashflow_minimizer::ledger::history::TransactionHistory;
///
/// let mut history = TransactionHistory::new();
/// history.append(EntityId::new(0), EntityId::new(1), 100).unwrap();
/// history.append(EntityId::new(1), EntityId::new(0), 40).unwrap();
///
/// history.undo().unwrap();
/// let amounts: Vec<_> = history.current_transactions().map(|t| t.amount()).collect();
/// assert_eq!(amounts, vec![100]);
///
/// history.redo().unwrap();
/// let amounts: Vec<_> = history.current_transactions().map(|t| t.amount()).collect();
/// assert_eq!(amounts, vec![40, 100]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionHistory {
    states: Vec<LedgerState>,
    current: Option<StateId>,
    undo_stack: Vec<Option<StateId>>,
    redo_stack: Vec<Option<StateId>>,
}

impl TransactionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new debt stamped with the current instant.
    pub fn append(
        &mut self,
        debtor: EntityId,
        creditor: EntityId,
        amount: Amount,
    ) -> Result<TransactionRecord, LedgerError> {
        let record = TransactionRecord::new(debtor, creditor, amount)?;
        Ok(self.push(record))
    }

    /// Link an already-built record as the new current state.
    ///
    /// Returns a copy so callers can index it independently.
    pub fn push(&mut self, record: TransactionRecord) -> TransactionRecord {
        self.undo_stack.push(self.current);
        self.redo_stack.clear();

        let id = StateId(self.states.len());
        self.states.push(LedgerState {
            record: record.clone(),
            previous: self.current,
        });
        self.current = Some(id);
        debug!("history: appended state {} ({})", id.0, record.amount());
        record
    }

    pub fn undo(&mut self) -> Result<(), LedgerError> {
        let Some(previous) = self.undo_stack.pop() else {
            warn!("history: nothing to undo");
            return Err(LedgerError::NothingToUndo);
        };
        self.redo_stack.push(self.current);
        self.current = previous;
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), LedgerError> {
        let Some(next) = self.redo_stack.pop() else {
            warn!("history: nothing to redo");
            return Err(LedgerError::NothingToRedo);
        };
        self.undo_stack.push(self.current);
        self.current = next;
        Ok(())
    }

    /// Drop every current transaction. Undoable like any other step.
    pub fn clear(&mut self) {
        self.undo_stack.push(self.current);
        self.redo_stack.clear();
        self.current = None;
    }

    /// Walk the current chain, most recent first.
    pub fn current_transactions(&self) -> Transactions<'_> {
        Transactions {
            history: self,
            next: self.current,
        }
    }

    pub fn latest(&self) -> Option<&TransactionRecord> {
        self.current.map(|id| &self.states[id.0].record)
    }

    /// Number of current transactions.
    pub fn len(&self) -> usize {
        self.current_transactions().count()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

/// Iterator over the current chain of a [`TransactionHistory`].
#[derive(Debug, Clone)]
pub struct Transactions<'a> {
    history: &'a TransactionHistory,
    next: Option<StateId>,
}

impl<'a> Iterator for Transactions<'a> {
    type Item = &'a TransactionRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let state = &self.history.states[self.next?.0];
        self.next = state.previous;
        Some(&state.record)
    }
}
