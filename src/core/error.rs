use crate::core::entity::EntityId;
use crate::core::transaction::Amount;
use thiserror::Error;

/// Conditions reported by the registry, debt graph and transaction history.
///
/// None of these are fatal to a session: the failing operation is aborted
/// and no state is mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("entity '{0}' already exists")]
    DuplicateEntity(String),
    #[error("entity '{0}' not found")]
    UnknownEntity(String),
    #[error("no entity with identity {0}")]
    UnknownIdentity(EntityId),
    #[error("invalid entity name {0:?}: names must be non-empty and contain no whitespace")]
    InvalidName(String),
    #[error("amount must be positive, got {0}")]
    InvalidAmount(Amount),
    #[error("entity '{0}' cannot owe itself")]
    SelfDebt(String),
    #[error("amount {0} would overflow the recorded debt totals")]
    AmountOverflow(Amount),
    #[error("no actions to undo")]
    NothingToUndo,
    #[error("no actions to redo")]
    NothingToRedo,
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl LedgerError {
    /// History navigation at a boundary is informational, not a failure.
    pub fn is_informational(&self) -> bool {
        matches!(self, LedgerError::NothingToUndo | LedgerError::NothingToRedo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LedgerError::DuplicateEntity("A".into()).to_string(),
            "entity 'A' already exists"
        );
        assert_eq!(
            LedgerError::InvalidAmount(-5).to_string(),
            "amount must be positive, got -5"
        );
        assert_eq!(LedgerError::NothingToUndo.to_string(), "no actions to undo");
    }

    #[test]
    fn test_informational() {
        assert!(LedgerError::NothingToUndo.is_informational());
        assert!(LedgerError::NothingToRedo.is_informational());
        assert!(!LedgerError::UnknownEntity("X".into()).is_informational());
    }
}
