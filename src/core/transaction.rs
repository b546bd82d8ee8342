use crate::core::entity::EntityId;
use crate::core::error::LedgerError;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Monetary amounts are plain integers.
pub type Amount = i64;

/// A single recorded debt: `debtor` owes `creditor` a positive `amount`.
///
/// Records are immutable once created. The transaction history links them
/// into states and the sorted view indexes them by amount; neither ever
/// changes a record after [`TransactionRecord::new`] returns it.
///
/// # Examples
///
/// ```
/// use cashflow_minimizer::core::entity::EntityId;
/// use cashflow_minimizer::core::transaction::TransactionRecord;
///
/// let record = TransactionRecord::new(EntityId::new(0), EntityId::new(1), 250)
///     .unwrap()
///     .with_names("Alice", "Bob");
///
/// assert_eq!(record.amount(), 250);
/// assert_eq!(record.debtor_name(), "Alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    id: Uuid,
    debtor: EntityId,
    creditor: EntityId,
    debtor_name: String,
    creditor_name: String,
    amount: Amount,
    timestamp: DateTime<Utc>,
}

impl TransactionRecord {
    /// Create a record stamped with the current instant.
    pub fn new(debtor: EntityId, creditor: EntityId, amount: Amount) -> Result<Self, LedgerError> {
        Self::with_id(Uuid::new_v4(), debtor, creditor, amount)
    }

    /// Create a record with a specific ID (useful for testing / determinism).
    pub fn with_id(
        id: Uuid,
        debtor: EntityId,
        creditor: EntityId,
        amount: Amount,
    ) -> Result<Self, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        Ok(Self {
            id,
            debtor,
            creditor,
            debtor_name: debtor.to_string(),
            creditor_name: creditor.to_string(),
            amount,
            timestamp: Utc::now(),
        })
    }

    /// Attach display names for both counterparties.
    pub fn with_names(mut self, debtor: impl Into<String>, creditor: impl Into<String>) -> Self {
        self.debtor_name = debtor.into();
        self.creditor_name = creditor.into();
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn debtor(&self) -> EntityId {
        self.debtor
    }

    pub fn creditor(&self) -> EntityId {
        self.creditor
    }

    pub fn debtor_name(&self) -> &str {
        &self.debtor_name
    }

    pub fn creditor_name(&self) -> &str {
        &self.creditor_name
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} owes {} amount: {} at {}",
            self.debtor_name,
            self.creditor_name,
            self.amount,
            self.timestamp.with_timezone(&Local).format("%a %b %e %T %Y")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = TransactionRecord::new(EntityId::new(0), EntityId::new(1), 1000).unwrap();
        assert_eq!(record.debtor(), EntityId::new(0));
        assert_eq!(record.creditor(), EntityId::new(1));
        assert_eq!(record.amount(), 1000);
        assert_eq!(record.debtor_name(), "#0");
        assert!(record.timestamp() <= Utc::now());
    }

    #[test]
    fn test_zero_amount_rejected() {
        let err = TransactionRecord::new(EntityId::new(0), EntityId::new(1), 0).unwrap_err();
        assert_eq!(err, LedgerError::InvalidAmount(0));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = TransactionRecord::new(EntityId::new(0), EntityId::new(1), -100).unwrap_err();
        assert_eq!(err, LedgerError::InvalidAmount(-100));
    }

    #[test]
    fn test_display_uses_names() {
        let record = TransactionRecord::new(EntityId::new(0), EntityId::new(1), 75)
            .unwrap()
            .with_names("A", "B");
        assert!(record.to_string().starts_with("A owes B amount: 75 at "));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = TransactionRecord::new(EntityId::new(0), EntityId::new(1), 5).unwrap();
        let b = TransactionRecord::new(EntityId::new(0), EntityId::new(1), 5).unwrap();
        assert_ne!(a.id(), b.id());
    }
}
