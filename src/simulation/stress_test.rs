//! Random debt networks for stress testing and benchmarks.

use crate::core::error::LedgerError;
use crate::core::transaction::Amount;
use crate::session::Session;
use crate::store::audit::AuditSink;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Configuration for generating a random group of debts.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Number of entities in the group.
    pub entity_count: usize,
    /// Average number of debts recorded per entity.
    pub debts_per_entity: usize,
    /// Minimum debt amount (inclusive).
    pub min_amount: Amount,
    /// Maximum debt amount (inclusive).
    pub max_amount: Amount,
    /// Fixed seed for reproducible networks; random when `None`.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            entity_count: 10,
            debts_per_entity: 3,
            min_amount: 1,
            max_amount: 10_000,
            seed: None,
        }
    }
}

/// Build a session populated with random debts.
///
/// Entities are named `ENTITY-000`, `ENTITY-001`, ... Every debt goes
/// through [`Session::record_debt`], so history, sorted view and audit
/// sink are filled too.
///
/// Fails with [`LedgerError::AmountOverflow`] when the drawn amounts no
/// longer fit in the debt totals.
pub fn generate_random_session<A: AuditSink>(
    config: &NetworkConfig,
    audit: A,
) -> Result<Session<A>, LedgerError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(audit);

    let names: Vec<String> = (0..config.entity_count)
        .map(|i| format!("ENTITY-{:03}", i))
        .collect();
    for name in &names {
        session.add_entity(name)?;
    }
    if names.len() < 2 {
        return Ok(session);
    }

    let low = config.min_amount.max(1);
    let high = config.max_amount.max(low);
    for _ in 0..config.entity_count * config.debts_per_entity {
        let debtor = rng.gen_range(0..names.len());
        let mut creditor = rng.gen_range(0..names.len());
        while creditor == debtor {
            creditor = rng.gen_range(0..names.len());
        }
        let amount = rng.gen_range(low..=high);
        session.record_debt(&names[debtor], &names[creditor], amount)?;
    }

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::audit::MemoryAuditLog;

    #[test]
    fn test_random_session_generation() {
        let config = NetworkConfig {
            entity_count: 5,
            debts_per_entity: 3,
            seed: Some(7),
            ..Default::default()
        };

        let session = generate_random_session(&config, MemoryAuditLog::new()).unwrap();
        assert_eq!(session.registry().len(), 5);
        assert_eq!(session.history().len(), 15);
        assert_eq!(session.sorted_view().len(), 15);
        assert_eq!(session.net_balances().iter().sum::<Amount>(), 0);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let config = NetworkConfig {
            entity_count: 8,
            seed: Some(42),
            ..Default::default()
        };
        let a = generate_random_session(&config, MemoryAuditLog::new()).unwrap();
        let b = generate_random_session(&config, MemoryAuditLog::new()).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_random_session_settles() {
        let config = NetworkConfig {
            entity_count: 20,
            debts_per_entity: 5,
            ..Default::default()
        };

        let mut session = generate_random_session(&config, MemoryAuditLog::new()).unwrap();
        let report = session.settle();

        assert!(report.is_valid());
        assert!(report.net_total() <= report.gross_total());
        assert!(report.instructions().len() <= 19);
    }

    #[test]
    fn test_oversized_amounts_report_overflow() {
        let config = NetworkConfig {
            entity_count: 3,
            debts_per_entity: 2,
            min_amount: Amount::MAX / 2,
            max_amount: Amount::MAX,
            seed: Some(1),
        };
        let err = generate_random_session(&config, MemoryAuditLog::new()).unwrap_err();
        assert!(matches!(err, LedgerError::AmountOverflow(_)));
    }

    #[test]
    fn test_single_entity_has_no_debts() {
        let config = NetworkConfig {
            entity_count: 1,
            ..Default::default()
        };
        let session = generate_random_session(&config, MemoryAuditLog::new()).unwrap();
        assert!(session.history().is_empty());
    }
}
