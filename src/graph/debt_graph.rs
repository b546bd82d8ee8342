use crate::core::entity::EntityId;
use crate::core::error::LedgerError;
use crate::core::transaction::Amount;
use serde::Serialize;

/// Square matrix of gross obligations between registered entities.
///
/// `amount(i, j)` is the total entity `i` currently owes entity `j`.
/// Repeated debts between the same ordered pair accumulate; the matrix is
/// never netted in place. The diagonal is always zero.
///
/// The graph only grows through [`EntityRegistry::register`], which keeps
/// its dimension equal to the number of registered entities.
///
/// The gross total of all cells always fits in an [`Amount`]; since every
/// row and column total is bounded by it, so does every net balance.
///
/// [`EntityRegistry::register`]: crate::core::entity::EntityRegistry::register
///
/// # Examples
///
/// ```
/// use cashflow_minimizer::core::entity::EntityRegistry;
///
/// let mut registry = EntityRegistry::new();
/// let a = registry.register("A").unwrap();
/// let b = registry.register("B").unwrap();
///
/// registry.graph_mut().record_debt(a, b, 100).unwrap();
/// registry.graph_mut().record_debt(b, a, 60).unwrap();
///
/// assert_eq!(registry.graph().net_balances(), vec![-40, 40]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebtGraph {
    cells: Vec<Vec<Amount>>,
    gross: Amount,
}

/// One nonzero cell of the matrix, as seen from a particular entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingDebt {
    pub debtor: EntityId,
    pub creditor: EntityId,
    pub amount: Amount,
}

impl DebtGraph {
    /// Extend both dimensions by one zeroed row/column.
    pub(crate) fn push_entity(&mut self) {
        for row in &mut self.cells {
            row.push(0);
        }
        let n = self.cells.len() + 1;
        self.cells.push(vec![0; n]);
    }

    pub fn dimension(&self) -> usize {
        self.cells.len()
    }

    fn check(&self, id: EntityId) -> Result<usize, LedgerError> {
        if id.index() < self.cells.len() {
            Ok(id.index())
        } else {
            Err(LedgerError::UnknownIdentity(id))
        }
    }

    /// Add `amount` to what `debtor` owes `creditor`.
    pub fn record_debt(
        &mut self,
        debtor: EntityId,
        creditor: EntityId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let i = self.check(debtor)?;
        let j = self.check(creditor)?;
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        if i == j {
            return Err(LedgerError::SelfDebt(debtor.to_string()));
        }
        let gross = self
            .gross
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow(amount))?;
        self.cells[i][j] += amount;
        self.gross = gross;
        Ok(())
    }

    /// Gross amount `debtor` owes `creditor`; zero for unknown identities.
    pub fn amount(&self, debtor: EntityId, creditor: EntityId) -> Amount {
        self.cells
            .get(debtor.index())
            .and_then(|row| row.get(creditor.index()))
            .copied()
            .unwrap_or(0)
    }

    /// Net position of every entity: total owed to it minus total it owes.
    ///
    /// Positive = net creditor, negative = net debtor. The vector always
    /// sums to zero.
    pub fn net_balances(&self) -> Vec<Amount> {
        let n = self.cells.len();
        let mut net = vec![0; n];
        for (i, row) in self.cells.iter().enumerate() {
            for (j, &amount) in row.iter().enumerate() {
                net[j] += amount;
                net[i] -= amount;
            }
        }
        debug_assert_eq!(net.iter().sum::<Amount>(), 0);
        net
    }

    /// Sum of every gross obligation in the matrix.
    pub fn gross_total(&self) -> Amount {
        self.gross
    }

    /// Row-major view of the matrix.
    pub fn rows(&self) -> &[Vec<Amount>] {
        &self.cells
    }

    /// Every nonzero obligation where `id` is either side, scanning
    /// counterparties in identity order (outgoing before incoming).
    pub fn obligations_involving(&self, id: EntityId) -> Result<Vec<PendingDebt>, LedgerError> {
        let p = self.check(id)?;
        let mut pending = Vec::new();
        for other in 0..self.cells.len() {
            if self.cells[p][other] > 0 {
                pending.push(PendingDebt {
                    debtor: id,
                    creditor: EntityId::new(other),
                    amount: self.cells[p][other],
                });
            }
            if self.cells[other][p] > 0 {
                pending.push(PendingDebt {
                    debtor: EntityId::new(other),
                    creditor: id,
                    amount: self.cells[other][p],
                });
            }
        }
        Ok(pending)
    }
}
