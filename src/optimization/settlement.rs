use crate::core::entity::EntityId;
use crate::core::transaction::Amount;
use crate::graph::debt_graph::DebtGraph;
use crate::optimization::merge_sort::merge_sort_by_key;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One proposed payment produced by a settlement run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementInstruction {
    pub debtor: EntityId,
    pub creditor: EntityId,
    pub debtor_name: String,
    pub creditor_name: String,
    /// `"<debtor> pays <creditor>"`.
    pub description: String,
    pub amount: Amount,
}

impl fmt::Display for SettlementInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pays {} to {}",
            self.debtor_name, self.amount, self.creditor_name
        )
    }
}

/// Outcome of settling a whole debt graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReport {
    /// Instructions in the order the greedy rounds produced them.
    rounds: Vec<SettlementInstruction>,
    /// The same instructions sorted ascending by amount.
    instructions: Vec<SettlementInstruction>,
    /// Sum of every gross obligation before settlement.
    gross_total: Amount,
    /// Sum of all positive net balances (= sum of |negative| balances).
    net_total: Amount,
    /// Number of entities considered.
    entity_count: usize,
}

impl SettlementReport {
    /// Instructions in generation order, one per greedy round.
    pub fn rounds(&self) -> &[SettlementInstruction] {
        &self.rounds
    }

    /// Instructions sorted ascending by amount.
    pub fn instructions(&self) -> &[SettlementInstruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<SettlementInstruction> {
        self.instructions
    }

    pub fn gross_total(&self) -> Amount {
        self.gross_total
    }

    pub fn net_total(&self) -> Amount {
        self.net_total
    }

    /// Total moved by the proposed payments.
    pub fn settled_total(&self) -> Amount {
        self.instructions.iter().map(|i| i.amount).sum()
    }

    /// Gross obligations that no longer need to move.
    pub fn savings(&self) -> Amount {
        self.gross_total - self.net_total
    }

    pub fn savings_percent(&self) -> f64 {
        if self.gross_total == 0 {
            return 0.0;
        }
        self.savings() as f64 * 100.0 / self.gross_total as f64
    }

    pub fn is_settled(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Payments cover the net exposure exactly and stay within N − 1.
    pub fn is_valid(&self) -> bool {
        self.settled_total() == self.net_total
            && self.instructions.len() <= self.entity_count.saturating_sub(1)
    }
}

impl fmt::Display for SettlementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Settlement Result ===")?;
        writeln!(f, "Gross Total:    {}", self.gross_total)?;
        writeln!(f, "Net Total:      {}", self.net_total)?;
        writeln!(f, "Savings:        {}", self.savings())?;
        writeln!(f, "Savings %:      {:.1}%", self.savings_percent())?;
        writeln!(f, "Payments:       {}", self.instructions.len())?;

        if self.instructions.is_empty() {
            writeln!(f, "\nNo transactions are required as all debts are already settled.")?;
        } else {
            writeln!(f, "\nSorted Optimized Transactions by Amount:")?;
            for instruction in &self.instructions {
                writeln!(f, "  {} amount: {}", instruction.description, instruction.amount)?;
            }
        }
        Ok(())
    }
}

/// Greedy cash flow minimizer.
///
/// Repeatedly matches the largest net creditor with the largest net debtor
/// and settles the smaller of the two magnitudes, zeroing at least one of
/// them per round. This yields at most `N − 1` payments. It is a heuristic:
/// it does not guarantee the fewest payments when partial sub-groups could
/// settle among themselves.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Compute settlement payments for a net balance vector.
    ///
    /// `names[i]` labels entity `i`. The returned list is ordered ascending
    /// by amount; equal amounts keep the order they were generated in.
    ///
    /// # Panics
    ///
    /// Panics if `net_balances` and `names` differ in length or if the
    /// balances do not sum to zero. Both indicate a corrupted debt graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use cashflow_minimizer::optimization::settlement::SettlementEngine;
    ///
    /// let names = vec!["A".to_string(), "B".to_string(), "C".to_string()];
    /// let instructions = SettlementEngine::minimize_cash_flow(&[-50, 0, 50], &names);
    ///
    /// assert_eq!(instructions.len(), 1);
    /// assert_eq!(instructions[0].to_string(), "A pays 50 to C");
    /// ```
    pub fn minimize_cash_flow(
        net_balances: &[Amount],
        names: &[String],
    ) -> Vec<SettlementInstruction> {
        let generated = Self::greedy_rounds(net_balances, names);
        merge_sort_by_key(generated, |instruction| instruction.amount)
    }

    /// The greedy rounds in the order they are generated, before sorting.
    ///
    /// # Panics
    ///
    /// Same conditions as [`SettlementEngine::minimize_cash_flow`].
    pub fn greedy_rounds(net_balances: &[Amount], names: &[String]) -> Vec<SettlementInstruction> {
        assert_eq!(
            net_balances.len(),
            names.len(),
            "net balance vector does not match entity count"
        );
        assert_eq!(
            net_balances.iter().sum::<Amount>(),
            0,
            "net balances must sum to zero"
        );

        let mut balances = net_balances.to_vec();
        let mut generated = Vec::new();

        while !balances.iter().all(|&b| b == 0) {
            let creditor = first_index_of(&balances, |candidate, best| candidate > best);
            let debtor = first_index_of(&balances, |candidate, best| candidate < best);
            let (max, min) = (balances[creditor], balances[debtor]);
            if max == 0 && min == 0 {
                break;
            }

            let settle = min.abs().min(max);
            balances[debtor] += settle;
            balances[creditor] -= settle;
            debug!(
                "round {}: {} pays {} to {} (balances {} / {})",
                generated.len(),
                names[debtor],
                settle,
                names[creditor],
                min,
                max
            );

            generated.push(SettlementInstruction {
                debtor: EntityId::new(debtor),
                creditor: EntityId::new(creditor),
                debtor_name: names[debtor].clone(),
                creditor_name: names[creditor].clone(),
                description: format!("{} pays {}", names[debtor], names[creditor]),
                amount: settle,
            });
        }

        generated
    }

    /// Settle every outstanding balance in `graph`.
    pub fn settle(graph: &DebtGraph, names: &[String]) -> SettlementReport {
        let net = graph.net_balances();
        let net_total: Amount = net.iter().filter(|&&b| b > 0).sum();
        let rounds = Self::greedy_rounds(&net, names);
        let instructions = merge_sort_by_key(rounds.clone(), |instruction| instruction.amount);

        SettlementReport {
            rounds,
            instructions,
            gross_total: graph.gross_total(),
            net_total,
            entity_count: names.len(),
        }
    }

    /// Apply instructions to a balance vector, returning what remains.
    /// A correct run leaves every balance at zero.
    pub fn apply(net_balances: &[Amount], instructions: &[SettlementInstruction]) -> Vec<Amount> {
        let mut balances = net_balances.to_vec();
        for instruction in instructions {
            balances[instruction.debtor.index()] += instruction.amount;
            balances[instruction.creditor.index()] -= instruction.amount;
        }
        balances
    }
}

/// First index whose value beats every earlier one (linear-scan tie-break).
fn first_index_of(values: &[Amount], beats: impl Fn(Amount, Amount) -> bool) -> usize {
    let mut best = 0;
    for (i, &value) in values.iter().enumerate().skip(1) {
        if beats(value, values[best]) {
            best = i;
        }
    }
    best
}
