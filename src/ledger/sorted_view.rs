use crate::core::transaction::TransactionRecord;

#[derive(Debug, Clone)]
struct Node {
    record: TransactionRecord,
    left: Option<usize>,
    right: Option<usize>,
}

/// Amount-ordered index over every transaction ever inserted.
///
/// An unbalanced binary search tree: smaller amounts go left, equal or
/// larger amounts go right, so records with the same amount come out in
/// insertion order. Inserting already-sorted amounts degenerates into a
/// linked list of depth N.
///
/// The view indexes insertion events, not the live ledger. Undoing or
/// clearing transactions in [`TransactionHistory`] does not remove them
/// here.
///
/// [`TransactionHistory`]: crate::ledger::history::TransactionHistory
#[derive(Debug, Clone, Default)]
pub struct SortedView {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl SortedView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: TransactionRecord) {
        let id = self.nodes.len();
        let amount = record.amount();
        self.nodes.push(Node {
            record,
            left: None,
            right: None,
        });

        let Some(mut at) = self.root else {
            self.root = Some(id);
            return;
        };
        loop {
            let node = &mut self.nodes[at];
            let slot = if amount < node.record.amount() {
                &mut node.left
            } else {
                &mut node.right
            };
            match *slot {
                Some(child) => at = child,
                None => {
                    *slot = Some(id);
                    return;
                }
            }
        }
    }

    /// Ascending traversal by amount.
    pub fn in_order(&self) -> InOrder<'_> {
        let mut iter = InOrder {
            view: self,
            stack: Vec::new(),
        };
        iter.push_left(self.root);
        iter
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(usize, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((at, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[at];
            pending.extend(node.left.map(|c| (c, depth + 1)));
            pending.extend(node.right.map(|c| (c, depth + 1)));
        }
        deepest
    }
}

/// In-order iterator over a [`SortedView`].
#[derive(Debug, Clone)]
pub struct InOrder<'a> {
    view: &'a SortedView,
    stack: Vec<usize>,
}

impl InOrder<'_> {
    fn push_left(&mut self, mut at: Option<usize>) {
        while let Some(id) = at {
            self.stack.push(id);
            at = self.view.nodes[id].left;
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a TransactionRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.view.nodes[id];
        self.push_left(node.right);
        Some(&node.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::EntityId;
    use crate::core::transaction::Amount;

    fn record(amount: Amount) -> TransactionRecord {
        TransactionRecord::new(EntityId::new(0), EntityId::new(1), amount).unwrap()
    }

    fn amounts(view: &SortedView) -> Vec<Amount> {
        view.in_order().map(|t| t.amount()).collect()
    }

    #[test]
    fn test_in_order_sorts() {
        let mut view = SortedView::new();
        for amount in [50, 10, 30] {
            view.insert(record(amount));
        }
        assert_eq!(amounts(&view), vec![10, 30, 50]);
        assert_eq!(view.len(), 3);
        assert_eq!(view.depth(), 3);
    }

    #[test]
    fn test_empty_view() {
        let view = SortedView::new();
        assert!(view.is_empty());
        assert_eq!(view.in_order().count(), 0);
        assert_eq!(view.depth(), 0);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut view = SortedView::new();
        let first = record(20);
        let second = record(20);
        view.insert(record(40));
        view.insert(first.clone());
        view.insert(record(5));
        view.insert(second.clone());

        let ids: Vec<_> = view
            .in_order()
            .filter(|t| t.amount() == 20)
            .map(|t| t.id())
            .collect();
        assert_eq!(ids, vec![first.id(), second.id()]);
        assert_eq!(amounts(&view), vec![5, 20, 20, 40]);
    }

    #[test]
    fn test_sorted_input_degenerates() {
        let mut view = SortedView::new();
        for amount in 1..=20 {
            view.insert(record(amount));
        }
        assert_eq!(view.depth(), 20);
        assert_eq!(amounts(&view), (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_balanced_input_is_shallow() {
        let mut view = SortedView::new();
        for amount in [40, 20, 60, 10, 30, 50, 70] {
            view.insert(record(amount));
        }
        assert_eq!(view.depth(), 3);
    }

    #[test]
    fn test_traversal_is_restartable() {
        let mut view = SortedView::new();
        view.insert(record(3));
        view.insert(record(1));
        assert_eq!(amounts(&view), amounts(&view));
    }
}
