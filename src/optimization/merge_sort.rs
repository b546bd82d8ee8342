//! Stable top-down merge sort.
//!
//! Settlement output must keep generation order for equal amounts, and
//! must not degrade on adversarial input, so the engine sorts with this
//! instead of a pivot-based sort.

/// Sort `items` ascending by `key`, preserving the relative order of
/// elements whose keys compare equal.
///
/// # Examples
///
/// ```
/// use cashflow_minimizer::optimization::merge_sort::merge_sort_by_key;
///
/// let sorted = merge_sort_by_key(vec![(3, 'a'), (1, 'b'), (3, 'c'), (2, 'd')], |p| p.0);
/// assert_eq!(sorted, vec![(1, 'b'), (2, 'd'), (3, 'a'), (3, 'c')]);
/// ```
pub fn merge_sort_by_key<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    sort(items, &key)
}

fn sort<T, K, F>(mut items: Vec<T>, key: &F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    merge(sort(items, key), sort(right, key), key)
}

fn merge<T, K, F>(left: Vec<T>, right: Vec<T>, key: &F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        // Ties take from the left run: that is what keeps the sort stable.
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => key(l) <= key(r),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        merged.extend(if take_left { left.next() } else { right.next() });
    }
    merged
}
