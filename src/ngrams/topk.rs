use super::{NGram, OrderCounts};

/// The highest-count n-grams of one order, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopNGrams {
    pub order: usize,
    pub entries: Vec<(NGram, u64)>,
}

impl TopNGrams {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `(key, count)` pairs with the n-gram rendered as space-joined tokens.
    pub fn keyed(&self) -> impl Iterator<Item = (String, u64)> + '_ {
        self.entries.iter().map(|(g, c)| (g.key(), *c))
    }
}

/// Keeps the `k` most frequent entries. Equal counts keep first-occurrence
/// order (`sort_by` is stable).
pub fn select_top_k(counts: &OrderCounts, k: usize) -> TopNGrams {
    let mut entries: Vec<(NGram, u64)> = counts.iter().map(|(g, c)| (g.clone(), c)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(k);

    TopNGrams {
        order: counts.order(),
        entries,
    }
}
