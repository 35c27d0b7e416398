use super::NGram;
use std::collections::HashMap;

/// Occurrence counts for one n-gram order.
///
/// Iteration follows first-insertion order, which is what makes tie-breaking
/// in [`select_top_k`](super::select_top_k) reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderCounts {
    order: usize,
    keys: Vec<NGram>,
    counts: HashMap<NGram, u64>,
}

impl OrderCounts {
    pub fn new(order: usize) -> Self {
        Self {
            order,
            keys: Vec::new(),
            counts: HashMap::new(),
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn add(&mut self, ngram: NGram, amount: u64) {
        match self.counts.get_mut(&ngram) {
            Some(c) => *c += amount,
            None => {
                self.keys.push(ngram.clone());
                self.counts.insert(ngram, amount);
            }
        }
    }

    pub fn get(&self, ngram: &NGram) -> u64 {
        self.counts.get(ngram).copied().unwrap_or(0)
    }

    /// Number of distinct n-grams.
    pub fn distinct(&self) -> usize {
        self.keys.len()
    }

    /// Sum of all occurrence counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NGram, u64)> + '_ {
        self.keys.iter().map(move |k| (k, self.counts[k]))
    }
}

/// Counts every contiguous window of width `n` (stride 1).
/// Fewer than `n` tokens yields an empty result.
pub fn count_ngrams<S: AsRef<str>>(tokens: &[S], n: usize) -> OrderCounts {
    let mut counts = OrderCounts::new(n);
    if n == 0 || tokens.len() < n {
        return counts;
    }

    for window in tokens.windows(n) {
        counts.add(NGram::from_slice(window), 1);
    }
    counts
}

/// One [`OrderCounts`] per entry of `orders`, in the same order.
pub fn count_orders<S: AsRef<str>>(tokens: &[S], orders: &[usize]) -> Vec<OrderCounts> {
    orders.iter().map(|&n| count_ngrams(tokens, n)).collect()
}
