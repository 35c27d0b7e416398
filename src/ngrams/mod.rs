pub mod counter;
pub mod topk;

pub use self::counter::{count_ngrams, count_orders, OrderCounts};
pub use self::topk::{select_top_k, TopNGrams};

use std::fmt;

/// Ordered tuple of consecutive tokens. Equality and hashing are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NGram(Vec<String>);

impl NGram {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    pub fn from_slice<S: AsRef<str>>(tokens: &[S]) -> Self {
        Self(tokens.iter().map(|t| t.as_ref().to_string()).collect())
    }

    pub fn order(&self) -> usize {
        self.0.len()
    }

    /// Tokens joined by a single space; the column key used in the corpus tables.
    pub fn key(&self) -> String {
        self.0.join(" ")
    }
}

impl fmt::Display for NGram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Order of a serialized n-gram key, i.e. its number of space-separated tokens.
pub fn key_order(key: &str) -> usize {
    key.split(' ').filter(|t| !t.is_empty()).count()
}
