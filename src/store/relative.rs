use super::NGramColumn;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
struct RelativeColumn {
    key: String,
    cells: BTreeMap<usize, f64>,
}

/// Absolute counts divided by their column sum. Same shape as the absolute
/// table; always rebuilt in full, never updated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelativeTable {
    documents: Vec<String>,
    row_index: HashMap<String, usize>,
    columns: Vec<RelativeColumn>,
    column_index: HashMap<String, usize>,
}

impl RelativeTable {
    pub(crate) fn compute(documents: &[String], columns: &[NGramColumn]) -> Self {
        let mut zero_sum = 0;
        let rel_columns: Vec<RelativeColumn> = columns
            .iter()
            .map(|col| {
                let sum = col.sum();
                let cells = if sum == 0 {
                    zero_sum += 1;
                    BTreeMap::new()
                } else {
                    col.cells
                        .iter()
                        .map(|(&row, &v)| (row, v as f64 / sum as f64))
                        .collect()
                };
                RelativeColumn {
                    key: col.key.clone(),
                    cells,
                }
            })
            .collect();

        if zero_sum > 0 {
            debug!("{} columns sum to zero, left as all-zero", zero_sum);
        }

        Self {
            documents: documents.to_vec(),
            row_index: documents
                .iter()
                .enumerate()
                .map(|(i, d)| (d.clone(), i))
                .collect(),
            column_index: rel_columns
                .iter()
                .enumerate()
                .map(|(i, c)| (c.key.clone(), i))
                .collect(),
            columns: rel_columns,
        }
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn value(&self, document_id: &str, key: &str) -> f64 {
        match (self.row_index.get(document_id), self.column_index.get(key)) {
            (Some(row), Some(&col)) => self.columns[col].cells.get(row).copied().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn column(&self, key: &str) -> Option<Vec<f64>> {
        let col = &self.columns[*self.column_index.get(key)?];
        Some(
            (0..self.documents.len())
                .map(|row| col.cells.get(&row).copied().unwrap_or(0.0))
                .collect(),
        )
    }

    pub fn column_sum(&self, key: &str) -> Option<f64> {
        let col = &self.columns[*self.column_index.get(key)?];
        Some(col.cells.values().sum())
    }

    pub fn column_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.key.as_str())
    }

    /// Rows as `(document_id, rendered cells)` for writing.
    pub(crate) fn dense_rows(&self) -> impl Iterator<Item = (&str, Vec<String>)> + '_ {
        self.documents.iter().enumerate().map(move |(row, id)| {
            let cells = self
                .columns
                .iter()
                .map(|c| c.cells.get(&row).copied().unwrap_or(0.0).to_string())
                .collect();
            (id.as_str(), cells)
        })
    }
}
