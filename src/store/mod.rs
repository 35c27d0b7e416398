pub mod csv_io;
pub mod relative;

pub use self::relative::RelativeTable;

use crate::error::NfResult;
use crate::ngrams::{key_order, TopNGrams};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, info, warn};

/// Name of the document-id column in both corpus tables.
pub const KEY_COLUMN: &str = "texts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum FrequencyKind {
    #[strum(serialize = "absolute_frequency")]
    Absolute,
    #[strum(serialize = "relative_frequency")]
    Relative,
}

impl FrequencyKind {
    pub fn file_name(&self) -> String {
        format!("{}.csv", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted { row: usize, new_columns: usize },
    Duplicate,
}

/// One n-gram column: row index -> absolute count. Absent rows are 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct NGramColumn {
    pub(crate) key: String,
    pub(crate) cells: BTreeMap<usize, u64>,
}

impl NGramColumn {
    fn new(key: String) -> Self {
        Self {
            key,
            cells: BTreeMap::new(),
        }
    }

    pub(crate) fn sum(&self) -> u64 {
        self.cells.values().sum()
    }
}

/// Corpus-wide statistics for one recorded n-gram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnTotal {
    pub key: String,
    pub order: usize,
    pub total: u64,
    pub documents: usize,
    /// `total` over the summed totals of every column of the same order.
    pub share: f64,
}

/// Append-only absolute frequency table keyed by document id, plus the
/// relative table derived from it.
///
/// Stored sparsely: one map per n-gram column. The dense wide table only
/// exists on disk. Not safe for concurrent mutation, and separate processes
/// sharing one store directory can lose updates.
#[derive(Debug, Clone, Default)]
pub struct CorpusStore {
    dir: Option<PathBuf>,
    documents: Vec<String>,
    row_index: HashMap<String, usize>,
    columns: Vec<NGramColumn>,
    column_index: HashMap<String, usize>,
    relative: RelativeTable,
}

impl CorpusStore {
    /// A store that never touches the filesystem; `persist` is a no-op.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads `<dir>/absolute_frequency.csv`, or starts an empty table when
    /// the file does not exist yet.
    pub fn open<P: AsRef<Path>>(dir: P) -> NfResult<Self> {
        let dir = dir.as_ref();
        let mut store = Self {
            dir: Some(dir.to_path_buf()),
            ..Self::default()
        };

        let path = dir.join(FrequencyKind::Absolute.file_name());
        if !path.exists() {
            info!("📄 No corpus table at {}, starting empty", path.display());
            return Ok(store);
        }

        let raw = csv_io::read_absolute(&path)?;
        for key in raw.columns {
            store.push_column(key);
        }

        for (id, values) in raw.rows {
            if store.contains(&id) {
                warn!("Document '{}' appears twice in {}, keeping the first row", id, path.display());
                continue;
            }
            let row = store.push_document(&id);
            for (col, value) in values.into_iter().enumerate() {
                if value > 0 {
                    store.columns[col].cells.insert(row, value);
                }
            }
        }

        store.recompute_relative();
        info!(
            "📂 Loaded corpus table: {} documents, {} n-gram columns",
            store.document_count(),
            store.column_count()
        );
        Ok(store)
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn contains(&self, document_id: &str) -> bool {
        self.row_index.contains_key(document_id)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// N-gram column keys in creation order.
    pub fn column_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.key.as_str())
    }

    pub fn count(&self, document_id: &str, key: &str) -> u64 {
        match (self.row_index.get(document_id), self.column_index.get(key)) {
            (Some(row), Some(&col)) => self.columns[col].cells.get(row).copied().unwrap_or(0),
            _ => 0,
        }
    }

    /// Dense values of one column in row order, `None` for unknown keys.
    pub fn column(&self, key: &str) -> Option<Vec<u64>> {
        let col = &self.columns[*self.column_index.get(key)?];
        Some(
            (0..self.documents.len())
                .map(|row| col.cells.get(&row).copied().unwrap_or(0))
                .collect(),
        )
    }

    pub fn relative(&self) -> &RelativeTable {
        &self.relative
    }

    /// Records one document's top-K selections as a new row.
    ///
    /// A known `document_id` leaves the table untouched. New n-grams become
    /// new columns; every cell not written here reads as 0.
    pub fn merge(&mut self, document_id: &str, selections: &[TopNGrams]) -> MergeOutcome {
        if self.contains(document_id) {
            warn!("Document '{}' is already in the corpus table, skipping", document_id);
            return MergeOutcome::Duplicate;
        }

        let row = self.push_document(document_id);
        let mut new_columns = 0;

        for top in selections {
            for (key, count) in top.keyed() {
                if count == 0 {
                    continue;
                }
                let col = match self.column_index.get(&key) {
                    Some(&col) => col,
                    None => {
                        new_columns += 1;
                        self.push_column(key)
                    }
                };
                self.columns[col].cells.insert(row, count);
            }
        }

        debug!(
            "Merged '{}' as row {} ({} new columns)",
            document_id, row, new_columns
        );
        MergeOutcome::Inserted { row, new_columns }
    }

    /// Rebuilds the relative table from scratch. Zero-sum columns stay zero.
    pub fn recompute_relative(&mut self) {
        self.relative = RelativeTable::compute(&self.documents, &self.columns);
    }

    /// Rewrites both tables in full.
    pub fn persist(&self) -> NfResult<()> {
        let Some(dir) = &self.dir else {
            debug!("In-memory store, nothing to persist");
            return Ok(());
        };

        let keys: Vec<&str> = self.column_keys().collect();

        csv_io::write_table(
            dir.join(FrequencyKind::Absolute.file_name()),
            &keys,
            self.documents.iter().enumerate().map(|(row, id)| {
                let cells = self
                    .columns
                    .iter()
                    .map(|c| c.cells.get(&row).copied().unwrap_or(0).to_string());
                (id.as_str(), cells.collect())
            }),
        )?;

        csv_io::write_table(
            dir.join(FrequencyKind::Relative.file_name()),
            &keys,
            self.relative.dense_rows(),
        )?;

        debug!(
            "Persisted {} x {} tables to {}",
            self.documents.len(),
            self.columns.len(),
            dir.display()
        );
        Ok(())
    }

    /// Corpus-wide totals per column, in column order.
    pub fn column_totals(&self) -> Vec<ColumnTotal> {
        let mut per_order: HashMap<usize, u64> = HashMap::new();
        let mut totals: Vec<ColumnTotal> = self
            .columns
            .iter()
            .map(|c| {
                let order = key_order(&c.key);
                let total = c.sum();
                *per_order.entry(order).or_default() += total;
                ColumnTotal {
                    key: c.key.clone(),
                    order,
                    total,
                    documents: c.cells.values().filter(|&&v| v > 0).count(),
                    share: 0.0,
                }
            })
            .collect();

        for t in &mut totals {
            let denom = per_order.get(&t.order).copied().unwrap_or(0);
            if denom > 0 {
                t.share = t.total as f64 / denom as f64;
            }
        }
        totals
    }

    /// The `limit` highest-total columns, optionally restricted to one order.
    /// Ties keep column creation order.
    pub fn top_columns(&self, limit: usize, order: Option<usize>) -> Vec<ColumnTotal> {
        let mut totals: Vec<ColumnTotal> = self
            .column_totals()
            .into_iter()
            .filter(|t| order.map_or(true, |n| t.order == n))
            .collect();
        totals.sort_by(|a, b| b.total.cmp(&a.total));
        totals.truncate(limit);
        totals
    }

    fn push_document(&mut self, document_id: &str) -> usize {
        let row = self.documents.len();
        self.documents.push(document_id.to_string());
        self.row_index.insert(document_id.to_string(), row);
        row
    }

    fn push_column(&mut self, key: String) -> usize {
        let col = self.columns.len();
        self.column_index.insert(key.clone(), col);
        self.columns.push(NGramColumn::new(key));
        col
    }
}
