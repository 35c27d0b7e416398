pub mod listing;
pub mod source;

use self::source::{DocumentRef, InputKind};
use crate::config::Config;
use crate::error::{NfResult, NgramForgeError};
use crate::ngrams::{count_orders, select_top_k, TopNGrams};
use crate::normalizer::{CommandNormalizer, IdentityNormalizer, Normalizer};
use crate::store::{CorpusStore, MergeOutcome};
use crate::tokenizer::{StopwordSet, Tokenizer};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Per-document result of tokenize -> count -> select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentProfile {
    pub id: String,
    pub token_count: usize,
    /// One entry per configured order, in configured order.
    pub selections: Vec<TopNGrams>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDocument {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub discovered: usize,
    pub processed: usize,
    pub new_columns: usize,
    pub skipped_duplicates: Vec<String>,
    pub failed: Vec<FailedDocument>,
    /// Documents whose listing directory was already written by another
    /// document in the same run.
    pub listing_collisions: Vec<String>,
}

pub struct Pipeline {
    orders: Vec<usize>,
    top_k: usize,
    input_kind: InputKind,
    jobs: usize,
    listing_dir: PathBuf,
    tokenizer: Tokenizer,
    normalizer: Box<dyn Normalizer>,
}

impl Pipeline {
    pub fn from_config(config: &Config) -> NfResult<Self> {
        config.validate()?;

        let mut stopwords = if config.stopwords.no_builtin_stopwords {
            StopwordSet::empty()
        } else {
            StopwordSet::builtin()
        };
        if let Some(path) = &config.stopwords.stopwords_file {
            stopwords = stopwords.union(StopwordSet::load_from_file(path)?);
        }

        let normalizer: Box<dyn Normalizer> = match &config.extraction.normalizer_cmd {
            Some(cmd) => {
                let n = CommandNormalizer::parse(cmd)?;
                info!("🔤 Normalizing text through '{}'", n.program());
                Box::new(n)
            }
            None => Box::new(IdentityNormalizer),
        };

        Ok(Self {
            orders: config.extraction.get_orders()?,
            top_k: config.extraction.top_k,
            input_kind: config.extraction.input_kind,
            jobs: config.extraction.jobs,
            listing_dir: config.output.listing_dir(),
            tokenizer: Tokenizer::new(stopwords),
            normalizer,
        })
    }

    pub fn with_normalizer<N: Normalizer + 'static>(mut self, normalizer: N) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    pub fn orders(&self) -> &[usize] {
        &self.orders
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn listing_dir(&self) -> &Path {
        &self.listing_dir
    }

    /// Normalize, tokenize, count every order and keep the top-K of each.
    pub fn profile(&self, id: &str, text: &str) -> NfResult<DocumentProfile> {
        let text = self.normalizer.normalize(text)?;
        let tokens = self.tokenizer.tokenize(&text);

        let selections = count_orders(&tokens, &self.orders)
            .iter()
            .map(|counts| select_top_k(counts, self.top_k))
            .collect();

        Ok(DocumentProfile {
            id: id.to_string(),
            token_count: tokens.len(),
            selections,
        })
    }

    pub fn analyze(&self, doc: &DocumentRef) -> NfResult<DocumentProfile> {
        let doc = doc.load()?;
        self.profile(&doc.id, &doc.text)
    }

    /// Processes every document under `input` that `store` has not seen.
    ///
    /// Analysis runs in parallel; listing, merge, recompute and persist run
    /// one document at a time in listing order. Per-document failures are
    /// collected in the summary, store failures abort the run.
    pub fn run(&self, input: &Path, store: &mut CorpusStore) -> NfResult<RunSummary> {
        let docs = source::discover(input, self.input_kind)?;
        info!("📚 Found {} documents in {}", docs.len(), input.display());

        let mut summary = RunSummary {
            discovered: docs.len(),
            ..RunSummary::default()
        };

        let mut pending = Vec::with_capacity(docs.len());
        for doc in docs {
            if store.contains(doc.id()) {
                warn!("⏭️  '{}' is already in the corpus table, skipping", doc.id());
                summary.skipped_duplicates.push(doc.id().to_string());
            } else {
                pending.push(doc);
            }
        }

        let start = Instant::now();
        let profiles = self.analyze_all(&pending)?;
        debug!("Analyzed {} documents in {:.2?}", pending.len(), start.elapsed());

        let mut listing_owners: HashMap<String, String> = HashMap::new();
        for (doc, result) in pending.iter().zip(profiles) {
            let profile = match result {
                Ok(p) => p,
                Err(e) => {
                    warn!("⚠️  Skipping '{}': {}", doc.id(), e);
                    summary.failed.push(FailedDocument {
                        id: doc.id().to_string(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if store.contains(&profile.id) {
                warn!("⏭️  '{}' appears twice in this input, skipping", profile.id);
                summary.skipped_duplicates.push(profile.id.clone());
                continue;
            }

            let dir_name = listing::listing_dir_name(&profile.id);
            if let Some(owner) = listing_owners.get(&dir_name) {
                warn!(
                    "⚠️  Listing '{}' of '{}' overwrites the one written for '{}'",
                    dir_name, profile.id, owner
                );
                summary.listing_collisions.push(profile.id.clone());
            }

            if let Err(e) = listing::write_listing(&self.listing_dir, &profile.id, &profile.selections)
            {
                warn!("⚠️  Could not write listing for '{}': {}", profile.id, e);
                summary.failed.push(FailedDocument {
                    id: profile.id.clone(),
                    reason: e.to_string(),
                });
                continue;
            }

            listing_owners.insert(dir_name, profile.id.clone());

            match store.merge(&profile.id, &profile.selections) {
                MergeOutcome::Inserted { new_columns, .. } => {
                    summary.processed += 1;
                    summary.new_columns += new_columns;
                }
                MergeOutcome::Duplicate => {
                    summary.skipped_duplicates.push(profile.id.clone());
                    continue;
                }
            }
            store.recompute_relative();
            store.persist()?;

            info!(
                "✅ {} ({} tokens, {} columns total)",
                profile.id,
                profile.token_count,
                store.column_count()
            );
        }

        Ok(summary)
    }

    fn analyze_all(&self, docs: &[DocumentRef]) -> NfResult<Vec<NfResult<DocumentProfile>>> {
        let work = || docs.par_iter().map(|d| self.analyze(d)).collect::<Vec<_>>();

        if self.jobs == 0 {
            return Ok(work());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| NgramForgeError::Config(format!("Thread pool: {}", e)))?;
        Ok(pool.install(work))
    }
}
