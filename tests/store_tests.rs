mod common;

use common::read_lines;
use ngramforge::ngrams::{count_ngrams, select_top_k, TopNGrams};
use ngramforge::store::csv_io::parse_count;
use ngramforge::store::{CorpusStore, FrequencyKind, MergeOutcome};
use std::fs;
use std::str::FromStr;
use tempfile::tempdir;

fn top(text: &str, n: usize) -> TopNGrams {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    select_top_k(&count_ngrams(&tokens, n), 20)
}

#[test]
fn test_merge_two_documents() {
    let mut store = CorpusStore::in_memory();
    let outcome = store.merge("doc1", &[top("кот кот кот", 1)]);
    assert_eq!(outcome, MergeOutcome::Inserted { row: 0, new_columns: 1 });

    let outcome = store.merge("doc2", &[top("", 1)]);
    assert_eq!(outcome, MergeOutcome::Inserted { row: 1, new_columns: 0 });

    assert_eq!(store.documents(), &["doc1".to_string(), "doc2".to_string()]);
    assert_eq!(store.column("кот"), Some(vec![3, 0]));

    store.recompute_relative();
    assert_eq!(store.relative().column("кот"), Some(vec![1.0, 0.0]));
}

#[test]
fn test_duplicate_merge_is_noop() {
    let mut store = CorpusStore::in_memory();
    store.merge("a.txt", &[top("x y", 1)]);
    let before_cols = store.column_count();

    let outcome = store.merge("a.txt", &[top("z w v", 1)]);
    assert_eq!(outcome, MergeOutcome::Duplicate);
    assert_eq!(store.document_count(), 1);
    assert_eq!(store.column_count(), before_cols);
    assert_eq!(store.count("a.txt", "z"), 0);
}

#[test]
fn test_new_columns_backfill_zero() {
    let mut store = CorpusStore::in_memory();
    store.merge("d1", &[top("a b", 1)]);
    store.merge("d2", &[top("c c", 1)]);

    assert_eq!(store.column("a"), Some(vec![1, 0]));
    assert_eq!(store.column("c"), Some(vec![0, 2]));
    let keys: Vec<&str> = store.column_keys().collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[test]
fn test_multiple_orders_share_one_row() {
    let mut store = CorpusStore::in_memory();
    store.merge("d1", &[top("a b a b", 1), top("a b a b", 2)]);

    assert_eq!(store.count("d1", "a"), 2);
    assert_eq!(store.count("d1", "a b"), 2);
    assert_eq!(store.count("d1", "b a"), 1);
    assert_eq!(store.column_count(), 4);
}

#[test]
fn test_relative_columns_sum_to_one() {
    let mut store = CorpusStore::in_memory();
    store.merge("d1", &[top("a a a b", 1)]);
    store.merge("d2", &[top("a b b", 1)]);
    store.merge("d3", &[top("b", 1)]);
    store.recompute_relative();

    let rel = store.relative();
    for key in ["a", "b"] {
        let sum = rel.column_sum(key).unwrap();
        assert!((sum - 1.0).abs() < 1e-9, "column {} sums to {}", key, sum);
    }
    assert!((rel.value("d1", "a") - 0.75).abs() < 1e-12);
    assert_eq!(rel.value("d3", "a"), 0.0);
}

#[test]
fn test_zero_sum_column_stays_zero() {
    // A legacy table can carry a column nobody counted.
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("absolute_frequency.csv"),
        "texts,кот,пёс\na.txt,3,0\nb.txt,0,0\n",
    )
    .unwrap();

    let store = CorpusStore::open(dir.path()).unwrap();
    assert_eq!(store.relative().column("пёс"), Some(vec![0.0, 0.0]));
    assert_eq!(store.relative().column_sum("пёс"), Some(0.0));
    assert_eq!(store.relative().column("кот"), Some(vec![1.0, 0.0]));
}

#[test]
fn test_open_missing_table_starts_empty() {
    let dir = tempdir().unwrap();
    let store = CorpusStore::open(dir.path().join("frequencies")).unwrap();
    assert_eq!(store.document_count(), 0);
    assert_eq!(store.column_count(), 0);
}

#[test]
fn test_persist_writes_both_tables() {
    let dir = tempdir().unwrap();
    let freq = dir.path().join("frequencies");

    let mut store = CorpusStore::open(&freq).unwrap();
    store.merge("doc1", &[top("кот кот кот", 1)]);
    store.merge("doc2", &[top("", 1)]);
    store.recompute_relative();
    store.persist().unwrap();

    let abs = read_lines(&freq.join("absolute_frequency.csv"));
    assert_eq!(abs, vec!["texts,кот", "doc1,3", "doc2,0"]);

    let rel = read_lines(&freq.join("relative_frequency.csv"));
    assert_eq!(rel, vec!["texts,кот", "doc1,1", "doc2,0"]);
}

#[test]
fn test_persist_empty_store_writes_header_only() {
    let dir = tempdir().unwrap();
    let store = CorpusStore::open(dir.path()).unwrap();
    store.persist().unwrap();
    assert_eq!(read_lines(&dir.path().join("absolute_frequency.csv")), vec!["texts"]);
}

#[test]
fn test_reopen_round_trip_keeps_rows_and_columns() {
    let dir = tempdir().unwrap();
    {
        let mut store = CorpusStore::open(dir.path()).unwrap();
        store.merge("a.txt", &[top("x y x", 1), top("x y x", 2)]);
        store.recompute_relative();
        store.persist().unwrap();
    }

    let mut store = CorpusStore::open(dir.path()).unwrap();
    assert!(store.contains("a.txt"));
    assert_eq!(store.count("a.txt", "x"), 2);
    assert_eq!(store.count("a.txt", "y x"), 1);
    let keys: Vec<&str> = store.column_keys().collect();
    assert_eq!(keys, vec!["x", "y", "x y", "y x"]);

    assert_eq!(store.merge("a.txt", &[top("q", 1)]), MergeOutcome::Duplicate);
}

#[test]
fn test_reopen_keeps_whitespace_in_ids() {
    let dir = tempdir().unwrap();
    {
        let mut store = CorpusStore::open(dir.path()).unwrap();
        store.merge(" a.txt", &[top("кот", 1)]);
        store.merge("b.txt ", &[top("пёс", 1)]);
        store.recompute_relative();
        store.persist().unwrap();
    }

    let store = CorpusStore::open(dir.path()).unwrap();
    assert_eq!(store.documents(), &[" a.txt".to_string(), "b.txt ".to_string()]);
    assert!(store.contains(" a.txt"));
    assert!(!store.contains("a.txt"));
    assert_eq!(store.count("b.txt ", "пёс"), 1);
}

#[test]
fn test_open_reads_legacy_float_cells_and_duplicate_rows() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("absolute_frequency.csv"),
        "texts,кот,кот спит\na.txt,3.0,1.0\nb.txt,,2.0\na.txt,9.0,9.0\n",
    )
    .unwrap();

    let store = CorpusStore::open(dir.path()).unwrap();
    assert_eq!(store.document_count(), 2);
    assert_eq!(store.column("кот"), Some(vec![3, 0]));
    assert_eq!(store.column("кот спит"), Some(vec![1, 2]));
}

#[test]
fn test_open_rejects_wrong_key_column() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("absolute_frequency.csv"), "id,кот\na,1\n").unwrap();
    assert!(CorpusStore::open(dir.path()).is_err());
}

#[test]
fn test_open_rejects_garbage_cells() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("absolute_frequency.csv"), "texts,кот\na,lots\n").unwrap();
    let err = CorpusStore::open(dir.path()).unwrap_err();
    assert!(err.to_string().contains("кот"));
}

#[test]
fn test_parse_count_variants() {
    assert_eq!(parse_count("3"), Ok(3));
    assert_eq!(parse_count(" 3.0 "), Ok(3));
    assert_eq!(parse_count(""), Ok(0));
    assert!(parse_count("-1").is_err());
    assert!(parse_count("NaN").is_err());
}

#[test]
fn test_top_columns_by_order() {
    let mut store = CorpusStore::in_memory();
    store.merge("d1", &[top("a a b", 1), top("a a b", 2)]);
    store.merge("d2", &[top("b b b", 1)]);

    let all = store.top_columns(10, None);
    assert_eq!(all[0].key, "b");
    assert_eq!(all[0].total, 4);
    assert_eq!(all[0].documents, 2);
    assert!((all[0].share - 4.0 / 6.0).abs() < 1e-12);

    let bigrams = store.top_columns(10, Some(2));
    assert!(bigrams.iter().all(|t| t.order == 2));
    assert_eq!(bigrams.len(), 2);
    // "a a" and "a b" tie at 1, creation order wins
    assert_eq!(bigrams[0].key, "a a");
}

#[test]
fn test_frequency_kind_file_names() {
    assert_eq!(FrequencyKind::Absolute.file_name(), "absolute_frequency.csv");
    assert_eq!(
        FrequencyKind::from_str("relative_frequency").unwrap(),
        FrequencyKind::Relative
    );
}

#[test]
fn test_in_memory_persist_is_noop() {
    let mut store = CorpusStore::in_memory();
    store.merge("d", &[top("a", 1)]);
    assert!(store.persist().is_ok());
    assert!(store.dir().is_none());
}
