#![allow(dead_code)]

use ngramforge::config::Config;
use std::fs;
use std::path::{Path, PathBuf};

/// Config with no stopwords, the given orders and output under `out`.
pub fn test_config(out: &Path, orders: &str, top_k: usize) -> Config {
    let mut config = Config::default();
    config.extraction.orders = orders.to_string();
    config.extraction.top_k = top_k;
    config.stopwords.no_builtin_stopwords = true;
    config.output.output_dir = out.to_path_buf();
    config
}

/// Writes `(file name, text)` pairs into `dir`, creating it if needed.
pub fn write_docs(dir: &Path, docs: &[(&str, &str)]) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    for (name, text) in docs {
        fs::write(dir.join(name), text).unwrap();
    }
    dir.to_path_buf()
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
