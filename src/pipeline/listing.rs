use crate::error::NfResult;
use crate::ngrams::TopNGrams;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name for a document's listing: dots and path separators become `_`.
pub fn listing_dir_name(document_id: &str) -> String {
    document_id
        .chars()
        .map(|c| match c {
            '.' | '/' | '\\' => '_',
            c => c,
        })
        .collect()
}

/// Writes `<root>/<doc>/top_<n>.csv` (`n-gram,count`) for every order.
pub fn write_listing(root: &Path, document_id: &str, selections: &[TopNGrams]) -> NfResult<PathBuf> {
    let dir = root.join(listing_dir_name(document_id));
    fs::create_dir_all(&dir)?;

    for top in selections {
        let mut wtr = csv::Writer::from_path(dir.join(format!("top_{}.csv", top.order)))?;
        wtr.write_record(["n-gram", "count"])?;
        for (key, count) in top.keyed() {
            wtr.write_record([key.as_str(), count.to_string().as_str()])?;
        }
        wtr.flush()?;
    }

    Ok(dir)
}
