use super::KEY_COLUMN;
use crate::error::{NfResult, NgramForgeError};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::warn;

/// Absolute table as read from disk: column keys plus one dense row per document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<(String, Vec<u64>)>,
}

pub fn read_absolute<P: AsRef<Path>>(path: P) -> NfResult<RawTable> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Ok(RawTable::default());
    }
    if &headers[0] != KEY_COLUMN {
        return Err(NgramForgeError::Validation(format!(
            "{}: first column must be '{}', found '{}'",
            path.display(),
            KEY_COLUMN,
            &headers[0]
        )));
    }

    let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
    let mut seen = HashSet::new();
    for key in &columns {
        if !seen.insert(key.as_str()) {
            return Err(NgramForgeError::Validation(format!(
                "{}: duplicate column '{}'",
                path.display(),
                key
            )));
        }
    }

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let rec = result?;
        let id = rec.get(0).unwrap_or("");
        if id.is_empty() {
            warn!("{}: row {} has no document id, ignored", path.display(), idx + 1);
            continue;
        }

        let mut values = vec![0u64; columns.len()];
        for (col, cell) in rec.iter().skip(1).take(columns.len()).enumerate() {
            values[col] = parse_count(cell).map_err(|e| {
                NgramForgeError::Validation(format!(
                    "{}: row {}, column '{}': {}",
                    path.display(),
                    idx + 1,
                    columns[col],
                    e
                ))
            })?;
        }
        rows.push((id.to_string(), values));
    }

    Ok(RawTable { columns, rows })
}

/// Accepts integers and the float cells (`3.0`) older tables were written with.
pub fn parse_count(cell: &str) -> Result<u64, String> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(0);
    }
    if let Ok(v) = cell.parse::<u64>() {
        return Ok(v);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v.round() as u64),
        _ => Err(format!("'{}' is not a count", cell)),
    }
}

/// Writes `texts,<keys...>` followed by one line per row, replacing `path`
/// atomically.
pub fn write_table<'a, P, I>(path: P, keys: &[&str], rows: I) -> NfResult<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (&'a str, Vec<String>)>,
{
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let tmp = NamedTempFile::new_in(parent)?;
    {
        let mut wtr = csv::Writer::from_writer(&tmp);

        let mut header = Vec::with_capacity(keys.len() + 1);
        header.push(KEY_COLUMN);
        header.extend_from_slice(keys);
        wtr.write_record(&header)?;

        for (id, cells) in rows {
            wtr.write_field(id)?;
            for cell in &cells {
                wtr.write_field(cell)?;
            }
            wtr.write_record(None::<&[u8]>)?;
        }
        wtr.flush()?;
    }

    tmp.persist(path)?;
    Ok(())
}
