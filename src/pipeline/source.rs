use crate::error::{NfResult, NgramForgeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString};
use tracing::{debug, warn};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Directory when the path is a directory, table otherwise.
    #[default]
    Auto,
    /// Plain `.txt` files, one document each.
    Directory,
    /// CSV with a header row; the first column holds the text.
    Table,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub text: String,
}

/// A discovered document whose text has not necessarily been read yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentRef {
    File { id: String, path: PathBuf },
    Row { id: String, text: Option<String> },
}

impl DocumentRef {
    pub fn id(&self) -> &str {
        match self {
            DocumentRef::File { id, .. } | DocumentRef::Row { id, .. } => id,
        }
    }

    pub fn load(&self) -> NfResult<Document> {
        match self {
            DocumentRef::File { id, path } => {
                let bytes = fs::read(path)?;
                let text = String::from_utf8(bytes).map_err(|_| {
                    NgramForgeError::MalformedInput(format!("{} is not valid UTF-8", path.display()))
                })?;
                Ok(Document {
                    id: id.clone(),
                    text,
                })
            }
            DocumentRef::Row { id, text } => match text {
                Some(text) => Ok(Document {
                    id: id.clone(),
                    text: text.clone(),
                }),
                None => Err(NgramForgeError::MalformedInput(format!(
                    "row '{}' has no text",
                    id
                ))),
            },
        }
    }
}

/// Lists the documents under `input`. A missing path is fatal.
pub fn discover(input: &Path, kind: InputKind) -> NfResult<Vec<DocumentRef>> {
    if !input.exists() {
        return Err(NgramForgeError::InputNotFound(input.to_path_buf()));
    }

    let as_directory = match kind {
        InputKind::Auto => input.is_dir(),
        InputKind::Directory => true,
        InputKind::Table => false,
    };

    if as_directory {
        if !input.is_dir() {
            return Err(NgramForgeError::Config(format!(
                "{} is not a directory",
                input.display()
            )));
        }
        list_directory(input)
    } else {
        read_table(input)
    }
}

/// Regular `.txt` files directly under `dir`, sorted by file name.
pub fn list_directory(dir: &Path) -> NfResult<Vec<DocumentRef>> {
    let mut docs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let Some(name) = path.file_name() else {
            continue;
        };
        docs.push(DocumentRef::File {
            id: name.to_string_lossy().into_owned(),
            path,
        });
    }
    docs.sort_by(|a, b| a.id().cmp(b.id()));
    debug!("{} text files in {}", docs.len(), dir.display());
    Ok(docs)
}

/// One document per data row, id `<stem>_row_<index>`. Rows with a missing,
/// blank or undecodable first cell are kept with no text so the pipeline can
/// report and skip them.
pub fn read_table(path: &Path) -> NfResult<Vec<DocumentRef>> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "table".to_string());

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut docs = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let text = match result {
            Ok(rec) => rec
                .get(0)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                warn!("{}: row {} undecodable: {}", path.display(), idx, e);
                None
            }
            Err(e) => return Err(e.into()),
        };
        docs.push(DocumentRef::Row {
            id: format!("{}_row_{}", stem, idx),
            text,
        });
    }
    debug!("{} rows in {}", docs.len(), path.display());
    Ok(docs)
}
