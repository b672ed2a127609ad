//! Corpus ingestion: one logical document per `.txt` file.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::Document;

/// Only files with this extension are part of the corpus.
const CORPUS_EXT: &str = "txt";

/// Load every `.txt` file under `corpus_dir` as a [`Document`].
///
/// Paths are sorted so repeated runs over an unchanged corpus yield the same
/// document order. A missing or unreadable directory is an error; an existing
/// but empty directory yields an empty list. Files added or removed are only
/// picked up by the next call — there is no watching.
pub fn load_documents(corpus_dir: &Path) -> Result<Vec<Document>> {
    if !corpus_dir.is_dir() {
        return Err(Error::Ingestion(format!(
            "corpus directory {} does not exist",
            corpus_dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(corpus_dir) {
        let entry = entry.map_err(|e| {
            Error::Ingestion(format!("cannot walk {}: {e}", corpus_dir.display()))
        })?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|s| s.to_str()) == Some(CORPUS_EXT)
        {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();

    let mut documents = Vec::with_capacity(files.len());
    for path in &files {
        let text = read_file_content(path)?;
        let doc_id = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let modified = fs::metadata(path).ok().and_then(|m| m.modified().ok());
        documents.push(Document {
            doc_id,
            path: path.clone(),
            text,
            modified,
        });
    }
    tracing::debug!(count = documents.len(), dir = %corpus_dir.display(), "corpus loaded");
    Ok(documents)
}

fn read_file_content(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(_) => {
            // Not valid UTF-8 as-is; fall back to a lossy read.
            let bytes = fs::read(path)
                .map_err(|e| Error::Ingestion(format!("cannot read {}: {e}", path.display())))?;
            Ok(String::from_utf8_lossy(&bytes).to_string())
        }
    }
}
