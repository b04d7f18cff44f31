//! Loading records for the `similar` and `duplicates` commands

use std::fs;
use std::io::Read;
use std::path::Path;

use casematch_core::document::{documents_from_json, Document};
use casematch_core::error::{CaseMatchError, Result};
use serde_json::Value;
use tracing::debug;

/// Read a JSON batch of records from `path`, or from stdin when `path` is `-`
pub fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CaseMatchError::io_operation("read", "stdin", e))?;
        buf
    } else {
        fs::read_to_string(path)
            .map_err(|e| CaseMatchError::io_operation("read", path.display(), e))?
    };

    let value: Value = serde_json::from_str(&content).map_err(|e| {
        CaseMatchError::invalid_input(format!("{} is not valid JSON: {}", path.display(), e))
    })?;
    let documents = documents_from_json(&value)?;

    debug!(path = %path.display(), documents = documents.len(), "load_documents");
    Ok(documents)
}
