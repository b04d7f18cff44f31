//! Documents compared by the similarity engine
//!
//! A [`Document`] is an opaque id plus free text. Records arriving as loosely
//! typed JSON are coerced at this boundary; anything that cannot become a
//! document is rejected with [`CaseMatchError::InvalidInput`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bail_input;
use crate::error::{CaseMatchError, Result};

/// A free-text record with an opaque identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque identifier
    pub id: String,
    /// Free text compared against other documents
    #[serde(default)]
    pub text: String,
}

impl Document {
    /// Create a new document
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Document {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Coerce a JSON record into a document
    ///
    /// The record needs an `id` (string or number). Text comes from `text`
    /// when present, otherwise from `title` and `description` joined by a
    /// space. Missing or null text fields count as empty.
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => bail_input!("expected an object, got {}", json_kind(value)),
        };

        let id = match obj.get("id") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(_)) => bail_input!("record has an empty id"),
            Some(Value::Null) | None => bail_input!("record has no id"),
            Some(other) => bail_input!("record id must be a string or number, got {}", json_kind(other)),
        };

        let text = match obj.get("text") {
            Some(Value::Null) | None => {
                let title = text_field(obj.get("title"), "title", &id)?;
                let description = text_field(obj.get("description"), "description", &id)?;
                match (title.is_empty(), description.is_empty()) {
                    (false, false) => format!("{} {}", title, description),
                    (false, true) => title,
                    _ => description,
                }
            }
            field => text_field(field, "text", &id)?,
        };

        Ok(Document { id, text })
    }
}

/// Decode a batch of documents
///
/// Accepts a JSON array of records or an object with a `documents` array.
/// Fails on the first record that is not a document.
pub fn documents_from_json(value: &Value) -> Result<Vec<Document>> {
    let records = match value {
        Value::Array(records) => records,
        Value::Object(obj) => match obj.get("documents") {
            Some(Value::Array(records)) => records,
            _ => bail_input!("expected an array of records or a `documents` array"),
        },
        other => bail_input!("expected an array of records, got {}", json_kind(other)),
    };

    records
        .iter()
        .enumerate()
        .map(|(position, record)| {
            Document::from_json(record).map_err(|e| match e {
                CaseMatchError::InvalidInput { reason } => {
                    CaseMatchError::invalid_input(format!("record {}: {}", position, reason))
                }
                other => other,
            })
        })
        .collect()
}

fn text_field(value: Option<&Value>, field: &str, id: &str) -> Result<String> {
    match value {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Null) | None => Ok(String::new()),
        Some(other) => bail_input!(
            "field `{}` of record {} must be a string, got {}",
            field,
            id,
            json_kind(other)
        ),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
