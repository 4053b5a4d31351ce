//! Records loaded from `data.json` and `maps.json`.
//!
//! Both English keys and the Portuguese keys used by the site datasets are
//! accepted. Fields are never validated: a missing, `null` or non-string
//! value becomes an empty string (numbers and booleans keep their JSON text).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::CatalogError;
use crate::OTHERS;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRecord {
    #[serde(default, alias = "nome", deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, alias = "significado", deserialize_with = "lenient_string")]
    pub meaning: String,
    #[serde(default, alias = "referencia", deserialize_with = "lenient_string")]
    pub reference: String,
    #[serde(default, alias = "descricao", deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, alias = "categoria", deserialize_with = "lenient_string")]
    pub category: String,
}

impl FactRecord {
    pub fn new(name: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            ..Self::default()
        }
    }

    /// Category key used for counting and filtering: lower-cased, `others`
    /// when the record carries none.
    pub fn category_key(&self) -> String {
        let raw = self.category.trim();
        if raw.is_empty() {
            OTHERS.to_string()
        } else {
            raw.to_lowercase()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRecord {
    #[serde(default, alias = "titulo", deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, alias = "arquivo", deserialize_with = "lenient_string")]
    pub file: String,
}

impl MapRecord {
    pub fn new(title: &str, file: &str) -> Self {
        Self {
            title: title.to_string(),
            file: file.to_string(),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}

/// Parses the facts resource. The body must be a JSON array of objects.
pub fn parse_facts(resource: &str, body: &str) -> Result<Vec<FactRecord>, CatalogError> {
    let facts: Vec<FactRecord> =
        serde_json::from_str(body).map_err(|source| CatalogError::Parse {
            resource: resource.to_string(),
            source,
        })?;
    debug!(resource, count = facts.len(), "parsed facts");
    Ok(facts)
}

/// Parses the maps resource. Anything other than an array means "no maps".
pub fn parse_maps(resource: &str, body: &str) -> Result<Vec<MapRecord>, CatalogError> {
    let parse_error = |source| CatalogError::Parse {
        resource: resource.to_string(),
        source,
    };

    let value: Value = serde_json::from_str(body).map_err(parse_error)?;
    if !value.is_array() {
        debug!(resource, "maps resource is not an array, treating as empty");
        return Ok(Vec::new());
    }

    let maps: Vec<MapRecord> = serde_json::from_value(value).map_err(parse_error)?;
    debug!(resource, count = maps.len(), "parsed maps");
    Ok(maps)
}
