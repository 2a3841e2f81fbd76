pub mod file;
pub mod http;

use crate::error::EnumberError;
use serde_json::Value;
use std::collections::BTreeMap;

/// Default location of the Open Food Facts additives taxonomy.
pub const DEFAULT_SOURCE_URL: &str =
    "https://static.openfoodfacts.org/data/taxonomies/additives.json";

/// Raw taxonomy payload: opaque key -> attribute bundle.
///
/// Bundles are kept as untyped JSON so that one malformed entry can be
/// skipped by the normalizer without rejecting the whole payload.
pub type RawTaxonomy = BTreeMap<String, Value>;

/// Trait for taxonomy retrieval backends.
pub trait TaxonomySource: Send + Sync {
    /// Retrieve the full taxonomy. Any failure here is fatal to the run.
    fn fetch(&self) -> Result<RawTaxonomy, EnumberError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Parse a taxonomy payload. The top level must be a JSON object.
pub fn parse_taxonomy(json: &str) -> Result<RawTaxonomy, EnumberError> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(EnumberError::SourceFormat(format!(
            "expected a JSON object at top level, found {}",
            json_kind(&other)
        ))),
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
