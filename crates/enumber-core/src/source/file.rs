use crate::error::EnumberError;
use crate::source::{parse_taxonomy, RawTaxonomy, TaxonomySource};
use std::path::PathBuf;
use tracing::info;

/// Taxonomy backend that reads a previously saved payload from disk.
pub struct FileTaxonomySource {
    path: PathBuf,
}

impl FileTaxonomySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileTaxonomySource { path: path.into() }
    }
}

impl TaxonomySource for FileTaxonomySource {
    fn fetch(&self) -> Result<RawTaxonomy, EnumberError> {
        let body = std::fs::read_to_string(&self.path).map_err(|e| EnumberError::Fetch {
            url: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        let taxonomy = parse_taxonomy(&body)?;
        info!(path = %self.path.display(), entries = taxonomy.len(), "loaded taxonomy file");
        Ok(taxonomy)
    }

    fn backend_name(&self) -> &str {
        "file"
    }
}
