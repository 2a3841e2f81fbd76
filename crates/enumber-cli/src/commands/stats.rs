use enumber_core::error::EnumberError;
use enumber_core::store::Repository;
use std::path::Path;

use crate::output;

pub fn run(db_path: &Path, output_format: &str) -> Result<(), EnumberError> {
    let repo = open_existing(db_path)?;
    let stats = repo.statistics()?;
    let metadata = repo.metadata()?;

    match output_format {
        "json" => output::json::print(&serde_json::json!({
            "statistics": stats,
            "metadata": metadata,
        }))?,
        _ => output::table::print_stats(&stats, &metadata),
    }
    Ok(())
}

/// Open a store for reading without creating a new empty one.
pub fn open_existing(db_path: &Path) -> Result<Repository, EnumberError> {
    if !db_path.exists() {
        return Err(EnumberError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("database {} not found", db_path.display()),
        )));
    }
    Repository::open(db_path)
}
