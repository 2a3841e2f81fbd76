pub mod classify;
pub mod config;
pub mod curated;
pub mod describe;
pub mod error;
pub mod model;
pub mod normalize;
pub mod source;
pub mod store;

use chrono::Utc;
use error::EnumberError;
use normalize::SkippedEntry;
use serde::Serialize;
use source::TaxonomySource;
use store::{DatasetStatistics, Repository, UpsertOutcome, ValidationReport};
use tracing::{info, info_span};

/// Options for one pipeline run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Append the curated supplement set after the source records.
    pub include_curated: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            include_curated: true,
        }
    }
}

/// Everything a run produced, for the caller to print or inspect.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub run_id: String,
    pub backend: String,
    pub source_entries: usize,
    pub normalized: usize,
    pub curated: usize,
    pub ignored_keys: usize,
    pub skipped: Vec<SkippedEntry>,
    pub upsert: UpsertOutcome,
    pub validation: ValidationReport,
    pub statistics: DatasetStatistics,
}

/// Main API entry point: fetch, normalize, classify, store and validate.
///
/// A fetch failure aborts the run before anything is written. Per-record
/// problems are reported in the returned `BuildReport` instead.
pub fn build_dataset(
    source: &dyn TaxonomySource,
    repo: &mut Repository,
    options: &BuildOptions,
) -> Result<BuildReport, EnumberError> {
    let started = Utc::now();
    let run_id = started.format("%Y%m%dT%H%M%SZ").to_string();
    let span = info_span!("build_dataset", run_id = %run_id);
    let _guard = span.enter();

    info!(backend = source.backend_name(), "fetching taxonomy");
    let raw = source.fetch()?;
    let source_entries = raw.len();

    let normalized = normalize::normalize_taxonomy(&raw, started);
    let mut records = normalized.records;
    let from_source = records.len();

    let curated = if options.include_curated {
        let extra = curated::curated_records(started);
        let n = extra.len();
        records.extend(extra);
        n
    } else {
        0
    };

    let enriched = classify::enrich_all(records);
    info!(
        records = enriched.len(),
        curated, "classification complete"
    );

    let upsert = repo.upsert_batch(&enriched)?;
    let validation = repo.validate()?;
    let statistics = repo.statistics()?;

    info!(
        inserted = upsert.inserted,
        errors = upsert.error_count(),
        total = upsert.total_rows,
        findings = validation.findings.len(),
        "build complete"
    );

    Ok(BuildReport {
        run_id,
        backend: source.backend_name().to_string(),
        source_entries,
        normalized: from_source,
        curated,
        ignored_keys: normalized.ignored_keys,
        skipped: normalized.skipped,
        upsert,
        validation,
        statistics,
    })
}
