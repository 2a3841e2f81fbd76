use enumber_core::config::PipelineConfig;
use enumber_core::error::EnumberError;
use enumber_core::source::file::FileTaxonomySource;
use enumber_core::source::http::HttpTaxonomySource;
use enumber_core::source::TaxonomySource;
use enumber_core::store::Repository;
use enumber_core::{build_dataset, BuildOptions};
use std::path::PathBuf;

use crate::logging;
use crate::output;

pub struct BuildRequest {
    pub db_path: PathBuf,
    pub config: Option<PathBuf>,
    pub source_url: Option<String>,
    pub source_file: Option<PathBuf>,
    pub timeout: Option<u64>,
    pub no_curated: bool,
    pub output: String,
}

pub fn run(req: BuildRequest) -> Result<(), EnumberError> {
    let config = match &req.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    let config = apply_overrides(config, &req);
    let options = BuildOptions {
        include_curated: config.include_curated,
    };

    let source: Box<dyn TaxonomySource> = match &req.source_file {
        Some(path) => Box::new(FileTaxonomySource::new(path)),
        None => {
            let mut http =
                HttpTaxonomySource::new(config.source_url.clone(), config.fetch_timeout());
            if let Some(dir) = &config.snapshot_dir {
                http = http.with_snapshot_dir(dir);
            }
            Box::new(http)
        }
    };

    let report = logging::with_run_logging(config.log_dir.as_deref(), || {
        let mut repo = Repository::open(&req.db_path)?;
        build_dataset(source.as_ref(), &mut repo, &options)
    })??;

    match req.output.as_str() {
        "json" => output::json::print(&report)?,
        _ => output::table::print_build(&report, &req.db_path),
    }

    Ok(())
}

/// Command-line values (including their environment fallbacks) win over the
/// config file.
fn apply_overrides(mut config: PipelineConfig, req: &BuildRequest) -> PipelineConfig {
    if let Some(url) = &req.source_url {
        config.source_url = url.clone();
    }
    if let Some(secs) = req.timeout {
        config.fetch_timeout_secs = secs;
    }
    if req.no_curated {
        config.include_curated = false;
    }
    config
}
