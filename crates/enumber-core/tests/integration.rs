//! Integration tests for the build_dataset() pipeline.
//!
//! Uses a MockSource that returns a pre-built taxonomy without touching the
//! network, and an in-memory store unless a test needs a file on disk.

use enumber_core::classify::enrich;
use enumber_core::error::EnumberError;
use enumber_core::model::{AdditiveRecord, RiskLevel};
use enumber_core::normalize::code::AdditiveCode;
use enumber_core::source::file::FileTaxonomySource;
use enumber_core::source::{parse_taxonomy, RawTaxonomy, TaxonomySource};
use enumber_core::store::schema::{META_DATA_SOURCES, META_REVISION, META_TOTAL};
use enumber_core::store::Repository;
use enumber_core::{build_dataset, BuildOptions};
use serde_json::{json, Value};

struct MockSource {
    payload: Value,
}

impl TaxonomySource for MockSource {
    fn fetch(&self) -> Result<RawTaxonomy, EnumberError> {
        parse_taxonomy(&self.payload.to_string())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct FailingSource;

impl TaxonomySource for FailingSource {
    fn fetch(&self) -> Result<RawTaxonomy, EnumberError> {
        Err(EnumberError::Fetch {
            url: "http://example.invalid/additives.json".into(),
            reason: "timed out after 30s".into(),
        })
    }

    fn backend_name(&self) -> &str {
        "failing"
    }
}

fn bundle(code: &str, name: &str, classes: &str) -> Value {
    json!({
        "e_number": {"en": code},
        "name": {"en": name},
        "additives_classes": {"en": classes},
    })
}

fn source_only() -> BuildOptions {
    BuildOptions {
        include_curated: false,
    }
}

fn sample_taxonomy() -> Value {
    json!({
        "en:e102": bundle("102", "Tartrazine", ""),
        "en:e999": bundle("999", "Test antioxidant", "en:natural antioxidant vitamin"),
        "en:e414": bundle("414", "Acacia gum", "en:thickener"),
        "en:e9999": bundle("9999", "L-ascorbic acid derivative", ""),
        "en:emulsifier": {"name": {"en": "Emulsifier"}},
        "fr:e330": bundle("330", "Acide citrique", ""),
        "en:e-broken": "not a bundle",
    })
}

// ---------------------------------------------------------------------------
// Classification through the full pipeline
// ---------------------------------------------------------------------------
#[test]
fn classification_scenarios_end_to_end() {
    let source = MockSource {
        payload: sample_taxonomy(),
    };
    let mut repo = Repository::open_in_memory().unwrap();
    let report = build_dataset(&source, &mut repo, &source_only()).unwrap();

    assert_eq!(report.source_entries, 7);
    assert_eq!(report.normalized, 4);
    assert_eq!(report.ignored_keys, 1);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.upsert.inserted, 4);
    assert!(report.upsert.failures.is_empty());

    let tartrazine = repo.get_by_external_id("en:e102").unwrap().unwrap();
    assert_eq!(tartrazine.risk_level, "RED");
    assert_eq!(tartrazine.risk_color, "red");

    let antioxidant = repo.get_by_external_id("en:e999").unwrap().unwrap();
    assert_eq!(antioxidant.risk_level, "GREEN");
    assert_eq!(antioxidant.risk_color, "green");

    let acacia = repo.get_by_external_id("en:e414").unwrap().unwrap();
    assert_eq!(acacia.risk_level, "ORANGE");
    assert_eq!(acacia.category, "Thickeners");

    let ascorbic = repo.get_by_external_id("en:e9999").unwrap().unwrap();
    assert_eq!(ascorbic.risk_level, "GREEN");
    assert!(ascorbic.description.unwrap().contains("citrus fruits"));
}

#[test]
fn every_stored_row_has_description_and_consistent_color() {
    let source = MockSource {
        payload: sample_taxonomy(),
    };
    let mut repo = Repository::open_in_memory().unwrap();
    build_dataset(&source, &mut repo, &BuildOptions::default()).unwrap();

    for level in RiskLevel::ALL {
        for row in repo.list_by_risk_level(level).unwrap() {
            assert_eq!(row.risk_color, level.color().as_str());
            assert!(!row.description.unwrap_or_default().is_empty());
        }
    }
}

// ---------------------------------------------------------------------------
// Same external id twice keeps one row with the later values
// ---------------------------------------------------------------------------
#[test]
fn rebuild_replaces_rows_by_external_id() {
    let mut repo = Repository::open_in_memory().unwrap();

    let first = MockSource {
        payload: json!({"en:e102": bundle("102", "Tartrazine", "en:colour")}),
    };
    build_dataset(&first, &mut repo, &source_only()).unwrap();

    let second = MockSource {
        payload: json!({"en:e102": bundle("E102", "Tartrazine (FD&C Yellow 5)", "en:colour")}),
    };
    let report = build_dataset(&second, &mut repo, &source_only()).unwrap();

    assert_eq!(report.upsert.total_rows, 1);
    assert_eq!(repo.row_count().unwrap(), 1);
    let row = repo.get_by_external_id("en:e102").unwrap().unwrap();
    assert_eq!(row.display_name, "Tartrazine (FD&C Yellow 5)");
    assert_eq!(repo.metadata().unwrap()[META_REVISION], "2");
}

// ---------------------------------------------------------------------------
// One failing record in a batch of three
// ---------------------------------------------------------------------------
#[test]
fn batch_with_one_bad_record_commits_the_rest() {
    let mut repo = Repository::open_in_memory().unwrap();
    let batch: Vec<_> = [("en:e100", "100"), ("", "101"), ("en:e300", "300")]
        .into_iter()
        .map(|(id, code)| {
            enrich(AdditiveRecord::new(id, AdditiveCode::parse(code).unwrap(), "Name"))
        })
        .collect();

    let outcome = repo.upsert_batch(&batch).unwrap();
    assert_eq!(outcome.inserted, 2);
    assert_eq!(outcome.error_count(), 1);
    assert_eq!(repo.metadata().unwrap()[META_TOTAL], "2");
}

#[test]
fn total_additives_matches_row_count() {
    let source = MockSource {
        payload: sample_taxonomy(),
    };
    let mut repo = Repository::open_in_memory().unwrap();
    let report = build_dataset(&source, &mut repo, &BuildOptions::default()).unwrap();

    let total = repo.row_count().unwrap();
    assert_eq!(report.upsert.total_rows, total);
    assert_eq!(repo.metadata().unwrap()[META_TOTAL], total.to_string());
    assert!(report.validation.is_clean(), "{:?}", report.validation.findings);
    assert_eq!(report.statistics.total, total);
}

#[test]
fn curated_entries_override_source_entries() {
    let source = MockSource {
        payload: json!({
            "en:e100": bundle("100", "Curcumin (source)", "en:colour"),
            "en:e102": bundle("102", "Tartrazine", "en:colour"),
        }),
    };
    let mut repo = Repository::open_in_memory().unwrap();
    let report = build_dataset(&source, &mut repo, &BuildOptions::default()).unwrap();

    assert_eq!(report.curated, 3);
    // E100 collides with the source entry, E101 and E300 are new.
    assert_eq!(repo.row_count().unwrap(), 4);

    let curcumin = repo.get_by_external_id("en:e100").unwrap().unwrap();
    assert_eq!(curcumin.display_name, "Curcumin");
    assert_eq!(curcumin.source_provenance, "curated");
    assert_eq!(curcumin.vegan.as_deref(), Some("yes"));
    assert_eq!(repo.metadata().unwrap()[META_DATA_SOURCES], "curated, source");
}

#[test]
fn rows_missing_from_a_later_run_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("additives.db");

    {
        let mut repo = Repository::open(&db).unwrap();
        let source = MockSource {
            payload: json!({
                "en:e102": bundle("102", "Tartrazine", "en:colour"),
                "en:e330": bundle("330", "Citric acid", "en:acidity regulator"),
            }),
        };
        build_dataset(&source, &mut repo, &source_only()).unwrap();
    }

    let mut repo = Repository::open(&db).unwrap();
    let source = MockSource {
        payload: json!({"en:e330": bundle("330", "Citric acid", "en:acidity regulator")}),
    };
    let report = build_dataset(&source, &mut repo, &source_only()).unwrap();

    assert_eq!(report.upsert.inserted, 1);
    assert_eq!(report.upsert.total_rows, 2);
    assert!(repo.get_by_external_id("en:e102").unwrap().is_some());
    assert_eq!(repo.metadata().unwrap()[META_TOTAL], "2");
}

#[test]
fn fetch_error_aborts_before_writing() {
    let mut repo = Repository::open_in_memory().unwrap();
    let err = build_dataset(&FailingSource, &mut repo, &BuildOptions::default()).unwrap_err();

    assert!(matches!(err, EnumberError::Fetch { .. }));
    assert_eq!(repo.row_count().unwrap(), 0);
    assert_eq!(repo.metadata().unwrap()[META_REVISION], "0");
}

#[test]
fn non_object_payload_is_fatal() {
    let source = MockSource {
        payload: json!(["en:e102"]),
    };
    let mut repo = Repository::open_in_memory().unwrap();
    let err = build_dataset(&source, &mut repo, &BuildOptions::default()).unwrap_err();
    assert!(matches!(err, EnumberError::SourceFormat(_)));
    assert_eq!(repo.row_count().unwrap(), 0);
}

#[test]
fn file_source_feeds_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openfoodfacts_raw_20240101.json");
    std::fs::write(&path, sample_taxonomy().to_string()).unwrap();

    let source = FileTaxonomySource::new(&path);
    let mut repo = Repository::open_in_memory().unwrap();
    let report = build_dataset(&source, &mut repo, &source_only()).unwrap();

    assert_eq!(report.upsert.inserted, 4);
    let found = repo.find_by_code(&"102".parse().unwrap()).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].code, "E102");
}
