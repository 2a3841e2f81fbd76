pub mod code;

use crate::model::{AdditiveRecord, DietaryFlag, DietaryFlags, Evaluation, Provenance};
use crate::source::RawTaxonomy;
use chrono::{DateTime, Utc};
use code::AdditiveCode;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, info, warn};

/// Taxonomy keys that identify additives (e.g. "en:e102").
pub const ADDITIVE_KEY_PREFIX: &str = "en:e";

/// Only this locale is read from each bundle.
pub const LOCALE: &str = "en";

/// Why a taxonomy entry did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    MissingCode,
    InvalidCode(String),
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingCode => write!(f, "no e_number"),
            SkipReason::InvalidCode(code) => write!(f, "unusable e_number '{code}'"),
            SkipReason::Malformed(reason) => write!(f, "malformed bundle: {reason}"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedEntry {
    pub key: String,
    pub reason: SkipReason,
}

/// Normalizer output: usable records plus what was dropped and why.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizedTaxonomy {
    pub records: Vec<AdditiveRecord>,
    pub skipped: Vec<SkippedEntry>,
    /// Keys without the additive prefix (taxonomy roots, other locales).
    pub ignored_keys: usize,
}

/// Convert every additive entry of a raw taxonomy into an `AdditiveRecord`.
///
/// Entries that cannot be normalized are skipped and reported; they never
/// abort the batch.
pub fn normalize_taxonomy(raw: &RawTaxonomy, ingested_at: DateTime<Utc>) -> NormalizedTaxonomy {
    let mut out = NormalizedTaxonomy::default();

    for (key, value) in raw {
        if !key.starts_with(ADDITIVE_KEY_PREFIX) {
            out.ignored_keys += 1;
            continue;
        }

        match normalize_entry(key, value, ingested_at) {
            Ok(record) => out.records.push(record),
            Err(reason) => {
                match reason {
                    SkipReason::MissingCode => debug!(%key, "skipping entry without e_number"),
                    _ => warn!(%key, %reason, "skipping taxonomy entry"),
                }
                out.skipped.push(SkippedEntry {
                    key: key.clone(),
                    reason,
                });
            }
        }
    }

    info!(
        records = out.records.len(),
        skipped = out.skipped.len(),
        ignored = out.ignored_keys,
        "normalized taxonomy"
    );
    out
}

/// Normalize one bundle. `key` becomes the record's external id.
pub fn normalize_entry(
    key: &str,
    value: &Value,
    ingested_at: DateTime<Utc>,
) -> Result<AdditiveRecord, SkipReason> {
    let bundle = value
        .as_object()
        .ok_or_else(|| SkipReason::Malformed("entry is not an object".into()))?;

    let raw_code = localized(bundle, "e_number")?.ok_or(SkipReason::MissingCode)?;
    let code = AdditiveCode::parse(raw_code)
        .map_err(|_| SkipReason::InvalidCode(raw_code.to_string()))?;

    Ok(AdditiveRecord {
        external_id: key.to_string(),
        code,
        display_name: localized(bundle, "name")?.unwrap_or_default().to_string(),
        classes: normalize_classes(localized(bundle, "additives_classes")?.unwrap_or_default()),
        dietary: DietaryFlags {
            vegetarian: DietaryFlag::from_str_loose(
                localized(bundle, "vegetarian")?.unwrap_or_default(),
            ),
            vegan: DietaryFlag::from_str_loose(localized(bundle, "vegan")?.unwrap_or_default()),
        },
        evaluation: Evaluation {
            text: localized(bundle, "efsa_evaluation")?.map(str::to_string),
            url: localized(bundle, "efsa_evaluation_url")?.map(str::to_string),
            date: localized(bundle, "efsa_evaluation_date")?.map(str::to_string),
        },
        provenance: Provenance::Source,
        ingested_at,
    })
}

/// Read the `en` value of a locale-keyed field. Blank values count as absent.
fn localized<'a>(
    bundle: &'a Map<String, Value>,
    field: &str,
) -> Result<Option<&'a str>, SkipReason> {
    match bundle.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(locales)) => match locales.get(LOCALE) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                Ok((!trimmed.is_empty()).then_some(trimmed))
            }
            Some(_) => Err(SkipReason::Malformed(format!(
                "field '{field}' has a non-text '{LOCALE}' value"
            ))),
        },
        Some(_) => Err(SkipReason::Malformed(format!(
            "field '{field}' is not a locale map"
        ))),
    }
}

/// Lowercase class tags and drop taxonomy locale prefixes:
/// "en:Colour, en:stabiliser" -> "colour, stabiliser".
pub fn normalize_classes(raw: &str) -> String {
    raw.split(',')
        .map(|tag| {
            let tag = tag.trim();
            tag.strip_prefix("en:").unwrap_or(tag).to_lowercase()
        })
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
