use crate::model::{AdditiveRecord, DietaryFlag, DietaryFlags, Evaluation, Provenance};
use crate::normalize::code::AdditiveCode;
use chrono::{DateTime, Utc};

/// A hand-authored entry that must be present regardless of source coverage.
struct CuratedEntry {
    code: &'static str,
    name: &'static str,
    classes: &'static str,
    vegetarian: &'static str,
    vegan: &'static str,
    evaluation: &'static str,
}

const CURATED: &[CuratedEntry] = &[
    CuratedEntry {
        code: "E100",
        name: "Curcumin",
        classes: "natural colour",
        vegetarian: "yes",
        vegan: "yes",
        evaluation: "safe",
    },
    CuratedEntry {
        code: "E101",
        name: "Riboflavin",
        classes: "natural vitamin colour",
        vegetarian: "yes",
        vegan: "yes",
        evaluation: "safe vitamin",
    },
    CuratedEntry {
        code: "E300",
        name: "Ascorbic acid",
        classes: "natural antioxidant vitamin",
        vegetarian: "yes",
        vegan: "yes",
        evaluation: "safe vitamin",
    },
];

/// The curated supplement set.
///
/// External ids use the taxonomy's own key form (`en:e100`), so a curated
/// entry and the source entry for the same additive share one upsert key.
/// Callers append these after the source records so the curated values win.
pub fn curated_records(ingested_at: DateTime<Utc>) -> Vec<AdditiveRecord> {
    CURATED
        .iter()
        .filter_map(|entry| {
            let code = AdditiveCode::parse(entry.code).ok()?;
            Some(AdditiveRecord {
                external_id: code.taxonomy_key(),
                code,
                display_name: entry.name.to_string(),
                classes: entry.classes.to_string(),
                dietary: DietaryFlags {
                    vegetarian: DietaryFlag::from_str_loose(entry.vegetarian),
                    vegan: DietaryFlag::from_str_loose(entry.vegan),
                },
                evaluation: Evaluation {
                    text: Some(entry.evaluation.to_string()),
                    url: None,
                    date: None,
                },
                provenance: Provenance::Curated,
                ingested_at,
            })
        })
        .collect()
}
