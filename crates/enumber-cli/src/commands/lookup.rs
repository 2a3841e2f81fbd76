use enumber_core::error::EnumberError;
use enumber_core::model::{Category, RiskLevel};
use enumber_core::normalize::code::AdditiveCode;
use enumber_core::store::{Repository, StoredAdditive};
use std::path::Path;

use super::stats::open_existing;
use crate::output;

/// What to look up. Exactly one is given.
#[derive(clap::Args, Debug, Default)]
#[group(required = true, multiple = false)]
pub struct LookupTarget {
    /// Additive code, or a name fragment when it is not a code
    pub query: Option<String>,

    /// List additives with this risk level (green, yellow, orange, red)
    #[arg(long, value_name = "LEVEL")]
    pub risk: Option<String>,

    /// List additives in this category, e.g. "Food Colors"
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// List vegetarian-friendly additives
    #[arg(long)]
    pub vegetarian: bool,

    /// List vegan-friendly additives
    #[arg(long)]
    pub vegan: bool,
}

impl LookupTarget {
    fn label(&self) -> String {
        if let Some(query) = &self.query {
            query.clone()
        } else if let Some(risk) = &self.risk {
            format!("risk {risk}")
        } else if let Some(category) = &self.category {
            format!("category {category}")
        } else if self.vegetarian {
            "vegetarian".into()
        } else {
            "vegan".into()
        }
    }
}

pub fn run(target: &LookupTarget, db_path: &Path, output_format: &str) -> Result<(), EnumberError> {
    let repo = open_existing(db_path)?;
    let rows = select(&repo, target)?;

    match output_format {
        "json" => output::json::print(&rows)?,
        _ => output::table::print_lookup(&target.label(), &rows),
    }
    Ok(())
}

fn select(repo: &Repository, target: &LookupTarget) -> Result<Vec<StoredAdditive>, EnumberError> {
    if let Some(query) = &target.query {
        return match AdditiveCode::parse(query) {
            Ok(code) => repo.find_by_code(&code),
            Err(_) => repo.search_by_name(query),
        };
    }
    if let Some(risk) = &target.risk {
        let level = RiskLevel::from_str_loose(risk).ok_or_else(|| EnumberError::InvalidFilter {
            kind: "risk level",
            value: risk.clone(),
        })?;
        return repo.list_by_risk_level(level);
    }
    if let Some(label) = &target.category {
        let category = Category::from_label(label).ok_or_else(|| EnumberError::InvalidFilter {
            kind: "category",
            value: label.clone(),
        })?;
        return repo.list_by_category(category);
    }
    if target.vegetarian {
        return repo.list_vegetarian();
    }
    repo.list_vegan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use enumber_core::classify::enrich;
    use enumber_core::model::{AdditiveRecord, DietaryFlag};

    fn sample_repo() -> Repository {
        let mut repo = Repository::open_in_memory().unwrap();
        let mut curcumin = AdditiveRecord::new(
            "en:e100",
            AdditiveCode::parse("100").unwrap(),
            "Curcumin",
        );
        curcumin.classes = "natural colour".into();
        curcumin.dietary.vegetarian = DietaryFlag::Yes;
        let mut tartrazine = AdditiveRecord::new(
            "en:e102",
            AdditiveCode::parse("102").unwrap(),
            "Tartrazine",
        );
        tartrazine.classes = "colour".into();
        repo.upsert_batch(&[enrich(curcumin), enrich(tartrazine)])
            .unwrap();
        repo
    }

    #[test]
    fn test_code_then_name() {
        let repo = sample_repo();
        let by_code = LookupTarget {
            query: Some("e102".into()),
            ..Default::default()
        };
        assert_eq!(select(&repo, &by_code).unwrap()[0].display_name, "Tartrazine");

        let by_name = LookupTarget {
            query: Some("curc".into()),
            ..Default::default()
        };
        assert_eq!(select(&repo, &by_name).unwrap()[0].code, "E100");
    }

    #[test]
    fn test_risk_and_category_filters() {
        let repo = sample_repo();
        let red = LookupTarget {
            risk: Some("red".into()),
            ..Default::default()
        };
        let rows = select(&repo, &red).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "E102");

        let colors = LookupTarget {
            category: Some("food colors".into()),
            ..Default::default()
        };
        assert_eq!(select(&repo, &colors).unwrap().len(), 2);

        let vegetarian = LookupTarget {
            vegetarian: true,
            ..Default::default()
        };
        assert_eq!(select(&repo, &vegetarian).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_filter_values_are_errors() {
        let repo = sample_repo();
        let bad_risk = LookupTarget {
            risk: Some("purple".into()),
            ..Default::default()
        };
        assert!(matches!(
            select(&repo, &bad_risk),
            Err(EnumberError::InvalidFilter { kind: "risk level", .. })
        ));

        let bad_category = LookupTarget {
            category: Some("Glazes".into()),
            ..Default::default()
        };
        assert!(matches!(
            select(&repo, &bad_category),
            Err(EnumberError::InvalidFilter { kind: "category", .. })
        ));
    }
}
