use crate::normalize::code::AdditiveCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which ingestion path produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Source,
    Curated,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Source => "source",
            Provenance::Curated => "curated",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vegetarian/vegan marker as the taxonomy states it.
///
/// Values other than "yes"/"no" (e.g. "maybe") are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DietaryFlag {
    Yes,
    No,
    #[default]
    Unspecified,
    Other(String),
}

impl DietaryFlag {
    pub fn from_str_loose(s: &str) -> DietaryFlag {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            DietaryFlag::Unspecified
        } else if trimmed.eq_ignore_ascii_case("yes") {
            DietaryFlag::Yes
        } else if trimmed.eq_ignore_ascii_case("no") {
            DietaryFlag::No
        } else {
            DietaryFlag::Other(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DietaryFlag::Yes => "yes",
            DietaryFlag::No => "no",
            DietaryFlag::Unspecified => "",
            DietaryFlag::Other(s) => s,
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, DietaryFlag::Yes)
    }
}

impl From<String> for DietaryFlag {
    fn from(s: String) -> Self {
        DietaryFlag::from_str_loose(&s)
    }
}

impl From<DietaryFlag> for String {
    fn from(flag: DietaryFlag) -> String {
        flag.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryFlags {
    pub vegetarian: DietaryFlag,
    pub vegan: DietaryFlag,
}

/// Provenance fields from a regulatory evaluation. All optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// One additive as produced by the normalizer or the curated set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditiveRecord {
    /// Upsert key. Source taxonomy key, or `en:e<code>` for curated entries.
    pub external_id: String,
    pub code: AdditiveCode,
    /// May be empty; the validator reports such rows.
    pub display_name: String,
    /// Lower-cased free-text class tags, e.g. "natural colour".
    pub classes: String,
    pub dietary: DietaryFlags,
    pub evaluation: Evaluation,
    pub provenance: Provenance,
    pub ingested_at: DateTime<Utc>,
}

impl AdditiveRecord {
    pub fn new(
        external_id: impl Into<String>,
        code: AdditiveCode,
        display_name: impl Into<String>,
    ) -> Self {
        AdditiveRecord {
            external_id: external_id.into(),
            code,
            display_name: display_name.into(),
            classes: String::new(),
            dietary: DietaryFlags::default(),
            evaluation: Evaluation::default(),
            provenance: Provenance::Source,
            ingested_at: Utc::now(),
        }
    }
}

/// Four-level risk rating, ordered from least to most concerning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Green,
    Yellow,
    Orange,
    Red,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Green,
        RiskLevel::Yellow,
        RiskLevel::Orange,
        RiskLevel::Red,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Green => "GREEN",
            RiskLevel::Yellow => "YELLOW",
            RiskLevel::Orange => "ORANGE",
            RiskLevel::Red => "RED",
        }
    }

    /// The display color. This is the only place a color is derived.
    pub fn color(&self) -> RiskColor {
        match self {
            RiskLevel::Green => RiskColor::Green,
            RiskLevel::Yellow => RiskColor::Yellow,
            RiskLevel::Orange => RiskColor::Orange,
            RiskLevel::Red => RiskColor::Red,
        }
    }

    pub fn from_str_loose(s: &str) -> Option<RiskLevel> {
        RiskLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl RiskColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskColor::Green => "green",
            RiskColor::Yellow => "yellow",
            RiskColor::Orange => "orange",
            RiskColor::Red => "red",
        }
    }
}

impl fmt::Display for RiskColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Functional category of an additive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food Colors")]
    FoodColors,
    #[serde(rename = "Preservatives")]
    Preservatives,
    #[serde(rename = "Antioxidants")]
    Antioxidants,
    #[serde(rename = "Sweeteners")]
    Sweeteners,
    #[serde(rename = "Emulsifiers")]
    Emulsifiers,
    #[serde(rename = "Stabilizers")]
    Stabilizers,
    #[serde(rename = "Thickeners")]
    Thickeners,
    #[serde(rename = "Flavor Enhancers")]
    FlavorEnhancers,
    #[serde(rename = "Acidity Regulators")]
    AcidityRegulators,
    #[serde(rename = "Anti-Caking Agents")]
    AntiCakingAgents,
    #[serde(rename = "Other")]
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::FoodColors,
        Category::Preservatives,
        Category::Antioxidants,
        Category::Sweeteners,
        Category::Emulsifiers,
        Category::Stabilizers,
        Category::Thickeners,
        Category::FlavorEnhancers,
        Category::AcidityRegulators,
        Category::AntiCakingAgents,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FoodColors => "Food Colors",
            Category::Preservatives => "Preservatives",
            Category::Antioxidants => "Antioxidants",
            Category::Sweeteners => "Sweeteners",
            Category::Emulsifiers => "Emulsifiers",
            Category::Stabilizers => "Stabilizers",
            Category::Thickeners => "Thickeners",
            Category::FlavorEnhancers => "Flavor Enhancers",
            Category::AcidityRegulators => "Acidity Regulators",
            Category::AntiCakingAgents => "Anti-Caking Agents",
            Category::Other => "Other",
        }
    }

    pub fn from_label(s: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An additive after classification and description synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedAdditive {
    #[serde(flatten)]
    pub record: AdditiveRecord,
    pub risk_level: RiskLevel,
    /// Always `risk_level.color()`.
    pub risk_color: RiskColor,
    pub category: Category,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_levels_ordered() {
        assert!(RiskLevel::Green < RiskLevel::Yellow);
        assert!(RiskLevel::Yellow < RiskLevel::Orange);
        assert!(RiskLevel::Orange < RiskLevel::Red);
    }

    #[test]
    fn test_color_projection() {
        assert_eq!(RiskLevel::Red.color(), RiskColor::Red);
        assert_eq!(RiskLevel::Orange.color().as_str(), "orange");
        assert_eq!(RiskLevel::Yellow.color().as_str(), "yellow");
        assert_eq!(RiskLevel::Green.color().as_str(), "green");
    }

    #[test]
    fn test_risk_level_round_trip_label() {
        for level in RiskLevel::ALL {
            assert_eq!(RiskLevel::from_str_loose(level.as_str()), Some(level));
        }
        assert_eq!(RiskLevel::from_str_loose("purple"), None);
    }

    #[test]
    fn test_dietary_flag_loose() {
        assert_eq!(DietaryFlag::from_str_loose(" Yes "), DietaryFlag::Yes);
        assert_eq!(DietaryFlag::from_str_loose("no"), DietaryFlag::No);
        assert_eq!(DietaryFlag::from_str_loose(""), DietaryFlag::Unspecified);
        assert_eq!(
            DietaryFlag::from_str_loose("maybe"),
            DietaryFlag::Other("maybe".into())
        );
        assert_eq!(DietaryFlag::Other("maybe".into()).as_str(), "maybe");
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::AntiCakingAgents.to_string(), "Anti-Caking Agents");
        assert_eq!(Category::from_label("food colors"), Some(Category::FoodColors));
        assert_eq!(Category::default(), Category::Other);
        assert_eq!(
            serde_json::to_string(&Category::FlavorEnhancers).unwrap(),
            "\"Flavor Enhancers\""
        );
    }
}
