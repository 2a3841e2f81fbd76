use crate::model::Category;

/// Keyword -> category, checked in this order against `classes`.
///
/// Several keywords often co-occur ("colour, antioxidant"); the earlier entry
/// wins.
pub static CATEGORY_KEYWORDS: &[(&str, Category)] = &[
    ("colour", Category::FoodColors),
    ("color", Category::FoodColors),
    ("preservative", Category::Preservatives),
    ("antioxidant", Category::Antioxidants),
    ("sweetener", Category::Sweeteners),
    ("emulsifier", Category::Emulsifiers),
    ("stabiliser", Category::Stabilizers),
    ("stabilizer", Category::Stabilizers),
    ("thickener", Category::Thickeners),
    ("flavour enhancer", Category::FlavorEnhancers),
    ("flavor enhancer", Category::FlavorEnhancers),
    ("acidity regulator", Category::AcidityRegulators),
    ("anti-caking", Category::AntiCakingAgents),
];

/// Resolve the category of a record from its class tags.
pub fn resolve_category(classes: &str) -> Category {
    let classes = classes.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| classes.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or_default()
}
