use crate::model::Category;

/// A class-keyword override for the base function clause.
///
/// Matches when every keyword in `requires` occurs in the lower-cased
/// `classes` text.
#[derive(Debug, Clone, Copy)]
pub struct FunctionRule {
    pub requires: &'static [&'static str],
    pub phrase: &'static str,
}

/// Overrides, most specific first. Independent of the risk cascade.
pub static FUNCTION_RULES: &[FunctionRule] = &[
    FunctionRule {
        requires: &["colour", "natural"],
        phrase: "a natural colouring obtained from plant, mineral or animal sources",
    },
    FunctionRule {
        requires: &["color", "natural"],
        phrase: "a natural colouring obtained from plant, mineral or animal sources",
    },
    FunctionRule {
        requires: &["colour"],
        phrase: "a colouring used to add or restore colour in foods",
    },
    FunctionRule {
        requires: &["color"],
        phrase: "a colouring used to add or restore colour in foods",
    },
    FunctionRule {
        requires: &["preservative", "antioxidant"],
        phrase: "a preservative and antioxidant that protects food from spoilage and rancidity",
    },
    FunctionRule {
        requires: &["preservative"],
        phrase: "a preservative that extends shelf life by inhibiting microbial growth",
    },
    FunctionRule {
        requires: &["antioxidant", "vitamin"],
        phrase: "an antioxidant with vitamin activity that keeps fats and colours from oxidising",
    },
    FunctionRule {
        requires: &["antioxidant"],
        phrase: "an antioxidant that slows rancidity and colour loss",
    },
    FunctionRule {
        requires: &["sweetener", "artificial"],
        phrase: "an artificial high-intensity sweetener used in place of sugar",
    },
    FunctionRule {
        requires: &["sweetener"],
        phrase: "a sweetener that provides sweetness with fewer calories than sugar",
    },
    FunctionRule {
        requires: &["flavour enhancer"],
        phrase: "a flavour enhancer that intensifies savoury taste",
    },
    FunctionRule {
        requires: &["flavor enhancer"],
        phrase: "a flavour enhancer that intensifies savoury taste",
    },
    FunctionRule {
        requires: &["emulsifier"],
        phrase: "an emulsifier that keeps oil and water mixed",
    },
    FunctionRule {
        requires: &["gelling"],
        phrase: "a gelling agent that sets liquids into a gel",
    },
    FunctionRule {
        requires: &["thickener"],
        phrase: "a thickener that increases the viscosity of foods",
    },
    FunctionRule {
        requires: &["stabiliser"],
        phrase: "a stabiliser that maintains texture and consistency",
    },
    FunctionRule {
        requires: &["stabilizer"],
        phrase: "a stabiliser that maintains texture and consistency",
    },
    FunctionRule {
        requires: &["acidity regulator"],
        phrase: "an acidity regulator that controls the acidity of foods",
    },
    FunctionRule {
        requires: &["anti-caking"],
        phrase: "an anti-caking agent that keeps powders free-flowing",
    },
    FunctionRule {
        requires: &["raising agent"],
        phrase: "a raising agent that releases gas to lighten doughs and batters",
    },
    FunctionRule {
        requires: &["glazing agent"],
        phrase: "a glazing agent that gives foods a shiny protective coating",
    },
    FunctionRule {
        requires: &["humectant"],
        phrase: "a humectant that keeps foods from drying out",
    },
];

/// Fallback phrase when no override matches.
pub fn category_phrase(category: Category) -> &'static str {
    match category {
        Category::FoodColors => "a colouring used to add or restore colour in foods",
        Category::Preservatives => "a preservative that extends shelf life",
        Category::Antioxidants => "an antioxidant that slows oxidation",
        Category::Sweeteners => "a sweetener",
        Category::Emulsifiers => "an emulsifier that keeps oil and water mixed",
        Category::Stabilizers => "a stabiliser that maintains texture and consistency",
        Category::Thickeners => "a thickener that increases the viscosity of foods",
        Category::FlavorEnhancers => "a flavour enhancer",
        Category::AcidityRegulators => "an acidity regulator",
        Category::AntiCakingAgents => "an anti-caking agent",
        Category::Other => "a food additive used for technological purposes",
    }
}

/// The base function phrase for a record.
pub fn function_phrase(classes: &str, category: Category) -> &'static str {
    let classes = classes.to_lowercase();
    FUNCTION_RULES
        .iter()
        .find(|rule| rule.requires.iter().all(|kw| classes.contains(kw)))
        .map(|rule| rule.phrase)
        .unwrap_or_else(|| category_phrase(category))
}
