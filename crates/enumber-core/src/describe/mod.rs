pub mod function;
pub mod usage;

use crate::model::{AdditiveRecord, Category, DietaryFlags, Evaluation, RiskLevel};
use function::function_phrase;
use usage::usage_note;

/// Evaluation text that carries no information.
const UNKNOWN_EVALUATION: &str = "unknown";

/// One fixed framing sentence per risk level.
pub fn risk_framing(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Green => "It is considered safe at normal dietary levels",
        RiskLevel::Yellow => {
            "It is generally regarded as acceptable, though moderate consumption is advised"
        }
        RiskLevel::Orange => {
            "Some studies have raised health concerns, so intake should be limited"
        }
        RiskLevel::Red => {
            "It is associated with documented health concerns or regulatory restrictions and is best avoided"
        }
    }
}

/// Build the description of a classified record.
///
/// Sentences, in order:
/// 1. Base function clause (always)
/// 2. Risk framing (always)
/// 3. Dietary suitability, when vegetarian or vegan is "yes"
/// 4. Regulatory evaluation, when there is usable evaluation text
/// 5. Specific usage note, when the code or name is known
pub fn synthesize_description(
    record: &AdditiveRecord,
    level: RiskLevel,
    category: Category,
) -> String {
    let mut sentences: Vec<String> = Vec::with_capacity(5);

    sentences.push(format!(
        "{} is {}",
        subject(record),
        function_phrase(&record.classes, category)
    ));
    sentences.push(risk_framing(level).to_string());

    if let Some(dietary) = dietary_clause(&record.dietary) {
        sentences.push(dietary.to_string());
    }
    if let Some(regulatory) = regulatory_clause(&record.evaluation) {
        sentences.push(regulatory);
    }
    if let Some(note) = usage_note(record.code.bare(), &record.display_name) {
        sentences.push(note.to_string());
    }

    join_sentences(&sentences)
}

/// "Tartrazine (E102)", or just "E102" when the name is empty.
fn subject(record: &AdditiveRecord) -> String {
    let name = record.display_name.trim();
    if name.is_empty() {
        record.code.to_string()
    } else {
        format!("{} ({})", name, record.code)
    }
}

fn dietary_clause(flags: &DietaryFlags) -> Option<&'static str> {
    match (flags.vegetarian.is_yes(), flags.vegan.is_yes()) {
        (true, true) => Some("Vegetarian-friendly and vegan-friendly"),
        (true, false) => Some("Vegetarian-friendly"),
        (false, true) => Some("Vegan-friendly"),
        (false, false) => None,
    }
}

fn regulatory_clause(evaluation: &Evaluation) -> Option<String> {
    let text = evaluation.text.as_deref()?.trim();
    if text.to_lowercase().contains("safe") {
        Some("Its safety has been confirmed by the European Food Safety Authority".to_string())
    } else if !text.is_empty() && !text.eq_ignore_ascii_case(UNKNOWN_EVALUATION) {
        Some(format!("EFSA evaluation: {text}"))
    } else {
        None
    }
}

/// Join with ". " and end with a single period.
fn join_sentences(sentences: &[String]) -> String {
    let mut out = sentences
        .iter()
        .map(|s| s.trim().trim_end_matches('.'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(". ");
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DietaryFlag;
    use crate::normalize::code::AdditiveCode;

    fn record(code: &str, name: &str, classes: &str) -> AdditiveRecord {
        let mut rec = AdditiveRecord::new(
            format!("en:e{code}"),
            AdditiveCode::parse(code).unwrap(),
            name,
        );
        rec.classes = classes.into();
        rec
    }

    #[test]
    fn test_minimal_description_has_two_sentences() {
        let rec = record("1990", "", "");
        let text = synthesize_description(&rec, RiskLevel::Yellow, Category::Other);
        assert_eq!(
            text,
            "E1990 is a food additive used for technological purposes. \
             It is generally regarded as acceptable, though moderate consumption is advised."
        );
    }

    #[test]
    fn test_full_description_order() {
        let mut rec = record("100", "Curcumin", "natural colour");
        rec.dietary.vegetarian = DietaryFlag::Yes;
        rec.dietary.vegan = DietaryFlag::Yes;
        rec.evaluation.text = Some("safe".into());

        let text = synthesize_description(&rec, RiskLevel::Green, Category::FoodColors);
        let base = text.find("Curcumin (E100) is a natural colouring").unwrap();
        let risk = text.find("considered safe").unwrap();
        let diet = text.find("Vegetarian-friendly and vegan-friendly").unwrap();
        let reg = text.find("European Food Safety Authority").unwrap();
        let usage = text.find("turmeric").unwrap();
        assert!(base < risk && risk < diet && diet < reg && reg < usage);
        assert!(text.ends_with('.'));
        assert!(!text.contains(".."));
    }

    #[test]
    fn test_vegan_only() {
        let mut rec = record("1990", "X", "");
        rec.dietary.vegan = DietaryFlag::Yes;
        rec.dietary.vegetarian = DietaryFlag::Other("maybe".into());
        let text = synthesize_description(&rec, RiskLevel::Yellow, Category::Other);
        assert!(text.contains("Vegan-friendly"));
        assert!(!text.contains("Vegetarian-friendly"));
    }

    #[test]
    fn test_evaluation_text_verbatim() {
        let mut rec = record("1990", "X", "");
        rec.evaluation.text = Some("overexposure risk in some groups.".into());
        let text = synthesize_description(&rec, RiskLevel::Orange, Category::Other);
        assert!(text.contains("EFSA evaluation: overexposure risk in some groups."));
        assert!(!text.contains(".."));
    }

    #[test]
    fn test_unknown_evaluation_omitted() {
        let mut rec = record("1990", "X", "");
        rec.evaluation.text = Some("Unknown".into());
        let text = synthesize_description(&rec, RiskLevel::Yellow, Category::Other);
        assert!(!text.contains("EFSA"));
    }

    #[test]
    fn test_ascorbic_name_usage_mentions_citrus() {
        let rec = record("9999", "Ascorbic acid", "");
        let text = synthesize_description(&rec, RiskLevel::Green, Category::Other);
        assert!(text.contains("citrus fruits"));
    }

    #[test]
    fn test_every_level_has_framing() {
        for level in RiskLevel::ALL {
            let text = synthesize_description(&record("1990", "", ""), level, Category::Other);
            assert!(text.contains(risk_framing(level)));
            assert!(!text.is_empty());
        }
    }
}
