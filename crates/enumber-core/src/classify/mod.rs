pub mod category;
pub mod codes;
pub mod risk;

pub use category::resolve_category;
pub use risk::{assess_risk, classify_risk, RiskAssessment};

use crate::describe::synthesize_description;
use crate::model::{AdditiveRecord, ClassifiedAdditive};
use tracing::debug;

/// Classify, categorize and describe one record.
pub fn enrich(record: AdditiveRecord) -> ClassifiedAdditive {
    let assessment = assess_risk(&record);
    let category = resolve_category(&record.classes);
    let description = synthesize_description(&record, assessment.level, category);

    debug!(
        external_id = %record.external_id,
        code = %record.code,
        risk = %assessment.level,
        rule = assessment.rule,
        %category,
        "classified additive"
    );

    ClassifiedAdditive {
        record,
        risk_level: assessment.level,
        risk_color: assessment.color,
        category,
        description,
    }
}

/// Enrich records in input order.
pub fn enrich_all(records: Vec<AdditiveRecord>) -> Vec<ClassifiedAdditive> {
    records.into_iter().map(enrich).collect()
}
