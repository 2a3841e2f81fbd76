use crate::classify::codes::{HIGH_RISK, MODERATE_RISK, SAFE};
use crate::model::{AdditiveRecord, RiskColor, RiskLevel};
use serde::Serialize;

/// One of the fixed code sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSet {
    HighRisk,
    ModerateRisk,
    Safe,
}

impl CodeSet {
    pub fn contains(&self, bare_code: &str) -> bool {
        match self {
            CodeSet::HighRisk => HIGH_RISK.contains(bare_code),
            CodeSet::ModerateRisk => MODERATE_RISK.contains(bare_code),
            CodeSet::Safe => SAFE.contains(bare_code),
        }
    }
}

/// What a rule looks at. Text matching is case-insensitive substring.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    CodeIn(CodeSet),
    ClassesContainAny(&'static [&'static str]),
    NameContainsAny(&'static [&'static str]),
}

/// What a matching rule returns.
#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Fixed(RiskLevel),
    /// `escalated` if the name contains any of `name_any`, else `otherwise`.
    EscalateOnName {
        name_any: &'static [&'static str],
        escalated: RiskLevel,
        otherwise: RiskLevel,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct RiskRule {
    pub id: &'static str,
    pub matcher: Matcher,
    pub outcome: Outcome,
}

/// Applied when no rule matches.
pub const DEFAULT_RISK: RiskLevel = RiskLevel::Yellow;

/// The risk cascade, evaluated top to bottom; the first match decides.
pub static RISK_RULES: &[RiskRule] = &[
    RiskRule {
        id: "code.high_risk",
        matcher: Matcher::CodeIn(CodeSet::HighRisk),
        outcome: Outcome::Fixed(RiskLevel::Red),
    },
    RiskRule {
        id: "code.moderate_risk",
        matcher: Matcher::CodeIn(CodeSet::ModerateRisk),
        outcome: Outcome::Fixed(RiskLevel::Orange),
    },
    RiskRule {
        id: "code.safe",
        matcher: Matcher::CodeIn(CodeSet::Safe),
        outcome: Outcome::Fixed(RiskLevel::Green),
    },
    RiskRule {
        id: "class.colour",
        matcher: Matcher::ClassesContainAny(&["colour", "color"]),
        outcome: Outcome::EscalateOnName {
            name_any: &["artificial", "synthetic", "azo"],
            escalated: RiskLevel::Orange,
            otherwise: RiskLevel::Yellow,
        },
    },
    RiskRule {
        id: "class.preservative",
        matcher: Matcher::ClassesContainAny(&["preservative"]),
        outcome: Outcome::EscalateOnName {
            name_any: &["benzoate", "sulfite", "nitrite", "nitrate"],
            escalated: RiskLevel::Orange,
            otherwise: RiskLevel::Yellow,
        },
    },
    RiskRule {
        id: "class.sweetener",
        matcher: Matcher::ClassesContainAny(&["sweetener"]),
        outcome: Outcome::EscalateOnName {
            name_any: &["artificial", "aspartame", "saccharin", "acesulfame"],
            escalated: RiskLevel::Orange,
            otherwise: RiskLevel::Yellow,
        },
    },
    RiskRule {
        id: "class.nutritive",
        matcher: Matcher::ClassesContainAny(&["antioxidant", "vitamin", "mineral"]),
        outcome: Outcome::Fixed(RiskLevel::Green),
    },
    RiskRule {
        id: "name.natural",
        matcher: Matcher::NameContainsAny(&[
            "natural", "vitamin", "mineral", "citric", "lactic", "ascorbic",
        ]),
        outcome: Outcome::Fixed(RiskLevel::Green),
    },
    RiskRule {
        id: "class.texturizer",
        matcher: Matcher::ClassesContainAny(&["emulsifier", "thickener", "stabiliser", "stabilizer"]),
        outcome: Outcome::Fixed(RiskLevel::Yellow),
    },
];

/// Lower-cased view of the fields the cascade reads.
struct Subject<'a> {
    code: &'a str,
    classes: String,
    name: String,
}

impl<'a> Subject<'a> {
    fn new(record: &'a AdditiveRecord) -> Self {
        Subject {
            code: record.code.bare(),
            classes: record.classes.to_lowercase(),
            name: record.display_name.to_lowercase(),
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

impl RiskRule {
    /// Evaluate this rule alone against a record.
    pub fn evaluate(&self, record: &AdditiveRecord) -> Option<RiskLevel> {
        self.evaluate_subject(&Subject::new(record))
    }

    fn evaluate_subject(&self, subject: &Subject<'_>) -> Option<RiskLevel> {
        let matched = match self.matcher {
            Matcher::CodeIn(set) => set.contains(subject.code),
            Matcher::ClassesContainAny(keywords) => contains_any(&subject.classes, keywords),
            Matcher::NameContainsAny(keywords) => contains_any(&subject.name, keywords),
        };
        if !matched {
            return None;
        }

        Some(match self.outcome {
            Outcome::Fixed(level) => level,
            Outcome::EscalateOnName {
                name_any,
                escalated,
                otherwise,
            } => {
                if contains_any(&subject.name, name_any) {
                    escalated
                } else {
                    otherwise
                }
            }
        })
    }
}

/// Risk decision together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub color: RiskColor,
    /// Id of the matching rule, or "default".
    pub rule: &'static str,
}

/// Run the cascade. Total: every record gets a level.
pub fn assess_risk(record: &AdditiveRecord) -> RiskAssessment {
    let subject = Subject::new(record);
    let (level, rule) = RISK_RULES
        .iter()
        .find_map(|rule| rule.evaluate_subject(&subject).map(|level| (level, rule.id)))
        .unwrap_or((DEFAULT_RISK, "default"));

    RiskAssessment {
        level,
        color: level.color(),
        rule,
    }
}

/// Classify a record into a `(RiskLevel, RiskColor)` pair.
pub fn classify_risk(record: &AdditiveRecord) -> (RiskLevel, RiskColor) {
    let assessment = assess_risk(record);
    (assessment.level, assessment.color)
}
