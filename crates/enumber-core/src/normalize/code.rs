use crate::error::EnumberError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical additive designation.
///
/// The taxonomy and hand-written lists disagree on whether codes carry the
/// `E` prefix ("102" vs "E102"), so the prefix is stripped once here and all
/// comparisons run on the bare form (`102`, `160a`, `331iii`). Display adds
/// the prefix back.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AdditiveCode(String);

impl AdditiveCode {
    /// Normalize a raw code.
    ///
    /// Steps:
    /// 1. Trim
    /// 2. Drop a single leading `E`/`e`
    /// 3. Drop whitespace, hyphens and parentheses: "E160a(ii)" -> "160aii"
    /// 4. Lowercase
    ///
    /// The result must start with a digit and be alphanumeric.
    pub fn parse(raw: &str) -> Result<Self, EnumberError> {
        let trimmed = raw.trim();
        let unprefixed = trimmed
            .strip_prefix(|c| c == 'E' || c == 'e')
            .unwrap_or(trimmed);

        let bare: String = unprefixed
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
            .flat_map(char::to_lowercase)
            .collect();

        let starts_with_digit = bare.chars().next().is_some_and(|c| c.is_ascii_digit());
        if !starts_with_digit || !bare.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(EnumberError::InvalidCode(raw.to_string()));
        }

        Ok(AdditiveCode(bare))
    }

    /// The code without its prefix, as used by every lookup table.
    pub fn bare(&self) -> &str {
        &self.0
    }

    /// Key under which the source taxonomy files this additive.
    pub fn taxonomy_key(&self) -> String {
        format!("en:e{}", self.0)
    }
}

impl fmt::Display for AdditiveCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl FromStr for AdditiveCode {
    type Err = EnumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdditiveCode::parse(s)
    }
}

impl TryFrom<String> for AdditiveCode {
    type Error = EnumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AdditiveCode::parse(&value)
    }
}

impl From<AdditiveCode> for String {
    fn from(code: AdditiveCode) -> String {
        code.to_string()
    }
}
