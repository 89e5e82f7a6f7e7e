use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority order used when no configuration overrides it.
pub const DEFAULT_STRATEGIES: [&str; 5] =
    ["original", "enhanced", "binarized", "grayscale", "resized"];

/// Cheaper subset used for bulk directory scans.
pub const DEFAULT_SCAN_STRATEGIES: [&str; 2] = ["original", "enhanced"];

/// Tag recorded when every strategy came back empty.
pub const ALL_FAILED_STRATEGY: &str = "all_failed";

/// Opaque name of a preprocessing variant understood by the recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StrategyName(String);

impl StrategyName {
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        let valid = !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_');
        if !valid {
            return Err(CoreError::InvalidStrategyName(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StrategyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StrategyName {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<StrategyName> for String {
    fn from(value: StrategyName) -> Self {
        value.0
    }
}

pub fn default_strategies() -> Vec<StrategyName> {
    DEFAULT_STRATEGIES
        .iter()
        .map(|name| StrategyName(name.to_string()))
        .collect()
}

pub fn default_scan_strategies() -> Vec<StrategyName> {
    DEFAULT_SCAN_STRATEGIES
        .iter()
        .map(|name| StrategyName(name.to_string()))
        .collect()
}

/// Validates a configured priority list; order is preserved.
pub fn parse_strategy_list<I, S>(names: I) -> Result<Vec<StrategyName>, CoreError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<StrategyName> = Vec::new();
    for raw in names {
        let name = StrategyName::new(raw.as_ref())?;
        if !out.contains(&name) {
            out.push(name);
        }
    }
    if out.is_empty() {
        return Err(CoreError::EmptyStrategyList);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{default_strategies, parse_strategy_list, StrategyName};
    use crate::error::CoreError;

    #[test]
    fn strategy_name_trims() {
        let name = StrategyName::new(" enhanced ").unwrap();
        assert_eq!(name.as_str(), "enhanced");
    }

    #[test]
    fn strategy_name_rejects_uppercase_and_spaces() {
        assert!(StrategyName::new("Enhanced").is_err());
        assert!(StrategyName::new("two words").is_err());
        assert!(StrategyName::new("").is_err());
    }

    #[test]
    fn parse_list_keeps_first_occurrence_order() {
        let names = parse_strategy_list(["resized", "original", "resized"]).unwrap();
        let names: Vec<&str> = names.iter().map(StrategyName::as_str).collect();
        assert_eq!(names, vec!["resized", "original"]);
    }

    #[test]
    fn parse_list_rejects_empty() {
        let err = parse_strategy_list(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, CoreError::EmptyStrategyList);
    }

    #[test]
    fn defaults_start_with_original() {
        assert_eq!(default_strategies()[0].as_str(), "original");
    }
}
