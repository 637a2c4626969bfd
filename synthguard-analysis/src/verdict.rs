//! Pass/fail verdicts and risk levels shared by the report sections.

use std::fmt;

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

impl CheckStatus {
    /// `Fail` when `count > 0`, `Pass` otherwise.
    pub fn from_count(count: usize) -> Self {
        if count > 0 {
            CheckStatus::Fail
        } else {
            CheckStatus::Pass
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Warning => "WARNING",
            CheckStatus::Fail => "FAIL",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synthesis risk level attached to a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Risk {
    Low,
    Moderate,
    High,
}

impl Risk {
    pub fn as_str(&self) -> &'static str {
        match self {
            Risk::Low => "LOW",
            Risk::Moderate => "MODERATE",
            Risk::High => "HIGH",
        }
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_count() {
        assert_eq!(CheckStatus::from_count(0), CheckStatus::Pass);
        assert_eq!(CheckStatus::from_count(3), CheckStatus::Fail);
    }

    #[test]
    fn display_matches_wire_names() {
        assert_eq!(CheckStatus::Warning.to_string(), "WARNING");
        assert_eq!(Risk::Moderate.to_string(), "MODERATE");
        assert!(Risk::High > Risk::Low);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_uppercase() {
        assert_eq!(serde_json::to_string(&CheckStatus::Fail).unwrap(), "\"FAIL\"");
        assert_eq!(serde_json::to_string(&Risk::Low).unwrap(), "\"LOW\"");
    }
}
