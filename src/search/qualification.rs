//! Qualification sub-pattern.
//!
//! Matches the dotted `package[.Enclosing]*` string of a candidate as a whole,
//! under its own [`MatchRule`], independently of how the owning type pattern
//! matches simple names.

use super::matcher::MatchRule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualificationPattern {
    qualification: String,
    rule: MatchRule,
}

impl QualificationPattern {
    pub fn new(qualification: impl Into<String>, rule: MatchRule) -> Self {
        Self {
            qualification: rule.fold_qualification(qualification.into()),
            rule,
        }
    }

    pub fn qualification(&self) -> &str {
        &self.qualification
    }

    pub const fn rule(&self) -> MatchRule {
        self.rule
    }

    /// Tests a candidate qualification against `query` under this pattern's rule.
    ///
    /// `query` is the owning pattern's qualification; a `None` query matches
    /// any candidate.
    pub fn matches_name(&self, query: Option<&str>, candidate: &str) -> bool {
        self.rule.matches_name(query, candidate)
    }

    /// Tests a candidate against this pattern's own qualification.
    pub fn matches(&self, candidate: &str) -> bool {
        self.matches_name(Some(&self.qualification), candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::matcher::MatchMode;

    #[test]
    fn test_prefix_over_whole_qualification() {
        let pattern =
            QualificationPattern::new("java.util", MatchRule::new(MatchMode::Prefix, true));
        assert!(pattern.matches("java.util"));
        assert!(pattern.matches("java.util.concurrent"));
        assert!(pattern.matches("java.util.Map"));
        assert!(!pattern.matches("java.io"));
    }

    #[test]
    fn test_glob_spans_dots() {
        let pattern =
            QualificationPattern::new("java.*.Map", MatchRule::new(MatchMode::Pattern, true));
        assert!(pattern.matches("java.util.Map"));
        assert!(pattern.matches("java.util.concurrent.Map"));
        assert!(!pattern.matches("java.util.HashMap"));
    }

    #[test]
    fn test_case_insensitive_rule_folds_stored_qualification() {
        let pattern =
            QualificationPattern::new("Java.Util", MatchRule::new(MatchMode::Exact, false));
        assert_eq!(pattern.qualification(), "java.util");
        assert!(pattern.matches("JAVA.util"));
    }

    #[test]
    fn test_none_query_is_wildcard() {
        let pattern = QualificationPattern::new("x", MatchRule::exact_case_sensitive());
        assert!(pattern.matches_name(None, "anything.at.all"));
    }
}
