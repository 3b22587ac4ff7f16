//! Query-side type declaration pattern.
//!
//! A [`QualifiedTypeDeclarationPattern`] decides whether a [`DecodedTypeRecord`]
//! satisfies a query. It composes the name matcher, the optional qualification
//! sub-pattern, and the type suffix relation. Absent fields are wildcards.

use super::codec::DecodedTypeRecord;
use super::matcher::{MatchMode, MatchRule};
use super::qualification::QualificationPattern;
use super::suffix::TypeSuffix;
use crate::error::PatternError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedTypeDeclarationPattern {
    simple_name: Option<String>,
    qualification: Option<String>,
    type_suffix: TypeSuffix,
    rule: MatchRule,
    module_name: Option<String>,
    qualification_pattern: Option<QualificationPattern>,
}

impl QualifiedTypeDeclarationPattern {
    /// A pattern whose qualification, if any, must be equal to the candidate's.
    ///
    /// Stored names are folded to lowercase when `rule` is case insensitive
    /// (simple names keep their case under camel case).
    pub fn new(
        qualification: Option<&str>,
        simple_name: Option<&str>,
        type_suffix: TypeSuffix,
        rule: MatchRule,
    ) -> Self {
        Self {
            simple_name: simple_name.map(|n| rule.fold_simple_name(n.to_owned())),
            qualification: qualification.map(|q| rule.fold_qualification(q.to_owned())),
            type_suffix,
            rule,
            module_name: None,
            qualification_pattern: None,
        }
    }

    /// A pattern whose qualification is matched by a sub-pattern with its own rule.
    pub fn with_qualification_rule(
        qualification: &str,
        qualification_rule: MatchRule,
        simple_name: Option<&str>,
        type_suffix: TypeSuffix,
        rule: MatchRule,
    ) -> Self {
        Self {
            qualification_pattern: Some(QualificationPattern::new(
                qualification,
                qualification_rule,
            )),
            ..Self::new(Some(qualification), simple_name, type_suffix, rule)
        }
    }

    /// Builds a pattern from a dotted name such as `java.util.Map` or `*.Map`.
    ///
    /// The part after the last `.` is the simple name. A qualification of `*`
    /// is a wildcard; one containing `*` or `?` is glob-matched with the rule's
    /// case sensitivity; any other qualification must be equal.
    pub fn from_qualified_name(name: &str, type_suffix: TypeSuffix, rule: MatchRule) -> Self {
        let Some((qualification, simple_name)) = name.rsplit_once('.') else {
            return Self::new(None, Some(name), type_suffix, rule);
        };

        if qualification == "*" {
            Self::new(None, Some(simple_name), type_suffix, rule)
        } else if qualification.contains(['*', '?']) {
            let glob = MatchRule::new(MatchMode::Pattern, rule.is_case_sensitive());
            Self::with_qualification_rule(qualification, glob, Some(simple_name), type_suffix, rule)
        } else {
            Self::new(Some(qualification), Some(simple_name), type_suffix, rule)
        }
    }

    pub fn builder() -> PatternBuilder {
        PatternBuilder::new()
    }

    /// A fresh pattern with an exact, case-sensitive rule and no fields set.
    ///
    /// Every field is a wildcard, so it matches every decoded record.
    pub fn blank_pattern() -> Self {
        Self::new(None, None, TypeSuffix::Type, MatchRule::exact_case_sensitive())
    }

    pub fn simple_name(&self) -> Option<&str> {
        self.simple_name.as_deref()
    }

    pub fn qualification(&self) -> Option<&str> {
        self.qualification.as_deref()
    }

    pub const fn type_suffix(&self) -> TypeSuffix {
        self.type_suffix
    }

    pub const fn match_rule(&self) -> MatchRule {
        self.rule
    }

    pub fn module_name(&self) -> Option<&str> {
        self.module_name.as_deref()
    }

    pub const fn qualification_pattern(&self) -> Option<&QualificationPattern> {
        self.qualification_pattern.as_ref()
    }

    /// Whether `decoded` satisfies this query. Pure; safe to call repeatedly.
    pub fn matches_decoded_key(&self, decoded: &DecodedTypeRecord) -> bool {
        // Suffix first: cheapest rejection. The relation already accepts the
        // `Type` wildcard and equal suffixes.
        if !self.type_suffix.is_compatible_with(decoded.type_suffix) {
            return false;
        }

        if !self
            .rule
            .matches_name(self.simple_name.as_deref(), &decoded.simple_name)
        {
            return false;
        }

        if !self.matches_qualification(&decoded.qualification) {
            return false;
        }

        match &self.module_name {
            Some(module) => *module == decoded.module_name,
            None => true,
        }
    }

    fn matches_qualification(&self, candidate: &str) -> bool {
        let Some(qualification) = &self.qualification else {
            return true;
        };
        match &self.qualification_pattern {
            Some(sub_pattern) => sub_pattern.matches(candidate),
            None => MatchRule::new(MatchMode::Exact, self.rule.is_case_sensitive())
                .matches_name(Some(qualification), candidate),
        }
    }
}

impl fmt::Display for QualifiedTypeDeclarationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: qualification<{}>, type<{}>",
            self.type_suffix.pattern_label(),
            self.qualification.as_deref().unwrap_or("*"),
            self.simple_name.as_deref().unwrap_or("*"),
        )?;
        if let Some(module) = &self.module_name {
            write!(f, ", module<{}>", module)?;
        }
        write!(f, ", {}", self.rule)
    }
}

#[derive(Debug, Clone, Copy)]
enum QualificationMatching {
    Equality,
    OwningRule,
    Rule(MatchRule),
}

/// Fluent construction of a [`QualifiedTypeDeclarationPattern`].
///
/// The rule is validated once, in [`PatternBuilder::build`].
#[derive(Debug, Clone)]
pub struct PatternBuilder {
    simple_name: Option<String>,
    qualification: Option<String>,
    qualification_matching: QualificationMatching,
    type_suffix: TypeSuffix,
    mode: MatchMode,
    case_sensitive: bool,
    camel_case: Option<bool>,
    module_name: Option<String>,
}

impl Default for PatternBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternBuilder {
    pub const fn new() -> Self {
        Self {
            simple_name: None,
            qualification: None,
            qualification_matching: QualificationMatching::Equality,
            type_suffix: TypeSuffix::Type,
            mode: MatchMode::Exact,
            case_sensitive: true,
            camel_case: None,
            module_name: None,
        }
    }

    pub fn simple_name(mut self, name: impl Into<String>) -> Self {
        self.simple_name = Some(name.into());
        self
    }

    pub fn qualification(mut self, qualification: impl Into<String>) -> Self {
        self.qualification = Some(qualification.into());
        self
    }

    /// Match the qualification with the same rule as the simple name.
    pub fn qualification_uses_type_rule(mut self) -> Self {
        self.qualification_matching = QualificationMatching::OwningRule;
        self
    }

    /// Match the qualification with its own rule.
    pub fn qualification_rule(mut self, rule: MatchRule) -> Self {
        self.qualification_matching = QualificationMatching::Rule(rule);
        self
    }

    pub fn type_suffix(mut self, suffix: TypeSuffix) -> Self {
        self.type_suffix = suffix;
        self
    }

    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn camel_case(mut self, same_part_count: bool) -> Self {
        self.camel_case = Some(same_part_count);
        self
    }

    pub fn module_name(mut self, module: impl Into<String>) -> Self {
        self.module_name = Some(module.into());
        self
    }

    pub fn build(self) -> Result<QualifiedTypeDeclarationPattern, PatternError> {
        let mut rule = MatchRule::new(self.mode, self.case_sensitive);
        if let Some(same_part_count) = self.camel_case {
            rule = rule.with_camel_case(same_part_count)?;
        }

        let mut pattern = match (&self.qualification, self.qualification_matching) {
            (Some(q), QualificationMatching::OwningRule) => {
                QualifiedTypeDeclarationPattern::with_qualification_rule(
                    q,
                    rule,
                    self.simple_name.as_deref(),
                    self.type_suffix,
                    rule,
                )
            }
            (Some(q), QualificationMatching::Rule(q_rule)) => {
                QualifiedTypeDeclarationPattern::with_qualification_rule(
                    q,
                    q_rule,
                    self.simple_name.as_deref(),
                    self.type_suffix,
                    rule,
                )
            }
            (q, _) => QualifiedTypeDeclarationPattern::new(
                q.as_deref(),
                self.simple_name.as_deref(),
                self.type_suffix,
                rule,
            ),
        };
        pattern.module_name = self.module_name;
        Ok(pattern)
    }
}
