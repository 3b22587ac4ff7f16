//! Name matching rules shared by type and qualification patterns.
//!
//! A [`MatchRule`] combines one [`MatchMode`] (exact, prefix, or glob pattern)
//! with case-sensitivity and camel-case flags. Invalid combinations are rejected
//! when the rule is built, so matching itself never fails.

use crate::error::PatternError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a pattern fragment is compared against a candidate name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Whole-name equality.
    #[default]
    Exact,
    /// Candidate starts with the fragment.
    Prefix,
    /// Glob with `*` and `?` wildcards.
    Pattern,
}

impl MatchMode {
    const fn label(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Prefix => "prefix",
            Self::Pattern => "pattern",
        }
    }
}

/// A validated match rule.
///
/// The bit vocabulary (`EXACT`, `PREFIX`, ...) is the wire form used by callers
/// that store rules as integers; [`MatchRule::from_bits`] validates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchRule {
    mode: MatchMode,
    case_sensitive: bool,
    camel_case: bool,
    same_part_count: bool,
}

impl MatchRule {
    pub const EXACT: u32 = 0;
    pub const PREFIX: u32 = 0x1;
    pub const PATTERN: u32 = 0x2;
    pub const CASE_SENSITIVE: u32 = 0x8;
    pub const CAMEL_CASE: u32 = 0x80;
    pub const CAMEL_CASE_SAME_PART_COUNT: u32 = 0x100;

    const KNOWN_BITS: u32 = Self::PREFIX
        | Self::PATTERN
        | Self::CASE_SENSITIVE
        | Self::CAMEL_CASE
        | Self::CAMEL_CASE_SAME_PART_COUNT;

    /// Exact, case-sensitive matching. This is the rule of a blank pattern.
    pub const fn exact_case_sensitive() -> Self {
        Self::new(MatchMode::Exact, true)
    }

    /// A rule without camel-case matching. Always valid.
    pub const fn new(mode: MatchMode, case_sensitive: bool) -> Self {
        Self {
            mode,
            case_sensitive,
            camel_case: false,
            same_part_count: false,
        }
    }

    /// Enables camel-case matching on top of this rule.
    ///
    /// Camel case cannot be layered over glob patterns: a fragment containing
    /// wildcards has no humps to align.
    pub const fn with_camel_case(self, same_part_count: bool) -> Result<Self, PatternError> {
        if matches!(self.mode, MatchMode::Pattern) {
            return Err(PatternError::InvalidMatchRule {
                bits: self.bits() | Self::CAMEL_CASE,
                reason: "camel case cannot be combined with pattern matching",
            });
        }
        Ok(Self {
            camel_case: true,
            same_part_count,
            ..self
        })
    }

    /// Parses and validates the integer form of a rule.
    pub const fn from_bits(bits: u32) -> Result<Self, PatternError> {
        if bits & !Self::KNOWN_BITS != 0 {
            return Err(PatternError::InvalidMatchRule {
                bits,
                reason: "unknown match rule bits",
            });
        }
        let mode = match bits & (Self::PREFIX | Self::PATTERN) {
            Self::EXACT => MatchMode::Exact,
            Self::PREFIX => MatchMode::Prefix,
            Self::PATTERN => MatchMode::Pattern,
            _ => {
                return Err(PatternError::InvalidMatchRule {
                    bits,
                    reason: "prefix and pattern modes are mutually exclusive",
                });
            }
        };
        let camel_case = bits & Self::CAMEL_CASE != 0;
        let same_part_count = bits & Self::CAMEL_CASE_SAME_PART_COUNT != 0;
        if same_part_count && !camel_case {
            return Err(PatternError::InvalidMatchRule {
                bits,
                reason: "same part count requires camel case",
            });
        }

        let rule = Self::new(mode, bits & Self::CASE_SENSITIVE != 0);
        if camel_case {
            rule.with_camel_case(same_part_count)
        } else {
            Ok(rule)
        }
    }

    /// The integer form of this rule.
    pub const fn bits(self) -> u32 {
        let mut bits = match self.mode {
            MatchMode::Exact => Self::EXACT,
            MatchMode::Prefix => Self::PREFIX,
            MatchMode::Pattern => Self::PATTERN,
        };
        if self.case_sensitive {
            bits |= Self::CASE_SENSITIVE;
        }
        if self.camel_case {
            bits |= Self::CAMEL_CASE;
        }
        if self.same_part_count {
            bits |= Self::CAMEL_CASE_SAME_PART_COUNT;
        }
        bits
    }

    pub const fn mode(self) -> MatchMode {
        self.mode
    }

    pub const fn is_case_sensitive(self) -> bool {
        self.case_sensitive
    }

    pub const fn is_camel_case(self) -> bool {
        self.camel_case
    }

    /// Folds a stored name the way this rule compares it.
    ///
    /// Camel-case fragments keep their casing because humps are read from it.
    /// Folding is per character, the same as candidates get at match time.
    pub(crate) fn fold_simple_name(self, name: String) -> String {
        if self.case_sensitive || self.camel_case {
            name
        } else {
            fold(&name).collect()
        }
    }

    /// Folds a stored qualification the way this rule compares it.
    ///
    /// Under camel case the qualification keeps its casing, like simple names.
    pub(crate) fn fold_qualification(self, qualification: String) -> String {
        self.fold_simple_name(qualification)
    }

    /// Tests `name` against `pattern` under this rule.
    ///
    /// A `None` pattern is a wildcard and matches every name.
    pub fn matches_name(&self, pattern: Option<&str>, name: &str) -> bool {
        let Some(pattern) = pattern else {
            return true;
        };

        if self.camel_case && looks_like_camel_case(pattern) {
            if camel_case_match(pattern, name, self.same_part_count) {
                return true;
            }
            if self.case_sensitive {
                return false;
            }
            return self.matches_mode(pattern, name, false);
        }

        self.matches_mode(pattern, name, self.case_sensitive)
    }

    fn matches_mode(&self, pattern: &str, name: &str, case_sensitive: bool) -> bool {
        match self.mode {
            MatchMode::Exact => equals(pattern, name, case_sensitive),
            MatchMode::Prefix => {
                if pattern.is_empty() {
                    name.is_empty()
                } else {
                    starts_with(name, pattern, case_sensitive)
                }
            }
            MatchMode::Pattern => pattern.is_empty() || glob_match(pattern, name, case_sensitive),
        }
    }
}

impl Default for MatchRule {
    fn default() -> Self {
        Self::exact_case_sensitive()
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.same_part_count {
            f.write_str("camel case same part count match, ")?;
        } else if self.camel_case {
            f.write_str("camel case match, ")?;
        }
        write!(f, "{} match, ", self.mode.label())?;
        if self.case_sensitive {
            f.write_str("case sensitive")
        } else {
            f.write_str("case insensitive")
        }
    }
}

fn fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

fn equals(pattern: &str, name: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        pattern == name
    } else {
        fold(pattern).eq(fold(name))
    }
}

fn starts_with(name: &str, prefix: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        return name.starts_with(prefix);
    }
    let mut name_chars = fold(name);
    fold(prefix).all(|p| name_chars.next() == Some(p))
}

/// Glob match where `*` matches any run (including empty) and `?` exactly one char.
pub(crate) fn glob_match(pattern: &str, name: &str, case_sensitive: bool) -> bool {
    let (pattern, name): (Vec<char>, Vec<char>) = if case_sensitive {
        (pattern.chars().collect(), name.chars().collect())
    } else {
        (fold(pattern).collect(), fold(name).collect())
    };

    let (mut p, mut n) = (0, 0);
    // Position of the last `*` and the name index it was tried at.
    let mut star: Option<(usize, usize)> = None;

    while n < name.len() {
        match pattern.get(p) {
            Some('*') => {
                star = Some((p, n));
                p += 1;
            }
            Some(&c) if c == '?' || c == name[n] => {
                p += 1;
                n += 1;
            }
            _ => match star {
                Some((star_p, star_n)) => {
                    p = star_p + 1;
                    n = star_n + 1;
                    star = Some((star_p, n));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// Whether a fragment is shaped like a camel-case abbreviation (`NPE`, `HashM`).
pub(crate) fn looks_like_camel_case(fragment: &str) -> bool {
    !fragment.is_empty()
        && !fragment.contains(['*', '?'])
        && fragment.chars().any(char::is_uppercase)
}

/// Camel-case match of `pattern` against `name`.
///
/// Uppercase letters and digits in the pattern are anchors that must land on
/// the next hump of the name; only lowercase characters may be skipped to reach
/// it. Lowercase pattern characters must follow their anchor verbatim.
pub(crate) fn camel_case_match(pattern: &str, name: &str, same_part_count: bool) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    match (pattern.first(), name.first()) {
        (None, _) => return true,
        (Some(p), Some(n)) if p == n => {}
        _ => return false,
    }

    let (mut ip, mut in_) = (1, 1);
    loop {
        if ip == pattern.len() {
            // Remaining name characters must not start another hump.
            return !same_part_count || name[in_..].iter().all(|c| !c.is_uppercase());
        }
        if in_ == name.len() {
            return false;
        }

        let pc = pattern[ip];
        if pc == name[in_] {
            ip += 1;
            in_ += 1;
            continue;
        }
        if !pc.is_uppercase() && !pc.is_ascii_digit() {
            return false;
        }

        // Skip to the next hump and require it to be `pc`.
        loop {
            let Some(&nc) = name.get(in_) else {
                return false;
            };
            if nc.is_uppercase() {
                if nc != pc {
                    return false;
                }
                break;
            }
            if nc.is_ascii_digit() && nc == pc {
                break;
            }
            in_ += 1;
        }
        ip += 1;
        in_ += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_respects_case_flag() {
        let sensitive = MatchRule::new(MatchMode::Exact, true);
        let insensitive = MatchRule::new(MatchMode::Exact, false);
        assert!(sensitive.matches_name(Some("Foo"), "Foo"));
        assert!(!sensitive.matches_name(Some("Foo"), "foo"));
        assert!(insensitive.matches_name(Some("Foo"), "foo"));
        assert!(!insensitive.matches_name(Some("Foo"), "Food"));
    }

    #[test]
    fn test_prefix() {
        let rule = MatchRule::new(MatchMode::Prefix, false);
        assert!(rule.matches_name(Some("hash"), "HashMap"));
        assert!(!rule.matches_name(Some("map"), "HashMap"));
        assert!(rule.matches_name(Some(""), ""));
        assert!(!rule.matches_name(Some(""), "HashMap"));
    }

    #[test]
    fn test_glob() {
        assert!(glob_match("*Map", "HashMap", true));
        assert!(glob_match("H?sh*", "HashMap", true));
        assert!(glob_match("*", "", true));
        assert!(glob_match("a*b*c", "aXXbYYbc", true));
        assert!(!glob_match("a*b*c", "aXXbYYb", true));
        assert!(!glob_match("?", "", true));
        assert!(!glob_match("HashMap", "HashMapX", true));
        assert!(glob_match("*map", "HashMap", false));
    }

    #[test]
    fn test_empty_fragment_per_mode() {
        let pattern = MatchRule::new(MatchMode::Pattern, true);
        let exact = MatchRule::new(MatchMode::Exact, true);
        assert!(pattern.matches_name(Some(""), "Anything"));
        assert!(!exact.matches_name(Some(""), "Anything"));
        assert!(exact.matches_name(Some(""), ""));
    }

    #[test]
    fn test_none_fragment_is_wildcard() {
        for rule in [
            MatchRule::new(MatchMode::Exact, true),
            MatchRule::new(MatchMode::Prefix, false),
            MatchRule::new(MatchMode::Pattern, true),
        ] {
            assert!(rule.matches_name(None, "Whatever"));
        }
    }

    #[test]
    fn test_camel_case_humps() {
        assert!(camel_case_match("NPE", "NullPointerException", false));
        assert!(camel_case_match("NuPoE", "NullPointerException", false));
        assert!(!camel_case_match("NPE", "NotAPointerEvent", false));
        assert!(!camel_case_match("NPE", "NullException", false));
        assert!(camel_case_match("HM", "HashMapEntry", false));
        assert!(!camel_case_match("HM", "HashMapEntry", true));
        assert!(camel_case_match("HME", "HashMapEntry", true));
        assert!(camel_case_match("IO2E", "IO2Exception", false));
    }

    #[test]
    fn test_camel_case_fallback() {
        let strict = MatchRule::new(MatchMode::Prefix, true)
            .with_camel_case(false)
            .unwrap();
        let loose = MatchRule::new(MatchMode::Prefix, false)
            .with_camel_case(false)
            .unwrap();
        assert!(strict.matches_name(Some("NPE"), "NullPointerException"));
        assert!(!strict.matches_name(Some("NPE"), "npeHelper"));
        assert!(loose.matches_name(Some("NPE"), "npeHelper"));
        // All-lowercase fragments never use camel case.
        assert!(strict.matches_name(Some("null"), "nullable"));
    }

    #[test]
    fn test_rule_validation() {
        assert!(MatchRule::from_bits(MatchRule::PATTERN | MatchRule::CAMEL_CASE).is_err());
        assert!(MatchRule::from_bits(MatchRule::PREFIX | MatchRule::PATTERN).is_err());
        assert!(MatchRule::from_bits(MatchRule::CAMEL_CASE_SAME_PART_COUNT).is_err());
        assert!(MatchRule::from_bits(0x4000).is_err());

        let bits = MatchRule::PREFIX | MatchRule::CASE_SENSITIVE | MatchRule::CAMEL_CASE;
        let rule = MatchRule::from_bits(bits).unwrap();
        assert_eq!(rule.mode(), MatchMode::Prefix);
        assert!(rule.is_case_sensitive());
        assert!(rule.is_camel_case());
        assert_eq!(rule.bits(), bits);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            MatchRule::exact_case_sensitive().to_string(),
            "exact match, case sensitive"
        );
        let rule = MatchRule::new(MatchMode::Prefix, false)
            .with_camel_case(false)
            .unwrap();
        assert_eq!(rule.to_string(), "camel case match, prefix match, case insensitive");
    }
}
