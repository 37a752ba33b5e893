//! Compiled tokenizer rules.
//!
//! A rule table is an ordered list of `(name, pattern)` pairs. Names wrapped
//! in underscores (`_CHR_`) declare macros: they never match on their own,
//! their pattern text is substituted into every later pattern that mentions
//! the name. Each remaining rule is compiled anchored at the start of the
//! input, so matching a rule means matching a prefix of what is left of the
//! line.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::config::{RuleSpec, TokenizerConfig};
use crate::error::{Result, TermflowError};

/// Name of the synthetic whitespace rule.
pub const WHITESPACE_RULE: &str = "SPAC";

/// Name of the catch-all rule.
pub const CATCH_ALL_RULE: &str = "ANY";

const WHITESPACE_PATTERN: &str = r"\s+";
const CATCH_ALL_PATTERN: &str = r"(?s).";

static MACRO_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^_[A-Za-z][A-Za-z0-9]*_$").unwrap());
static MACRO_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_[A-Z][A-Z0-9]*_").unwrap());

/// Whether a rule name declares a macro.
pub fn is_macro_name(name: &str) -> bool {
    MACRO_NAME.is_match(name)
}

/// One compiled tokenizer rule.
#[derive(Clone, Debug)]
pub struct TokenRule {
    name: String,
    pattern: Regex,
    is_macro: bool,
}

impl TokenRule {
    /// Compile a rule anchored at the start of the input.
    pub fn new<S: Into<String>>(name: S, pattern: &str) -> Result<Self> {
        let name = name.into();
        let anchored = format!("^(?:{pattern})");
        let regex = Regex::new(&anchored).map_err(|e| {
            TermflowError::config(format!("Invalid pattern for tokenizer rule '{name}': {e}"))
        })?;
        Ok(TokenRule {
            is_macro: is_macro_name(&name),
            name,
            pattern: regex,
        })
    }

    /// Rule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Anchored pattern text.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Whether this rule is a macro definition.
    pub fn is_macro(&self) -> bool {
        self.is_macro
    }

    /// Length in bytes of the non-empty prefix of `input` this rule matches.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.pattern
            .find(input)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }
}

/// An ordered, compiled rule table.
#[derive(Clone, Debug)]
pub struct RuleSet {
    rules: Vec<TokenRule>,
}

impl RuleSet {
    /// Compile the rule table of a tokenizer configuration.
    ///
    /// Macros are expanded in declaration order; a `SPAC` rule is prepended
    /// when missing and an `ANY` catch-all is appended unless the last rule
    /// already matches any single character.
    pub fn compile(config: &TokenizerConfig) -> Result<Self> {
        if config.rules.is_empty() {
            return Err(TermflowError::config("Tokenizer rule table is empty"));
        }

        let mut macros: Vec<(String, String)> = Vec::new();
        let mut specs: Vec<RuleSpec> = Vec::with_capacity(config.rules.len() + 2);

        for spec in &config.rules {
            let expanded = expand_macros(&spec.pattern, &macros);
            if let Some(undefined) = MACRO_REFERENCE.find(&expanded) {
                return Err(TermflowError::config(format!(
                    "Tokenizer rule '{}' references undefined macro '{}'",
                    spec.name,
                    undefined.as_str()
                )));
            }
            if is_macro_name(&spec.name) {
                macros.push((spec.name.clone(), expanded));
            } else {
                specs.push(RuleSpec::new(spec.name.clone(), expanded));
            }
        }

        if !specs.iter().any(|spec| spec.name == WHITESPACE_RULE) {
            specs.insert(0, RuleSpec::new(WHITESPACE_RULE, WHITESPACE_PATTERN));
        }
        if specs.last().map(|spec| spec.pattern.as_str()) != Some(CATCH_ALL_PATTERN) {
            specs.push(RuleSpec::new(CATCH_ALL_RULE, CATCH_ALL_PATTERN));
        }

        let rules = specs
            .iter()
            .map(|spec| TokenRule::new(spec.name.clone(), &spec.pattern))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "compiled {} tokenizer rules ({} macros)",
            rules.len(),
            macros.len()
        );
        Ok(RuleSet { rules })
    }

    /// Rules in matching order (macros excluded).
    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }

    /// First rule matching a non-empty prefix of `input`, with the match length.
    pub fn first_match(&self, input: &str) -> Option<(&TokenRule, usize)> {
        self.rules
            .iter()
            .find_map(|rule| rule.match_len(input).map(|len| (rule, len)))
    }
}

fn expand_macros(pattern: &str, macros: &[(String, String)]) -> String {
    macros
        .iter()
        .fold(pattern.to_string(), |acc, (name, body)| acc.replace(name, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rules: &[(&str, &str)]) -> TokenizerConfig {
        TokenizerConfig {
            rules: rules.iter().map(|(n, p)| RuleSpec::new(*n, *p)).collect(),
            emit_whitespace: false,
        }
    }

    #[test]
    fn test_macro_expansion() {
        let set = RuleSet::compile(&config(&[
            ("_CHR_", r"[a-z]"),
            ("_SYL_", r"_CHR_{2}"),
            ("WORD", r"(?:_SYL_)+"),
        ]))
        .unwrap();

        let names: Vec<&str> = set.rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["SPAC", "WORD", "ANY"]);
        assert_eq!(set.rules()[1].pattern(), r"^(?:(?:[a-z]{2})+)");
        assert!(set.rules().iter().all(|r| !r.is_macro()));
    }

    #[test]
    fn test_undefined_macro_is_rejected() {
        let error = RuleSet::compile(&config(&[("WORD", r"_CHR_+"), ("_CHR_", r"\w")]))
            .unwrap_err();
        assert!(error.to_string().contains("_CHR_"));
    }

    #[test]
    fn test_partial_any_rule_gets_a_catch_all() {
        let set = RuleSet::compile(&config(&[("WORD", r"[a-z]+"), ("ANY", r"\d")])).unwrap();

        let names: Vec<&str> = set.rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["SPAC", "WORD", "ANY", "ANY"]);
        assert_eq!(set.rules()[3].pattern(), r"^(?:(?s).)");

        let set = RuleSet::compile(&config(&[("WORD", r"[a-z]+"), ("REST", r"(?s).")])).unwrap();
        assert_eq!(set.rules().last().unwrap().name(), "REST");
    }

    #[test]
    fn test_empty_table_is_rejected() {
        assert!(RuleSet::compile(&config(&[])).unwrap_err().is_config());
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let error = RuleSet::compile(&config(&[("WORD", r"[a-z")])).unwrap_err();
        assert!(error.to_string().contains("WORD"));
    }

    #[test]
    fn test_catch_all_not_duplicated() {
        let set = RuleSet::compile(&config(&[("WORD", r"\w+"), ("ANY", r"(?s).")])).unwrap();
        let any_rules = set.rules().iter().filter(|r| r.name() == "ANY").count();
        assert_eq!(any_rules, 1);
    }

    #[test]
    fn test_first_match_is_ordered() {
        let set = RuleSet::compile(&config(&[("NUMS", r"\d+"), ("WORD", r"\w+")])).unwrap();

        let (rule, len) = set.first_match("123abc").unwrap();
        assert_eq!((rule.name(), len), ("NUMS", 3));

        let (rule, len) = set.first_match("abc123").unwrap();
        assert_eq!((rule.name(), len), ("WORD", 6));

        let (rule, len) = set.first_match("§x").unwrap();
        assert_eq!((rule.name(), len), ("ANY", '§'.len_utf8()));
    }

    #[test]
    fn test_empty_matches_are_skipped() {
        let set = RuleSet::compile(&config(&[("OPT", r"x*"), ("WORD", r"\w+")])).unwrap();
        let (rule, _) = set.first_match("abc").unwrap();
        assert_eq!(rule.name(), "WORD");
    }
}
