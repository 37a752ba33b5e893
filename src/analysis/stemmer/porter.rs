//! Porter stemming as an interpreted rule table.
//!
//! # Algorithm
//!
//! Groups are visited once, in declaration order. Inside a group the rules
//! are tried in order until one fires:
//!
//! - a bare `goto(L)` sets `L` as pending jump target and ends the group;
//! - a suffix rule fires when the word ends with its suffix and its guard
//!   holds for the remaining stem. The word is rewritten, the word counts as
//!   stemmed, the rule's jump target (if any) becomes pending and the group
//!   ends.
//!
//! While a jump is pending every group other than its target is skipped.
//! Jumps may only point forward, which keeps the traversal a single pass.
//!
//! The default table ([`PorterConfig::default`]) encodes the five steps of
//! the classical algorithm.

use log::debug;

use super::Stemmer;
use super::rule::{RuleGroup, StemRule};
use crate::config::PorterConfig;
use crate::error::{Result, TermflowError};

/// Words up to this many characters are never stemmed.
const MIN_STEM_INPUT: usize = 2;

/// Rule-driven Porter stemmer.
#[derive(Debug, Clone)]
pub struct PorterStemmer {
    groups: Vec<RuleGroup>,
}

impl PorterStemmer {
    /// Create a stemmer with the English rule table.
    pub fn new() -> Self {
        Self::from_config(&PorterConfig::default())
            .expect("Default Porter rule table should be valid")
    }

    /// Build a stemmer from a rule table, validating it eagerly.
    pub fn from_config(config: &PorterConfig) -> Result<Self> {
        if config.groups.is_empty() {
            return Err(TermflowError::config("Stemmer rule table is empty"));
        }

        let groups = config
            .groups
            .iter()
            .map(RuleGroup::parse)
            .collect::<Result<Vec<_>>>()?;

        for (index, group) in groups.iter().enumerate() {
            if groups[..index].iter().any(|g| g.label() == group.label()) {
                return Err(TermflowError::config(format!(
                    "Duplicate stemmer group '{}'",
                    group.label()
                )));
            }
            for target in group.rules().iter().filter_map(StemRule::jump_target) {
                if !groups[index + 1..].iter().any(|g| g.label() == target) {
                    return Err(TermflowError::config(format!(
                        "Stemmer group '{}' jumps to '{}', which is not a later group",
                        group.label(),
                        target
                    )));
                }
            }
        }

        debug!("compiled {} stemmer rule groups", groups.len());
        Ok(PorterStemmer { groups })
    }

    /// Rule groups in declaration order.
    pub fn groups(&self) -> &[RuleGroup] {
        &self.groups
    }

    /// Stem a word, returning `None` when no rule fired.
    pub fn try_stem(&self, word: &str) -> Option<String> {
        if word.chars().count() <= MIN_STEM_INPUT {
            return None;
        }

        let mut word = word.to_lowercase();
        let mut found = false;
        let mut pending: Option<&str> = None;

        for group in &self.groups {
            if let Some(target) = pending {
                if target != group.label() {
                    continue;
                }
                pending = None;
            }

            for rule in group.rules() {
                match rule {
                    StemRule::Jump(target) => {
                        pending = Some(target.as_str());
                        break;
                    }
                    StemRule::Suffix(suffix_rule) => {
                        if let Some(rewritten) = suffix_rule.apply(&word) {
                            word = rewritten;
                            found = true;
                            pending = suffix_rule.jump();
                            break;
                        }
                    }
                }
            }
        }

        found.then_some(word)
    }
}

impl Default for PorterStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        self.try_stem(word).unwrap_or_else(|| word.to_lowercase())
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleGroupSpec;

    #[test]
    fn test_default_table_is_valid() {
        let stemmer = PorterStemmer::from_config(&PorterConfig::default()).unwrap();
        assert_eq!(stemmer.groups.len(), PorterConfig::default().groups.len());
    }

    #[test]
    fn test_known_cases() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("caresses"), "caress");
        assert_eq!(stemmer.stem("ponies"), "poni");
        assert_eq!(stemmer.stem("agreed"), "agree");
        assert_eq!(stemmer.stem("feed"), "feed");
        assert_eq!(stemmer.stem("motoring"), "motor");
        assert_eq!(stemmer.stem("sing"), "sing");
    }

    #[test]
    fn test_full_algorithm() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("hopping"), "hop");
        assert_eq!(stemmer.stem("filing"), "file");
        assert_eq!(stemmer.stem("conflated"), "conflat");
        assert_eq!(stemmer.stem("happy"), "happi");
        assert_eq!(stemmer.stem("relational"), "relat");
        assert_eq!(stemmer.stem("hopeful"), "hope");
        assert_eq!(stemmer.stem("adoption"), "adopt");
        assert_eq!(stemmer.stem("controlling"), "control");
        assert_eq!(stemmer.stem("generalization"), "gener");
    }

    #[test]
    fn test_no_rule_leaves_word_unchanged() {
        let stemmer = PorterStemmer::new();
        assert_eq!(stemmer.try_stem("sing"), None);
        assert_eq!(stemmer.try_stem("at"), None);
        assert_eq!(stemmer.stem("Sky"), "sky");
    }

    #[test]
    fn test_input_is_case_insensitive() {
        let stemmer = PorterStemmer::new();
        assert_eq!(stemmer.stem("CARESSES"), "caress");
    }

    #[test]
    fn test_jump_skips_groups() {
        let config = PorterConfig {
            groups: vec![
                RuleGroupSpec::new("A", &["X -> goto(C)"]),
                RuleGroupSpec::new("B", &["Y -> Z"]),
                RuleGroupSpec::new("C", &["W -> V"]),
            ],
        };
        let stemmer = PorterStemmer::from_config(&config).unwrap();

        // "abyx": A strips x and jumps over B, so y survives
        assert_eq!(stemmer.try_stem("abyx").as_deref(), Some("aby"));
        // without the jump B applies
        assert_eq!(stemmer.try_stem("aby").as_deref(), Some("abz"));
        // C runs after the jump target is reached
        assert_eq!(stemmer.try_stem("abwx").as_deref(), Some("abv"));
    }

    #[test]
    fn test_invalid_tables() {
        let empty = PorterConfig { groups: vec![] };
        assert!(PorterStemmer::from_config(&empty).is_err());

        let backwards = PorterConfig {
            groups: vec![
                RuleGroupSpec::new("A", &["S -> "]),
                RuleGroupSpec::new("B", &["goto(A)"]),
            ],
        };
        assert!(PorterStemmer::from_config(&backwards).is_err());

        let unknown = PorterConfig {
            groups: vec![RuleGroupSpec::new("A", &["S -> goto(Q)"])],
        };
        assert!(PorterStemmer::from_config(&unknown).is_err());

        let duplicate = PorterConfig {
            groups: vec![
                RuleGroupSpec::new("A", &["S -> "]),
                RuleGroupSpec::new("A", &["X -> "]),
            ],
        };
        assert!(PorterStemmer::from_config(&duplicate).is_err());
    }

    #[test]
    fn test_stemmer_name() {
        assert_eq!(PorterStemmer::new().name(), "porter");
    }
}
