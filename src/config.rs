//! Configuration for the indexing pipeline.
//!
//! All sections deserialize from JSON and fall back to their defaults when
//! omitted, so an empty object `{}` is a complete, working configuration:
//!
//! ```
//! use termflow::config::TermflowConfig;
//!
//! let config = TermflowConfig::from_json_str("{}").unwrap();
//! assert_eq!(config.word_rules, vec!["WORD".to_string()]);
//! assert_eq!(config.sequencer.stopper, vec!["PUNC".to_string(), "OTHR".to_string()]);
//! ```
//!
//! Rule tables are ordered lists rather than maps because declaration order
//! is part of their meaning.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TermflowError};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TermflowConfig {
    /// Tokenizer rule table
    pub tokenizer: TokenizerConfig,
    /// Porter rule table
    pub stemmer: PorterConfig,
    /// Sequence synthesizer patterns
    pub sequencer: SequencerConfig,
    /// In-memory lexicon
    pub lexicon: LexiconConfig,
    /// Token rules whose tokens are looked up in the lexicon
    pub word_rules: Vec<String>,
}

impl Default for TermflowConfig {
    fn default() -> Self {
        TermflowConfig {
            tokenizer: TokenizerConfig::default(),
            stemmer: PorterConfig::default(),
            sequencer: SequencerConfig::default(),
            lexicon: LexiconConfig::default(),
            word_rules: vec!["WORD".to_string()],
        }
    }
}

impl TermflowConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| TermflowError::config(format!("Failed to parse configuration: {e}")))
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TermflowError::config(format!(
                "Failed to read configuration file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }
}

/// A named tokenizer rule. Names of the form `_NAME_` declare macros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Rule name, becomes the token's rule tag
    pub name: String,
    /// Regular expression matched at the start of the remaining input
    pub pattern: String,
}

impl RuleSpec {
    /// Create a new rule specification.
    pub fn new<N: Into<String>, P: Into<String>>(name: N, pattern: P) -> Self {
        RuleSpec {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// Tokenizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Ordered rule list, first match wins
    pub rules: Vec<RuleSpec>,
    /// Whether whitespace tokens are forwarded
    pub emit_whitespace: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        let rules = [
            ("SPAC", r"\s+"),
            ("_CHR_", r"[\p{L}\p{N}]"),
            ("URLS", r"(?:(?:https?|ftp)://|www\.)[^\s<>]+[^\s<>.,;:!?)]"),
            ("NUMS", r"[+-]?(?:\d{4,}|\d{1,3}(?:\.\d{3})*)(?:,\d+)?%?"),
            ("ABRV", r"(?:(?:_CHR_)+\.)+(?:_CHR_)+"),
            ("WORD", r"(?:_CHR_)(?:_CHR_|[-'])*"),
            ("PUNC", r"[!,.:;?¡¿]+"),
            (
                "OTHR",
                r#"["$#%&'()*+\-/<=>@\[\\\]^_{|}~¢£¤¥¦§¨©ª«¬®¯°±²³´µ¶·¸¹º»¼½¾×÷„“”‘’–—]"#,
            ),
            ("ANY", r"(?s)."),
        ];
        TokenizerConfig {
            rules: rules
                .iter()
                .map(|(name, pattern)| RuleSpec::new(*name, *pattern))
                .collect(),
            emit_whitespace: false,
        }
    }
}

/// A labelled group of Porter rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleGroupSpec {
    /// Group label, the target of `goto(LABEL)`
    pub label: String,
    /// Rules in the stemmer mini-language
    pub rules: Vec<String>,
}

impl RuleGroupSpec {
    /// Create a new group specification.
    pub fn new<S: Into<String>>(label: S, rules: &[&str]) -> Self {
        RuleGroupSpec {
            label: label.into(),
            rules: rules.iter().map(|rule| rule.to_string()).collect(),
        }
    }
}

/// Porter stemmer configuration: ordered rule groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PorterConfig {
    /// Groups in declaration order
    pub groups: Vec<RuleGroupSpec>,
}

impl Default for PorterConfig {
    /// The English Porter rule table.
    fn default() -> Self {
        let groups = vec![
            // Step 1a
            RuleGroupSpec::new("S100", &["SSES -> SS", "IES -> I", "SS -> SS", "S -> "]),
            // Step 1b
            RuleGroupSpec::new(
                "S110",
                &[
                    "(m>0) EED -> EE goto(S120)",
                    "EED -> EED goto(S120)",
                    "(*v*) ED -> goto(S111)",
                    "(*v*) ING -> goto(S111)",
                    "goto(S120)",
                ],
            ),
            RuleGroupSpec::new(
                "S111",
                &[
                    "AT -> ATE",
                    "BL -> BLE",
                    "IZ -> IZE",
                    "(*d and not (*L or *S or *Z)) -> -1",
                    "(m=1 and *o) -> E",
                ],
            ),
            // Step 1c
            RuleGroupSpec::new("S120", &["(*v*) Y -> I"]),
            // Step 2
            RuleGroupSpec::new(
                "S200",
                &[
                    "(m>0) ATIONAL -> ATE",
                    "(m>0) TIONAL -> TION",
                    "(m>0) ENCI -> ENCE",
                    "(m>0) ANCI -> ANCE",
                    "(m>0) IZER -> IZE",
                    "(m>0) ABLI -> ABLE",
                    "(m>0) ALLI -> AL",
                    "(m>0) ENTLI -> ENT",
                    "(m>0) ELI -> E",
                    "(m>0) OUSLI -> OUS",
                    "(m>0) IZATION -> IZE",
                    "(m>0) ATION -> ATE",
                    "(m>0) ATOR -> ATE",
                    "(m>0) ALISM -> AL",
                    "(m>0) IVENESS -> IVE",
                    "(m>0) FULNESS -> FUL",
                    "(m>0) OUSNESS -> OUS",
                    "(m>0) ALITI -> AL",
                    "(m>0) IVITI -> IVE",
                    "(m>0) BILITI -> BLE",
                ],
            ),
            // Step 3
            RuleGroupSpec::new(
                "S300",
                &[
                    "(m>0) ICATE -> IC",
                    "(m>0) ATIVE -> ",
                    "(m>0) ALIZE -> AL",
                    "(m>0) ICITI -> IC",
                    "(m>0) ICAL -> IC",
                    "(m>0) FUL -> ",
                    "(m>0) NESS -> ",
                ],
            ),
            // Step 4
            RuleGroupSpec::new(
                "S400",
                &[
                    "(m>1) AL -> ",
                    "(m>1) ANCE -> ",
                    "(m>1) ENCE -> ",
                    "(m>1) ER -> ",
                    "(m>1) IC -> ",
                    "(m>1) ABLE -> ",
                    "(m>1) IBLE -> ",
                    "(m>1) ANT -> ",
                    "(m>1) EMENT -> ",
                    "(m>1) MENT -> ",
                    "(m>1) ENT -> ",
                    "(m>1 and (*S or *T)) ION -> ",
                    "(m>1) OU -> ",
                    "(m>1) ISM -> ",
                    "(m>1) ATE -> ",
                    "(m>1) ITI -> ",
                    "(m>1) OUS -> ",
                    "(m>1) IVE -> ",
                    "(m>1) IZE -> ",
                ],
            ),
            // Step 5a
            RuleGroupSpec::new(
                "S500",
                &["(m>1) E -> ", "(m=1 and not *o and not *e) E -> "],
            ),
            // Step 5b
            RuleGroupSpec::new("S510", &["(m>1 and *d and *L) -> -1"]),
        ];
        PorterConfig { groups }
    }
}

/// A class pattern and the phrase format it produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceSpec {
    /// One word class code per position, e.g. `"as"`
    pub classes: String,
    /// Output format with placeholders `1..k`, e.g. `"2, 1"`
    pub format: String,
}

impl SequenceSpec {
    /// Create a new sequence specification.
    pub fn new<C: Into<String>, F: Into<String>>(classes: C, format: F) -> Self {
        SequenceSpec {
            classes: classes.into(),
            format: format.into(),
        }
    }
}

/// Sequence synthesizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Token rules that end a scan window
    pub stopper: Vec<String>,
    /// Patterns, tried in order
    pub sequences: Vec<SequenceSpec>,
    /// Upper bound on class signatures expanded per flush
    pub max_signatures: usize,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        SequencerConfig {
            stopper: vec!["PUNC".to_string(), "OTHR".to_string()],
            sequences: vec![
                SequenceSpec::new("as", "2, 1"),
                SequenceSpec::new("ss", "1 2"),
                SequenceSpec::new("sss", "1 2 3"),
            ],
            max_signatures: 4096,
        }
    }
}

/// In-memory lexicon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Word form to readings written as `"lexical#class"`
    pub entries: Vec<(String, Vec<String>)>,
    /// Synonym groups; every member is a synonym of every other member
    pub synonyms: Vec<Vec<String>>,
    /// Look up the Porter stem when the exact form is missing
    pub stemming: bool,
    /// Shortest part accepted when splitting compounds
    pub min_part_length: usize,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        LexiconConfig {
            entries: Vec::new(),
            synonyms: Vec::new(),
            stemming: true,
            min_part_length: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let config = TermflowConfig::from_json_str("{}").unwrap();
        assert_eq!(config.stemmer.groups.len(), 9);
        assert_eq!(config.stemmer.groups[0].label, "S100");
        assert!(!config.tokenizer.emit_whitespace);
        assert_eq!(config.tokenizer.rules.last().unwrap().name, "ANY");
        assert!(config.lexicon.stemming);
    }

    #[test]
    fn test_partial_sections() {
        let json = r#"{
            "sequencer": { "sequences": [ { "classes": "as", "format": "2, 1" } ] },
            "lexicon": { "entries": [ ["haus", ["haus#s"]] ], "stemming": false }
        }"#;
        let config = TermflowConfig::from_json_str(json).unwrap();

        assert_eq!(config.sequencer.sequences, vec![SequenceSpec::new("as", "2, 1")]);
        assert_eq!(config.sequencer.stopper, vec!["PUNC", "OTHR"]);
        assert_eq!(config.sequencer.max_signatures, 4096);
        assert_eq!(config.lexicon.entries[0].0, "haus");
        assert!(!config.lexicon.stemming);
        assert_eq!(config.lexicon.min_part_length, 3);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let error = TermflowConfig::from_json_str("{ not json").unwrap_err();
        assert!(error.is_config());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("termflow.json");
        std::fs::write(&path, r#"{ "word_rules": ["WORD", "ABRV"] }"#).unwrap();

        let config = TermflowConfig::from_file(&path).unwrap();
        assert_eq!(config.word_rules, vec!["WORD", "ABRV"]);

        let missing = TermflowConfig::from_file(dir.path().join("missing.json"));
        assert!(missing.unwrap_err().is_config());
    }
}
