//! Integration tests for tokenizer and stemmer configurations

use termflow::analysis::dictionary::{Dictionary, MemoryLexicon};
use termflow::analysis::stemmer::{PorterStemmer, Stemmer};
use termflow::analysis::tokenizer::RuleTokenizer;
use termflow::config::{
    LexiconConfig, PorterConfig, RuleGroupSpec, RuleSpec, SequencerConfig, TermflowConfig,
    TokenizerConfig,
};
use termflow::error::Result;
use termflow::stages::Sequencer;

const LINES: [&str; 6] = [
    "Die automatische Indexierung, z.B. 1.000 Mal!",
    "Siehe https://example.org/index.html (Seite 3).",
    "  leading and trailing  ",
    "¿Qué? «Zitat» — 12,5% ±0",
    "tab\tseparated\u{00a0}nbsp",
    "x",
];

#[test]
fn test_default_configurations_build() -> Result<()> {
    let tokenizer = RuleTokenizer::new(&TokenizerConfig::default())?;
    assert_eq!(tokenizer.rules().rules().last().unwrap().name(), "ANY");

    let stemmer = PorterStemmer::from_config(&PorterConfig::default())?;
    assert_eq!(stemmer.stem("ponies"), "poni");

    let sequencer = Sequencer::stage(&SequencerConfig::default())?;
    assert_eq!(sequencer.policy().patterns().len(), 3);

    let lexicon_config = LexiconConfig {
        entries: vec![("connection".to_string(), vec!["connection#s".to_string()])],
        ..LexiconConfig::default()
    };
    assert!(lexicon_config.stemming);
    let lexicon = MemoryLexicon::from_config(&lexicon_config, &PorterConfig::default())?;
    let word = lexicon.find_word("connected");
    assert_eq!(word.lexicals()[0].form, "connection");
    Ok(())
}

#[test]
fn test_tokenizer_consumes_every_line() -> Result<()> {
    let config = TokenizerConfig {
        emit_whitespace: true,
        ..TokenizerConfig::default()
    };
    let tokenizer = RuleTokenizer::new(&config)?;

    for line in LINES {
        let tokens = tokenizer.tokenize_line(line);
        let total: usize = tokens.iter().map(|token| token.len()).sum();
        assert_eq!(total, line.len(), "line {line:?}");

        let rebuilt: String = tokens.iter().map(|token| token.text()).collect();
        assert_eq!(rebuilt, line);
    }
    Ok(())
}

#[test]
fn test_tokenizer_is_deterministic() -> Result<()> {
    let tokenizer = RuleTokenizer::default_rules()?;
    for line in LINES {
        assert_eq!(tokenizer.tokenize_line(line), tokenizer.tokenize_line(line));
    }
    Ok(())
}

#[test]
fn test_tokenizer_from_json_with_macros() -> Result<()> {
    let config = TermflowConfig::from_json_str(
        r#"{
            "tokenizer": {
                "rules": [
                    { "name": "_DIGIT_", "pattern": "[0-9]" },
                    { "name": "_YEAR_", "pattern": "_DIGIT_{4}" },
                    { "name": "DATE", "pattern": "_YEAR_-_DIGIT_{2}-_DIGIT_{2}" },
                    { "name": "WORD", "pattern": "\\w+" }
                ]
            }
        }"#,
    )?;
    let tokenizer = RuleTokenizer::new(&config.tokenizer)?;

    let tokens = tokenizer.tokenize_line("am 2024-05-17 erschienen");
    let rules: Vec<&str> = tokens.iter().map(|token| token.rule()).collect();
    assert_eq!(rules, vec!["WORD", "DATE", "WORD"]);
    assert_eq!(tokens[1].text(), "2024-05-17");
    Ok(())
}

#[test]
fn test_undefined_macro_is_rejected() {
    let config = TokenizerConfig {
        rules: vec![RuleSpec::new("WORD", "_LETTER_+")],
        emit_whitespace: false,
    };
    let error = RuleTokenizer::new(&config).unwrap_err();
    assert!(error.is_config());
}

#[test]
fn test_porter_known_cases() {
    let stemmer = PorterStemmer::new();
    for (word, stem) in [
        ("caresses", "caress"),
        ("ponies", "poni"),
        ("agreed", "agree"),
        ("feed", "feed"),
        ("motoring", "motor"),
        ("sing", "sing"),
    ] {
        assert_eq!(stemmer.stem(word), stem, "{word}");
    }
}

#[test]
fn test_porter_leaves_minimal_stems_alone() {
    let stemmer = PorterStemmer::new();
    for word in ["sing", "tree", "run", "book", "cat"] {
        assert_eq!(stemmer.try_stem(word), None, "{word}");
    }
}

#[test]
fn test_porter_default_table_from_json() -> Result<()> {
    let config = TermflowConfig::from_json_str("{}")?;
    let stemmer = PorterStemmer::from_config(&config.stemmer)?;
    assert_eq!(stemmer.stem("caresses"), "caress");
    assert_eq!(stemmer.stem("agreed"), "agree");
    Ok(())
}

#[test]
fn test_tokenizer_partial_any_rule_is_total() -> Result<()> {
    let config = TokenizerConfig {
        rules: vec![RuleSpec::new("WORD", "[a-z]+"), RuleSpec::new("ANY", r"\d")],
        emit_whitespace: true,
    };
    let tokenizer = RuleTokenizer::new(&config)?;

    for line in LINES {
        let total: usize = tokenizer.tokenize_line(line).iter().map(|token| token.len()).sum();
        assert_eq!(total, line.len(), "line {line:?}");
    }
    Ok(())
}

#[test]
fn test_porter_table_from_json() -> Result<()> {
    let config = TermflowConfig::from_json_str(
        r#"{
            "stemmer": {
                "groups": [
                    { "label": "DIMINUTIVE", "rules": ["(*v*) CHEN -> goto(DONE)"] },
                    { "label": "PLURAL", "rules": ["(*v*) EN -> ", "(m>0) E -> "] },
                    { "label": "DONE", "rules": [] }
                ]
            }
        }"#,
    )?;
    let stemmer = PorterStemmer::from_config(&config.stemmer)?;

    assert_eq!(stemmer.stem("frauen"), "frau");
    assert_eq!(stemmer.stem("häuschen"), "häus");
    assert_eq!(stemmer.stem("hunde"), "hund");
    Ok(())
}

#[test]
fn test_porter_rejects_backward_jump() {
    let config = PorterConfig {
        groups: vec![
            RuleGroupSpec::new("A", &["S -> "]),
            RuleGroupSpec::new("B", &["(m>0) X -> goto(A)"]),
        ],
    };
    assert!(PorterStemmer::from_config(&config).unwrap_err().is_config());
}
