//! Command implementations for the termflow CLI.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use log::{debug, error, info};

use crate::analysis::stemmer::PorterStemmer;
use crate::analysis::tokenizer::RuleTokenizer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::TermflowConfig;
use crate::error::Result;
use crate::pipeline::{Item, build};

/// Execute a CLI command.
pub fn execute_command(args: TermflowArgs) -> Result<()> {
    match &args.command {
        Command::Index(index_args) => index_file(index_args, &args),
        Command::Stem(stem_args) => stem_words(stem_args, &args),
        Command::Tokenize(tokenize_args) => tokenize_file(tokenize_args, &args),
    }
}

/// Load the configuration file, or the defaults when none is given.
fn load_config(path: Option<&Path>) -> Result<TermflowConfig> {
    match path {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            TermflowConfig::from_file(path)
        }
        None => Ok(TermflowConfig::default()),
    }
}

fn read_input(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file '{}'", path.display()))?;
    Ok(text)
}

/// Split text into records at blank lines.
pub fn split_records(text: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                records.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        records.push(current.join("\n"));
    }
    records
}

/// Run the indexing pipeline over a file.
fn index_file(args: &IndexArgs, cli_args: &TermflowArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let text = read_input(&args.input)?;
    let source = args.input.display().to_string();

    let mut items: Vec<Item> = Vec::new();
    let mut pipeline = match build(&config, &mut items) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            for item in &items {
                error!("{item}");
            }
            return Err(e);
        }
    };

    let start_time = Instant::now();
    if args.records {
        pipeline.process_records(&source, split_records(&text), &mut items)?;
    } else {
        pipeline.process_text(&source, &text, &mut items)?;
    }
    let duration = start_time.elapsed();
    info!("indexed {} in {:?}, {} items", source, duration, items.len());

    let report = args.report.then(|| {
        pipeline
            .report()
            .into_iter()
            .map(|(stage, counters)| StageReport { stage, counters })
            .collect()
    });

    output_result(
        &format!("Indexed {source}"),
        &IndexResult {
            source: source.clone(),
            items,
            duration_ms: duration.as_millis() as u64,
            report,
        },
        cli_args,
    )
}

/// Stem words with the configured rule table.
fn stem_words(args: &StemArgs, cli_args: &TermflowArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let stemmer = PorterStemmer::from_config(&config.stemmer)?;

    let stems = args
        .words
        .iter()
        .map(|word| {
            let stem = stemmer.try_stem(word);
            StemResult {
                word: word.clone(),
                changed: stem.is_some(),
                stem: stem.unwrap_or_else(|| word.to_lowercase()),
            }
        })
        .collect();

    output_result("Stems", &StemResults { stems }, cli_args)
}

/// Tokenize every line of a file.
fn tokenize_file(args: &TokenizeArgs, cli_args: &TermflowArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let tokenizer = RuleTokenizer::new(&config.tokenizer)?;
    let text = read_input(&args.input)?;

    let lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| TokenizedLine {
            line: index + 1,
            tokens: tokenizer.tokenize_line(line),
        })
        .collect();

    output_result(
        "Tokens",
        &TokenizeResult {
            source: args.input.display().to_string(),
            lines,
        },
        cli_args,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_split_records() {
        let text = "eins\nzwei\n\n\ndrei\n   \nvier\n";
        assert_eq!(split_records(text), vec!["eins\nzwei", "drei", "vier"]);
        assert!(split_records("\n\n").is_empty());
    }

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.word_rules, vec!["WORD"]);
    }

    #[test]
    fn test_read_missing_input_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let error = read_input(&dir.path().join("missing.txt")).unwrap_err();
        assert!(error.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_index_with_broken_lexicon_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let config = dir.path().join("config.json");
        fs::write(&input, "Haus").unwrap();
        fs::write(&config, r##"{ "lexicon": { "entries": [ ["haus", ["#"]] ] } }"##).unwrap();

        let input = input.display().to_string();
        let config = config.display().to_string();
        let args =
            TermflowArgs::try_parse_from(["termflow", "-q", "index", &input, "--config", &config])
                .unwrap();
        let error = execute_command(args).unwrap_err();
        assert!(error.is_config());
    }

    #[test]
    fn test_execute_stem_command() {
        let args = TermflowArgs::try_parse_from(["termflow", "-q", "stem", "ponies"]).unwrap();
        execute_command(args).unwrap();
    }
}
