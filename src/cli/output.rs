//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::cli::args::{OutputFormat, TermflowArgs};
use crate::error::Result;
use crate::pipeline::{Counters, Item};

/// Results that can be printed for humans.
pub trait Render {
    /// Output lines, without trailing newlines.
    fn render(&self) -> Vec<String>;
}

/// Counters of one stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: String,
    pub counters: Counters,
}

/// Result of running the pipeline over a file.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResult {
    pub source: String,
    pub items: Vec<Item>,
    pub duration_ms: u64,
    pub report: Option<Vec<StageReport>>,
}

impl Render for IndexResult {
    fn render(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.items.iter().map(|item| item.to_string()).collect();
        if let Some(report) = &self.report {
            lines.push(String::new());
            lines.push(format!("Stage counters ({} ms):", self.duration_ms));
            for stage in report {
                lines.push(format!("  {:<14} {}", stage.stage, stage.counters));
            }
        }
        lines
    }
}

/// One stemmed word.
#[derive(Debug, Serialize, Deserialize)]
pub struct StemResult {
    pub word: String,
    pub stem: String,
    pub changed: bool,
}

/// Stems of all requested words.
#[derive(Debug, Serialize, Deserialize)]
pub struct StemResults {
    pub stems: Vec<StemResult>,
}

impl Render for StemResults {
    fn render(&self) -> Vec<String> {
        self.stems
            .iter()
            .map(|result| format!("{} -> {}", result.word, result.stem))
            .collect()
    }
}

/// Tokens of one input line.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenizedLine {
    pub line: usize,
    pub tokens: Vec<Token>,
}

/// Tokens of a whole file.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenizeResult {
    pub source: String,
    pub lines: Vec<TokenizedLine>,
}

impl Render for TokenizeResult {
    fn render(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| {
                let tokens: Vec<String> = line.tokens.iter().map(|token| token.to_string()).collect();
                format!("{:>4}: {}", line.line, tokens.join(" "))
            })
            .collect()
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + Render>(message: &str, result: &T, args: &TermflowArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Render>(message: &str, result: &T, args: &TermflowArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    for line in result.render() {
        println!("{line}");
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &TermflowArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Command;

    #[test]
    fn test_render_index_result() {
        let mut counters = Counters::new();
        counters.add("lines", 2);
        let result = IndexResult {
            source: "a.txt".to_string(),
            items: vec![
                Item::command(Command::File("a.txt".into())),
                Item::token(Token::new(".", "PUNC")),
            ],
            duration_ms: 3,
            report: Some(vec![StageReport {
                stage: "tokenizer".to_string(),
                counters,
            }]),
        };

        let lines = result.render();
        assert_eq!(lines[0], "*FILE('a.txt')");
        assert_eq!(lines[1], ":./PUNC:");
        assert_eq!(lines[3], "Stage counters (3 ms):");
        assert!(lines[4].contains("lines = 2"));
    }

    #[test]
    fn test_render_stems() {
        let results = StemResults {
            stems: vec![StemResult {
                word: "ponies".to_string(),
                stem: "poni".to_string(),
                changed: true,
            }],
        };
        assert_eq!(results.render(), vec!["ponies -> poni"]);
    }

    #[test]
    fn test_json_shape() {
        let result = StemResults {
            stems: vec![StemResult {
                word: "sing".to_string(),
                stem: "sing".to_string(),
                changed: false,
            }],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["stems"][0]["stem"], "sing");
        assert_eq!(value["stems"][0]["changed"], false);
    }
}
