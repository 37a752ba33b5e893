//! Stemming rules and rule groups.
//!
//! Rules are written one per string:
//!
//! ```text
//! goto(S120)                         unconditional transfer to group S120
//! SSES -> SS                         replace suffix
//! (m>0) EED -> EE goto(S120)         guarded replacement, then jump
//! (*v*) ING -> goto(S111)            strip suffix, then jump
//! (*d and not (*L or *S)) -> -1      no suffix, drop one more character
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::guard::Guard;
use super::shape::StemShape;
use crate::config::RuleGroupSpec;
use crate::error::{Result, TermflowError};

static JUMP_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^goto\(\s*(?P<label>\w+)\s*\)$").unwrap());
static SUFFIX_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:\((?P<guard>.*)\)\s*)?(?P<suffix>[A-Za-z]*)\s*->\s*(?P<replacement>-\d+|[A-Za-z]*)\s*(?:goto\(\s*(?P<label>\w+)\s*\))?$",
    )
    .unwrap()
});

/// What happens to the stem once a suffix rule fires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Replacement {
    /// Append this text to the stem
    Append(String),
    /// Drop this many further characters from the stem
    Truncate(usize),
}

/// A guarded suffix rewrite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuffixRule {
    guard: Option<Guard>,
    suffix: String,
    replacement: Replacement,
    jump: Option<String>,
}

impl SuffixRule {
    /// The lower-cased suffix, possibly empty.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The guard, if any.
    pub fn guard(&self) -> Option<&Guard> {
        self.guard.as_ref()
    }

    /// The replacement.
    pub fn replacement(&self) -> &Replacement {
        &self.replacement
    }

    /// Group label to continue with after this rule fired.
    pub fn jump(&self) -> Option<&str> {
        self.jump.as_deref()
    }

    /// Apply the rule to a lower-cased word.
    ///
    /// Returns `None` when the suffix does not match or the guard rejects
    /// the stem. A non-empty suffix needs at least one character in front
    /// of it.
    pub fn apply(&self, word: &str) -> Option<String> {
        if !self.suffix.is_empty()
            && (word.len() <= self.suffix.len() || !word.ends_with(&self.suffix))
        {
            return None;
        }

        let stem = &word[..word.len() - self.suffix.len()];
        if let Some(guard) = &self.guard {
            if !guard.eval(&StemShape::new(stem)) {
                return None;
            }
        }

        Some(match &self.replacement {
            Replacement::Append(text) => format!("{stem}{text}"),
            Replacement::Truncate(n) => {
                let mut result = stem.to_string();
                for _ in 0..*n {
                    result.pop();
                }
                result
            }
        })
    }
}

/// One entry of a rule group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StemRule {
    /// Bare `goto(LABEL)`
    Jump(String),
    /// Guarded suffix rewrite
    Suffix(SuffixRule),
}

impl StemRule {
    /// Parse a rule string.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();

        if let Some(caps) = JUMP_RULE.captures(text) {
            return Ok(StemRule::Jump(caps["label"].to_string()));
        }

        let caps = SUFFIX_RULE
            .captures(text)
            .ok_or_else(|| TermflowError::config(format!("Invalid stemmer rule '{text}'")))?;

        let guard = match caps.name("guard") {
            Some(guard) => Some(Guard::parse(guard.as_str())?),
            None => None,
        };

        let replacement = &caps["replacement"];
        let replacement = match replacement.strip_prefix('-') {
            Some(count) => Replacement::Truncate(count.parse().map_err(|e| {
                TermflowError::config(format!("Invalid truncation in rule '{text}': {e}"))
            })?),
            None => Replacement::Append(replacement.to_ascii_lowercase()),
        };

        Ok(StemRule::Suffix(SuffixRule {
            guard,
            suffix: caps["suffix"].to_ascii_lowercase(),
            replacement,
            jump: caps.name("label").map(|label| label.as_str().to_string()),
        }))
    }

    /// Jump target of this rule, if any.
    pub fn jump_target(&self) -> Option<&str> {
        match self {
            StemRule::Jump(label) => Some(label),
            StemRule::Suffix(rule) => rule.jump(),
        }
    }
}

/// A labelled, ordered list of rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleGroup {
    label: String,
    rules: Vec<StemRule>,
}

impl RuleGroup {
    /// Parse every rule of a group specification.
    pub fn parse(spec: &RuleGroupSpec) -> Result<Self> {
        let rules = spec
            .rules
            .iter()
            .map(|rule| {
                StemRule::parse(rule).map_err(|e| {
                    TermflowError::config(format!("In stemmer group '{}': {}", spec.label, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RuleGroup {
            label: spec.label.clone(),
            rules,
        })
    }

    /// Group label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Rules in order.
    pub fn rules(&self) -> &[StemRule] {
        &self.rules
    }
}
