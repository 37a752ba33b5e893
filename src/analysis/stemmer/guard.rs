//! Boolean guards of stemming rules.
//!
//! A guard is parsed once, when the rule table is built, into a small
//! expression tree and then evaluated against the [`StemShape`] of each
//! candidate stem. The grammar:
//!
//! ```text
//! or   := and ("or" and)*
//! and  := not ("and" not)*
//! not  := "not" not | "(" or ")" | atom
//! atom := "m" OP NUMBER      measure comparison, OP in = == != > >= < <=
//!       | "*v*"              stem contains a vowel
//!       | "*d"               stem ends in a double consonant
//!       | "*o"               stem ends in cvc, last letter not w, x or y
//!       | "*" LETTER         stem ends with LETTER (either case)
//! ```

use std::fmt;

use super::shape::StemShape;
use crate::error::{Result, TermflowError};

/// Comparison operator of a measure condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmpOp {
    /// `=` or `==`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
}

impl CmpOp {
    fn apply(self, lhs: usize, rhs: usize) -> bool {
        match self {
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ne => lhs != rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Ge => lhs >= rhs,
            CmpOp::Lt => lhs < rhs,
            CmpOp::Le => lhs <= rhs,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "!=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
        }
    }
}

/// A compiled guard expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Guard {
    /// `m OP n`
    Measure(CmpOp, usize),
    /// `*v*`
    HasVowel,
    /// `*d`
    DoubleConsonant,
    /// `*o`
    Cvc,
    /// `*X`
    EndsWith(char),
    /// `not g`
    Not(Box<Guard>),
    /// `a and b`
    And(Box<Guard>, Box<Guard>),
    /// `a or b`
    Or(Box<Guard>, Box<Guard>),
}

impl Guard {
    /// Parse a guard expression.
    pub fn parse(text: &str) -> Result<Self> {
        let tokens = lex(text)?;
        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
            source: text,
        };
        let guard = parser.parse_or()?;
        if parser.pos != tokens.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(guard)
    }

    /// Evaluate the guard against a stem shape.
    pub fn eval(&self, shape: &StemShape) -> bool {
        match self {
            Guard::Measure(op, n) => op.apply(shape.measure(), *n),
            Guard::HasVowel => shape.has_vowel(),
            Guard::DoubleConsonant => shape.ends_double_consonant(),
            Guard::Cvc => shape.ends_cvc(),
            Guard::EndsWith(letter) => shape.ends_with(*letter),
            Guard::Not(inner) => !inner.eval(shape),
            Guard::And(lhs, rhs) => lhs.eval(shape) && rhs.eval(shape),
            Guard::Or(lhs, rhs) => lhs.eval(shape) || rhs.eval(shape),
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Measure(op, n) => write!(f, "m{}{}", op.symbol(), n),
            Guard::HasVowel => write!(f, "*v*"),
            Guard::DoubleConsonant => write!(f, "*d"),
            Guard::Cvc => write!(f, "*o"),
            Guard::EndsWith(letter) => write!(f, "*{}", letter.to_ascii_uppercase()),
            Guard::Not(inner) => write!(f, "not {inner}"),
            Guard::And(lhs, rhs) => write!(f, "({lhs} and {rhs})"),
            Guard::Or(lhs, rhs) => write!(f, "({lhs} or {rhs})"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Tok {
    Open,
    Close,
    And,
    Or,
    Not,
    Atom(Guard),
}

fn lex(text: &str) -> Result<Vec<Tok>> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    let invalid = |msg: String| TermflowError::config(format!("Invalid guard '{text}': {msg}"));

    while i < chars.len() {
        let c = chars[i];
        match c {
            _ if c.is_whitespace() => i += 1,
            '(' => {
                tokens.push(Tok::Open);
                i += 1;
            }
            ')' => {
                tokens.push(Tok::Close);
                i += 1;
            }
            '*' => {
                let Some(&letter) = chars.get(i + 1) else {
                    return Err(invalid("'*' without a letter".to_string()));
                };
                match letter {
                    'v' if chars.get(i + 2) == Some(&'*') => {
                        tokens.push(Tok::Atom(Guard::HasVowel));
                        i += 3;
                    }
                    'd' => {
                        tokens.push(Tok::Atom(Guard::DoubleConsonant));
                        i += 2;
                    }
                    'o' => {
                        tokens.push(Tok::Atom(Guard::Cvc));
                        i += 2;
                    }
                    _ if letter.is_ascii_alphabetic() => {
                        tokens.push(Tok::Atom(Guard::EndsWith(letter.to_ascii_lowercase())));
                        i += 2;
                    }
                    _ => return Err(invalid(format!("unknown condition '*{letter}'"))),
                }
            }
            _ if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                match word.to_ascii_lowercase().as_str() {
                    "and" => tokens.push(Tok::And),
                    "or" => tokens.push(Tok::Or),
                    "not" => tokens.push(Tok::Not),
                    "m" => {
                        while i < chars.len() && chars[i].is_whitespace() {
                            i += 1;
                        }
                        let op_start = i;
                        while i < chars.len() && matches!(chars[i], '=' | '!' | '<' | '>') {
                            i += 1;
                        }
                        let op: String = chars[op_start..i].iter().collect();
                        let op = match op.as_str() {
                            "=" | "==" => CmpOp::Eq,
                            "!=" => CmpOp::Ne,
                            ">" => CmpOp::Gt,
                            ">=" => CmpOp::Ge,
                            "<" => CmpOp::Lt,
                            "<=" => CmpOp::Le,
                            other => {
                                return Err(invalid(format!("unknown operator '{other}'")));
                            }
                        };
                        while i < chars.len() && chars[i].is_whitespace() {
                            i += 1;
                        }
                        let num_start = i;
                        while i < chars.len() && chars[i].is_ascii_digit() {
                            i += 1;
                        }
                        let digits: String = chars[num_start..i].iter().collect();
                        let n = digits
                            .parse::<usize>()
                            .map_err(|_| invalid("measure needs a number".to_string()))?;
                        tokens.push(Tok::Atom(Guard::Measure(op, n)));
                    }
                    other => return Err(invalid(format!("unknown variable '{other}'"))),
                }
            }
            _ => return Err(invalid(format!("unexpected character '{c}'"))),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Tok],
    pos: usize,
    source: &'a str,
}

impl Parser<'_> {
    fn error(&self, msg: &str) -> TermflowError {
        TermflowError::config(format!(
            "Invalid guard '{}': {} at token {}",
            self.source, msg, self.pos
        ))
    }

    fn peek(&self) -> Option<&Tok> {
        self.tokens.get(self.pos)
    }

    fn parse_or(&mut self) -> Result<Guard> {
        let mut lhs = self.parse_and()?;
        while self.peek() == Some(&Tok::Or) {
            self.pos += 1;
            let rhs = self.parse_and()?;
            lhs = Guard::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Guard> {
        let mut lhs = self.parse_not()?;
        while self.peek() == Some(&Tok::And) {
            self.pos += 1;
            let rhs = self.parse_not()?;
            lhs = Guard::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_not(&mut self) -> Result<Guard> {
        match self.peek().cloned() {
            Some(Tok::Not) => {
                self.pos += 1;
                Ok(Guard::Not(Box::new(self.parse_not()?)))
            }
            Some(Tok::Open) => {
                self.pos += 1;
                let inner = self.parse_or()?;
                if self.peek() != Some(&Tok::Close) {
                    return Err(self.error("missing ')'"));
                }
                self.pos += 1;
                Ok(inner)
            }
            Some(Tok::Atom(guard)) => {
                self.pos += 1;
                Ok(guard)
            }
            Some(_) => Err(self.error("unexpected operator")),
            None => Err(self.error("unexpected end")),
        }
    }
}
