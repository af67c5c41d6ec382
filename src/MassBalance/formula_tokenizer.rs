//! Formula tokenizer.
//!
//! The grammar is an ordered table of named alternatives compiled into one
//! regular expression. Alternation in `regex` is leftmost-first, so the order
//! of the table is the matching precedence:
//! element symbol (with count) -> `(` -> `)` (with multiplier) -> any other character.
//!
//! ```
//! use AcidWatch::MassBalance::formula_tokenizer::{tokenize, AtomGrammar, Token};
//! let tokens: Vec<Token> = tokenize("Na(NO3)2", AtomGrammar::Periodic).collect();
//! assert_eq!(tokens[0], Token::Atom("Na".to_string(), 1.0));
//! assert_eq!(tokens[1], Token::GroupOpen);
//! assert_eq!(tokens[4], Token::GroupClose(2.0));
//! ```
use crate::MassBalance::elements::symbol_alternation;
use regex::{CaptureMatches, Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Which element symbols the tokenizer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtomGrammar {
    /// every periodic-table symbol and nothing else
    #[default]
    Periodic,
    /// any capital letter with an optional lowercase letter, e.g. `Xx`.
    /// Groups and invalid characters are handled exactly as for `Periodic`,
    /// only the symbol class is wider.
    Freeform,
}

impl fmt::Display for AtomGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomGrammar::Periodic => write!(f, "periodic"),
            AtomGrammar::Freeform => write!(f, "freeform"),
        }
    }
}

impl std::str::FromStr for AtomGrammar {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "periodic" | "whitelist" => Ok(AtomGrammar::Periodic),
            "freeform" => Ok(AtomGrammar::Freeform),
            other => Err(format!("Unknown atom grammar: {}", other)),
        }
    }
}

/// Counts are `f64`: any digit suffix is a valid multiplicity, however long.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// element symbol and its count (1 when no digits follow)
    Atom(String, f64),
    GroupOpen,
    /// closing parenthesis and the group multiplier (1 when no digits follow)
    GroupClose(f64),
    Invalid(char),
}

const FREEFORM_ATOM: &str = "[A-Z][a-z]?";

/// named alternatives in matching order
fn grammar_table(atom_pattern: &str) -> Vec<(&'static str, String)> {
    vec![
        (
            "atom",
            format!("(?P<atom_symbol>{})(?P<atom_count>[0-9]*)", atom_pattern),
        ),
        ("open", r"\(".to_string()),
        ("close", r"\)(?P<close_count>[0-9]*)".to_string()),
        ("invalid", "(?s:.)".to_string()),
    ]
}

fn compile_grammar(atom_pattern: &str) -> Regex {
    let pattern = grammar_table(atom_pattern)
        .into_iter()
        .map(|(name, alternative)| format!("(?P<{}>{})", name, alternative))
        .collect::<Vec<_>>()
        .join("|");
    // the table is built from constants only
    Regex::new(&pattern).expect("formula grammar must compile")
}

fn grammar(atom_grammar: AtomGrammar) -> &'static Regex {
    static PERIODIC: OnceLock<Regex> = OnceLock::new();
    static FREEFORM: OnceLock<Regex> = OnceLock::new();
    match atom_grammar {
        AtomGrammar::Periodic => PERIODIC.get_or_init(|| compile_grammar(&symbol_alternation())),
        AtomGrammar::Freeform => FREEFORM.get_or_init(|| compile_grammar(FREEFORM_ATOM)),
    }
}

/// Empty suffix means 1.
fn parse_multiplicity(digits: &str) -> f64 {
    if digits.is_empty() {
        return 1.0;
    }
    // ASCII digits always parse; very long suffixes saturate to infinity
    digits.parse().unwrap_or(f64::INFINITY)
}

/// Lazy token stream over one formula. A fresh scan is started for every formula.
pub struct FormulaTokenizer<'f> {
    matches: CaptureMatches<'static, 'f>,
    offset: usize,
}

impl<'f> FormulaTokenizer<'f> {
    pub fn new(formula: &'f str, atom_grammar: AtomGrammar) -> Self {
        Self {
            matches: grammar(atom_grammar).captures_iter(formula),
            offset: 0,
        }
    }

    /// byte offset of the last token returned by `next`
    pub fn offset(&self) -> usize {
        self.offset
    }

}

fn counted(caps: &Captures<'_>, group: &str) -> f64 {
    caps.name(group)
        .map_or(1.0, |digits| parse_multiplicity(digits.as_str()))
}

impl<'f> Iterator for FormulaTokenizer<'f> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let caps = self.matches.next()?;
        let whole = caps.get(0)?;
        self.offset = whole.start();

        if let Some(symbol) = caps.name("atom_symbol") {
            return Some(Token::Atom(
                symbol.as_str().to_string(),
                counted(&caps, "atom_count"),
            ));
        }
        if caps.name("open").is_some() {
            return Some(Token::GroupOpen);
        }
        if caps.name("close").is_some() {
            return Some(Token::GroupClose(counted(&caps, "close_count")));
        }
        whole.as_str().chars().next().map(Token::Invalid)
    }
}

pub fn tokenize(formula: &str, atom_grammar: AtomGrammar) -> FormulaTokenizer<'_> {
    FormulaTokenizer::new(formula, atom_grammar)
}
