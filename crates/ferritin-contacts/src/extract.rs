//! # Residue extraction
//!
//! Interaction column names come from several generators and follow no single grammar:
//!
//! - dotted machine names: `PROTEIN.HIS51.HBDonor`, `LIG1.G.HIS51.A.HBDonor`
//! - free text: `his 51 HBAcceptor`, `contact TYR 130`
//!
//! A name is first cleaned (`,`/`:` become `.`, whitespace runs collapse) and split into
//! tokens on `.` and whitespace. The [`STRATEGIES`] are then tried in order:
//!
//! 1. [`Strategy::KeywordAnchored`]: the tokens left of the first interaction keyword that
//!    has any. Once such a keyword is found its answer is final, resolved or not, so a
//!    residue right of the keyword (`LIGAND.HBDonor.HIS51`) is never picked up.
//! 2. [`Strategy::CodeNumberPair`]: an adjacent letters-only / digits-only token pair.
//! 3. [`Strategy::CodeNumberScan`]: any `letters{3,}digits` run in the cleaned name.
//!
//! The positional strategies only run when no keyword has left context. Names that end
//! without a [`ResidueToken`] are [`Extraction::Unresolved`] and keep their raw text as
//! label.
//!

use itertools::Itertools;
use log::debug;
use regex::{Regex, RegexBuilder};

use crate::residue::ResidueToken;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extraction {
    Resolved(ResidueToken),
    Unresolved(String),
}

impl Extraction {
    /// Residue token, or the raw column name when unresolved.
    pub fn label(&self) -> &str {
        match self {
            Extraction::Resolved(token) => token.as_str(),
            Extraction::Unresolved(raw) => raw,
        }
    }

    pub fn token(&self) -> Option<&ResidueToken> {
        match self {
            Extraction::Resolved(token) => Some(token),
            Extraction::Unresolved(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    KeywordAnchored,
    CodeNumberPair,
    CodeNumberScan,
}

pub const STRATEGIES: [Strategy; 3] = [
    Strategy::KeywordAnchored,
    Strategy::CodeNumberPair,
    Strategy::CodeNumberScan,
];

/// Result of one strategy: a final answer, or a hand-off to the next strategy.
enum Step {
    Done(Option<ResidueToken>),
    Next,
}

impl Strategy {
    fn apply(self, extractor: &ResidueExtractor, name: &str) -> Step {
        match self {
            Strategy::KeywordAnchored => extractor
                .keyword_matches(name)
                .into_iter()
                .map(|(start, _)| {
                    tokenize(name[..start].trim_end_matches(|c: char| {
                        c == '.' || c == '_' || c == '-' || c.is_whitespace()
                    }))
                })
                .find(|left| !left.is_empty())
                .map_or(Step::Next, |left| Step::Done(keyword_anchored(&left))),
            Strategy::CodeNumberPair => tokenize(name)
                .windows(2)
                .find_map(|pair| {
                    let (code, number) = (pair[0], pair[1]);
                    let is_pair = code.chars().all(|c| c.is_ascii_alphabetic())
                        && number.chars().all(|c| c.is_ascii_digit());
                    if is_pair {
                        ResidueToken::normalize(&format!("{code}{number}"))
                    } else {
                        None
                    }
                })
                .map_or(Step::Next, |token| Step::Done(Some(token))),
            Strategy::CodeNumberScan => extractor
                .code_number
                .find(name)
                .and_then(|m| ResidueToken::normalize(m.as_str()))
                .map_or(Step::Next, |token| Step::Done(Some(token))),
        }
    }
}

/// Candidate order for the tokens left of a keyword: a last token that is a residue on its
/// own (`PROTEIN.HIS51`), the last two tokens joined (`his 51`, `HIS51.A`), the last token.
fn keyword_anchored(tokens: &[&str]) -> Option<ResidueToken> {
    match tokens {
        [] => None,
        [only] => ResidueToken::normalize(only),
        [.., previous, last] => ResidueToken::complete(last)
            .or_else(|| ResidueToken::normalize(&format!("{previous}{last}")))
            .or_else(|| ResidueToken::normalize(last)),
    }
}

/// `,` and `:` become `.`, whitespace runs collapse to one space.
pub fn clean_separators(raw: &str) -> String {
    let dotted = raw.replace([',', ':'], ".");
    dotted.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split on `.` and whitespace, dropping empty tokens.
pub fn tokenize(s: &str) -> Vec<&str> {
    s.split(|c: char| c == '.' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect()
}

struct Keyword {
    name: String,
    whole_word: Regex,
}

/// Residue extraction against a fixed, ordered keyword list.
pub struct ResidueExtractor {
    keywords: Vec<Keyword>,
    any_keyword: Option<Regex>,
    code_number: Regex,
}

impl ResidueExtractor {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, regex::Error> {
        let keywords = keywords
            .iter()
            .map(|kw| {
                let name = kw.as_ref().to_string();
                let whole_word = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(&name)))
                    .case_insensitive(true)
                    .build()?;
                Ok(Keyword { name, whole_word })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        let any_keyword = if keywords.is_empty() {
            None
        } else {
            let alternation = keywords
                .iter()
                .map(|kw| regex::escape(&kw.name))
                .collect::<Vec<_>>()
                .join("|");
            Some(
                RegexBuilder::new(&alternation)
                    .case_insensitive(true)
                    .build()?,
            )
        };

        Ok(ResidueExtractor {
            keywords,
            any_keyword,
            code_number: Regex::new(r"[A-Za-z]{3,}\d+")?,
        })
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|kw| kw.name.as_str())
    }

    /// A column is an interaction column when its name contains any keyword,
    /// case-insensitively and not necessarily as a whole word.
    pub fn is_interaction_column(&self, name: &str) -> bool {
        self.any_keyword
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(name))
    }

    /// Byte offset and name of the left-most whole-word keyword in `name`. Keywords
    /// matching at the same offset are ranked by list order.
    pub fn locate_keyword(&self, name: &str) -> Option<(usize, &str)> {
        self.keyword_matches(name).into_iter().next()
    }

    /// First whole-word match of every keyword found in `name`, left-most first.
    fn keyword_matches(&self, name: &str) -> Vec<(usize, &str)> {
        self.keywords
            .iter()
            .enumerate()
            .filter_map(|(rank, kw)| kw.whole_word.find(name).map(|m| (m.start(), rank, kw)))
            .sorted_by_key(|&(start, rank, _)| (start, rank))
            .map(|(start, _, kw)| (start, kw.name.as_str()))
            .collect()
    }

    pub fn extract(&self, raw: &str) -> Extraction {
        let name = clean_separators(raw);
        let token = STRATEGIES
            .iter()
            .find_map(|strategy| match strategy.apply(self, &name) {
                Step::Done(token) => Some(token),
                Step::Next => None,
            })
            .flatten();
        match token {
            Some(token) => Extraction::Resolved(token),
            None => {
                debug!("No residue found in column {raw:?}");
                Extraction::Unresolved(raw.to_string())
            }
        }
    }
}
