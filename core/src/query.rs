use crate::tokenizer::tokenize_filtered;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Boolean combination of plain-query terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    And,
    Or,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "and" => Ok(Mode::And),
            "or" => Ok(Mode::Or),
            other => Err(format!("unknown mode {other:?}, expected \"and\" or \"or\"")),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::And => "and",
            Mode::Or => "or",
        })
    }
}

/// Parsed query shape: a flat AND/OR term list, or an aspect:opinion pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Plain { terms: Vec<String>, mode: Mode },
    AspectOpinion { aspect: Vec<String>, opinion: Vec<String> },
}

const SEPARATOR: char = ':';

impl Query {
    /// Classify a raw query string.
    ///
    /// Splits on the FIRST `:` only; later colons belong to the opinion clause.
    /// If either side normalizes to no terms the aspect:opinion reading is
    /// abandoned and the WHOLE raw string is re-tokenized as a plain query.
    /// "Empty on both sides" is therefore an empty plain query, never a silent
    /// empty result from a half-parsed pair.
    pub fn parse(raw: &str, mode: Mode, stopwords: &HashSet<String>, lowercase: bool) -> Query {
        if let Some((aspect_raw, opinion_raw)) = raw.split_once(SEPARATOR) {
            let aspect = tokenize_filtered(aspect_raw, lowercase, stopwords);
            let opinion = tokenize_filtered(opinion_raw, lowercase, stopwords);
            if !aspect.is_empty() && !opinion.is_empty() {
                return Query::AspectOpinion { aspect, opinion };
            }
        }
        Query::Plain { terms: tokenize_filtered(raw, lowercase, stopwords), mode }
    }

    /// All terms the scorer should look for, in query order.
    pub fn scoring_terms(&self) -> Vec<&str> {
        match self {
            Query::Plain { terms, .. } => terms.iter().map(String::as_str).collect(),
            Query::AspectOpinion { aspect, opinion } => {
                aspect.iter().chain(opinion.iter()).map(String::as_str).collect()
            }
        }
    }
}
