use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Sentiment of an opinion-term sequence, decided by lexicon membership counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

/// Positive and negative opinion word sets, loaded once from line-delimited files.
#[derive(Debug)]
pub struct Lexicon {
    pub positive: HashSet<String>,
    pub negative: HashSet<String>,
}

/// Load one lexicon file: one term per line, blank lines and `;` comments skipped,
/// entries lowercased. An unreadable path is fatal to engine construction.
pub fn load_lexicon(path: &Path) -> Result<HashSet<String>> {
    let f = File::open(path).with_context(|| format!("opening lexicon {}", path.display()))?;
    let mut words = HashSet::new();
    for line in BufReader::new(f).lines() {
        let line = line.with_context(|| format!("reading lexicon {}", path.display()))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        words.insert(line.to_lowercase());
    }
    Ok(words)
}

impl Lexicon {
    pub fn load(positive_path: &Path, negative_path: &Path) -> Result<Self> {
        let positive = load_lexicon(positive_path)?;
        let negative = load_lexicon(negative_path)?;
        tracing::info!(
            positive = positive.len(),
            negative = negative.len(),
            "loaded opinion lexicons"
        );
        Ok(Self { positive, negative })
    }

    /// Compare how many opinion terms fall in each set; ties are Neutral.
    pub fn classify<S: AsRef<str>>(&self, opinion_terms: &[S]) -> Polarity {
        let positive_count =
            opinion_terms.iter().filter(|t| self.positive.contains(t.as_ref())).count();
        let negative_count =
            opinion_terms.iter().filter(|t| self.negative.contains(t.as_ref())).count();
        if positive_count > negative_count {
            Polarity::Positive
        } else if negative_count > positive_count {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }
}

impl Polarity {
    /// Whether a review with this star rating should survive the polarity filter.
    /// Unknown ratings (0) count as low.
    pub fn admits_rating(self, rating: u32) -> bool {
        match self {
            Polarity::Positive => rating > 3,
            Polarity::Negative => rating <= 3,
            Polarity::Neutral => true,
        }
    }
}
