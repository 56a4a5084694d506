use crate::index::{DocId, InvertedIndex};
use crate::lexicon::Lexicon;
use crate::query::{Mode, Query};
use crate::review::Review;
use crate::tokenizer::{default_stopwords, tokenize};
use std::collections::HashSet;

pub const DEFAULT_LIMIT: usize = 10;

/// Engine construction knobs. Stopwords and case folding are passed in
/// explicitly so behavior never depends on ambient process state.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub stopwords: HashSet<String>,
    pub lowercase: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { stopwords: default_stopwords(), lowercase: true }
    }
}

/// One ranked result: the matched review and how many query terms it contains.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub doc_id: DocId,
    pub score: usize,
    pub review: &'a Review,
}

/// Boolean search over review bodies.
///
/// Owns the corpus and the inverted index. The index is built once in `new`;
/// every search method takes `&self`, so a multi-threaded host may share the
/// engine freely once construction returns.
pub struct SearchEngine {
    reviews: Vec<Review>,
    index: InvertedIndex,
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(reviews: Vec<Review>, config: SearchConfig) -> Self {
        let index = InvertedIndex::build(&reviews, &config.stopwords, config.lowercase);
        Self { reviews, index, config }
    }

    pub fn num_docs(&self) -> usize {
        self.reviews.len()
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn review(&self, doc_id: DocId) -> &Review {
        &self.reviews[doc_id as usize]
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn parse(&self, raw: &str, mode: Mode) -> Query {
        Query::parse(raw, mode, &self.config.stopwords, self.config.lowercase)
    }

    /// Parse and evaluate a query string. `mode` governs plain queries only;
    /// aspect:opinion queries always intersect the two OR-unions.
    pub fn search(&self, raw: &str, mode: Mode, limit: usize) -> Vec<SearchHit<'_>> {
        let query = self.parse(raw, mode);
        self.run(&query, limit)
    }

    /// Evaluate an already-parsed query.
    pub fn run(&self, query: &Query, limit: usize) -> Vec<SearchHit<'_>> {
        let candidates = self.candidates(query);
        if candidates.is_empty() {
            return Vec::new();
        }
        self.score_and_rank(candidates, &query.scoring_terms(), limit)
    }

    /// Boolean candidate set for a query, before any filtering or scoring.
    ///
    /// AND intersects starting from the first term's postings, so an empty term
    /// list or an unknown term yields the empty set rather than "everything".
    fn candidates(&self, query: &Query) -> HashSet<DocId> {
        match query {
            Query::Plain { terms, mode } => {
                if terms.is_empty() {
                    return HashSet::new();
                }
                match mode {
                    Mode::And => {
                        let mut out = self.index.lookup(&terms[0]).clone();
                        for term in &terms[1..] {
                            if out.is_empty() {
                                break;
                            }
                            let postings = self.index.lookup(term);
                            out.retain(|d| postings.contains(d));
                        }
                        out
                    }
                    Mode::Or => self.docs_with_any(terms),
                }
            }
            Query::AspectOpinion { aspect, opinion } => {
                let aspect_docs = self.docs_with_any(aspect);
                let opinion_docs = self.docs_with_any(opinion);
                aspect_docs.intersection(&opinion_docs).copied().collect()
            }
        }
    }

    /// Union of postings over the terms.
    fn docs_with_any(&self, terms: &[String]) -> HashSet<DocId> {
        let mut out = HashSet::new();
        for term in terms {
            out.extend(self.index.lookup(term));
        }
        out
    }

    /// Count distinct query terms present in each candidate's body and order by
    /// (score desc, doc id asc). The body is re-tokenized WITHOUT stopword
    /// removal here; query terms were already normalized at parse time.
    fn score_and_rank(
        &self,
        candidates: HashSet<DocId>,
        query_terms: &[&str],
        limit: usize,
    ) -> Vec<SearchHit<'_>> {
        let unique_terms: HashSet<&str> = query_terms.iter().copied().collect();
        let mut scored: Vec<(DocId, usize)> = candidates
            .into_iter()
            .map(|doc_id| {
                let tokens: HashSet<String> =
                    tokenize(&self.reviews[doc_id as usize].text, self.config.lowercase)
                        .into_iter()
                        .collect();
                let score = unique_terms.iter().filter(|t| tokens.contains(**t)).count();
                (doc_id, score)
            })
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(limit);
        scored
            .into_iter()
            .map(|(doc_id, score)| SearchHit {
                doc_id,
                score,
                review: &self.reviews[doc_id as usize],
            })
            .collect()
    }
}

/// Method 1: boolean search plus a lexicon-driven star-rating filter.
///
/// For an aspect:opinion query the opinion terms are classified against the
/// lexicon and the candidate set is narrowed by rating BEFORE scoring. If the
/// filter leaves nothing, the search returns nothing; it never falls back to
/// the unfiltered candidates. Plain and degenerate queries behave exactly like
/// the baseline engine in AND mode.
pub struct RatingFilterEngine {
    engine: SearchEngine,
    lexicon: Lexicon,
}

impl RatingFilterEngine {
    pub fn new(engine: SearchEngine, lexicon: Lexicon) -> Self {
        Self { engine, lexicon }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn search(&self, raw: &str, limit: usize) -> Vec<SearchHit<'_>> {
        let query = self.engine.parse(raw, Mode::And);
        match &query {
            Query::AspectOpinion { opinion, .. } => {
                let mut candidates = self.engine.candidates(&query);
                if candidates.is_empty() {
                    return Vec::new();
                }
                let polarity = self.lexicon.classify(opinion);
                candidates
                    .retain(|&d| polarity.admits_rating(self.engine.reviews[d as usize].rating));
                if candidates.is_empty() {
                    return Vec::new();
                }
                self.engine.score_and_rank(candidates, &query.scoring_terms(), limit)
            }
            Query::Plain { .. } => self.engine.run(&query, limit),
        }
    }
}
