use crate::review::Review;
use crate::tokenizer::tokenize_filtered;
use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

/// Position of a review in the loaded corpus.
pub type DocId = u32;

lazy_static! {
    static ref EMPTY_POSTINGS: HashSet<DocId> = HashSet::new();
}

/// Term -> set of documents containing it. Built once per corpus, read-only after.
///
/// Postings are boolean presence: a document appears in a term's set iff its
/// body yields that term at least once after stopword removal, no matter how
/// often.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, HashSet<DocId>>,
}

impl InvertedIndex {
    pub fn build(reviews: &[Review], stopwords: &HashSet<String>, lowercase: bool) -> Self {
        let mut postings: HashMap<String, HashSet<DocId>> = HashMap::new();
        for (doc_id, review) in reviews.iter().enumerate() {
            for term in tokenize_filtered(&review.text, lowercase, stopwords) {
                postings.entry(term).or_default().insert(doc_id as DocId);
            }
        }
        tracing::info!(num_docs = reviews.len(), num_terms = postings.len(), "index built");
        Self { postings }
    }

    /// Postings for a term; the empty set for terms not in the index.
    pub fn lookup(&self, term: &str) -> &HashSet<DocId> {
        self.postings.get(term).unwrap_or(&EMPTY_POSTINGS)
    }

    pub fn vocab_size(&self) -> usize {
        self.postings.len()
    }
}
