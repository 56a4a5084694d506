use revsearch_core::engine::{RatingFilterEngine, SearchConfig, SearchEngine};
use revsearch_core::lexicon::Lexicon;
use revsearch_core::query::Mode;
use revsearch_core::review::Review;
use revsearch_core::tokenizer::{default_stopwords, tokenize_filtered};
use std::io::Write;
use tempfile::NamedTempFile;

fn corpus() -> Vec<Review> {
    vec![
        Review::new("A", "audio quality is poor", Some("disappointed"), 2),
        Review::new("B", "great audio", Some("happy"), 5),
        Review::new("C", "poor packaging", None, 3),
        Review::new("D", "audio quality felt poor at first but improved", None, 5),
    ]
}

fn engine() -> SearchEngine {
    SearchEngine::new(corpus(), SearchConfig::default())
}

fn lexicon() -> Lexicon {
    let mut pos = NamedTempFile::new().unwrap();
    writeln!(pos, "; positive words\n\ngreat\nsharp\nimproved").unwrap();
    let mut neg = NamedTempFile::new().unwrap();
    writeln!(neg, "; negative words\n\npoor\nbad").unwrap();
    Lexicon::load(pos.path(), neg.path()).unwrap()
}

#[test]
fn aspect_opinion_intersects_unions() {
    let e = engine();
    let hits = e.search("audio quality:poor", Mode::And, 10);
    let ids: Vec<&str> = hits.iter().map(|h| h.review.id.as_str()).collect();
    // aspect {audio, quality} matches A, B, D; opinion {poor} matches A, C, D.
    assert_eq!(ids, vec!["A", "D"]);
    assert_eq!(hits[0].score, 3); // audio, quality, poor all present
    assert_eq!(hits[1].score, 3);
}

#[test]
fn rating_filter_keeps_low_ratings_for_negative_opinion() {
    let m1 = RatingFilterEngine::new(engine(), lexicon());
    let hits = m1.search("audio quality:poor", 10);
    let ids: Vec<&str> = hits.iter().map(|h| h.review.id.as_str()).collect();
    // A and D both match the boolean query; "poor" is negative, so the
    // five-star D is dropped before scoring.
    assert_eq!(ids, vec!["A"]);
    assert_eq!(hits[0].score, 3);
}

#[test]
fn rating_filter_keeps_high_ratings_for_positive_opinion() {
    let m1 = RatingFilterEngine::new(engine(), lexicon());
    let hits = m1.search("audio:great", 10);
    let ids: Vec<&str> = hits.iter().map(|h| h.review.id.as_str()).collect();
    assert_eq!(ids, vec!["B"]);
}

#[test]
fn emptied_filter_returns_nothing_not_unfiltered() {
    let reviews = vec![Review::new("X", "audio sounded poor", None, 5)];
    let m1 = RatingFilterEngine::new(
        SearchEngine::new(reviews, SearchConfig::default()),
        lexicon(),
    );
    // X matches the boolean query but fails the negative-polarity rating cut.
    assert!(m1.search("audio:poor", 10).is_empty());
}

#[test]
fn rating_engine_plain_query_uses_baseline() {
    let m1 = RatingFilterEngine::new(engine(), lexicon());
    let plain = m1.search("great audio", 10);
    let e = engine();
    let baseline = e.search("great audio", Mode::And, 10);
    assert_eq!(
        plain.iter().map(|h| (h.doc_id, h.score)).collect::<Vec<_>>(),
        baseline.iter().map(|h| (h.doc_id, h.score)).collect::<Vec<_>>()
    );
}

#[test]
fn degenerate_separator_query_falls_back_to_plain() {
    let e = engine();
    let broken: Vec<_> = e.search("audio:", Mode::And, 10).iter().map(|h| h.doc_id).collect();
    let plain: Vec<_> = e.search("audio", Mode::And, 10).iter().map(|h| h.doc_id).collect();
    assert_eq!(broken, plain);
    assert!(!broken.is_empty());
}

#[test]
fn and_results_are_subset_of_or_results() {
    let e = engine();
    let and_ids: Vec<_> = e.search("audio poor", Mode::And, 100).iter().map(|h| h.doc_id).collect();
    let or_ids: Vec<_> = e.search("audio poor", Mode::Or, 100).iter().map(|h| h.doc_id).collect();
    assert!(!and_ids.is_empty());
    for id in &and_ids {
        assert!(or_ids.contains(id));
    }
    assert!(or_ids.len() >= and_ids.len());
}

#[test]
fn unknown_term_yields_empty_result() {
    let e = engine();
    assert!(e.search("zzzgarblezzz", Mode::And, 10).is_empty());
    assert!(e.search("zzzgarblezzz", Mode::Or, 10).is_empty());
    // Union only empties when ALL terms are unknown.
    assert!(!e.search("zzzgarblezzz audio", Mode::Or, 10).is_empty());
    assert!(e.search("zzzgarblezzz audio", Mode::And, 10).is_empty());
}

#[test]
fn empty_query_yields_empty_result() {
    let e = engine();
    assert!(e.search("", Mode::And, 10).is_empty());
    assert!(e.search("   ", Mode::Or, 10).is_empty());
    // Stopword-only query normalizes to nothing.
    assert!(e.search("the is it", Mode::And, 10).is_empty());
}

#[test]
fn ties_break_by_document_position() {
    let reviews = vec![
        Review::new("r0", "battery life", None, 4),
        Review::new("r1", "battery life", None, 1),
        Review::new("r2", "battery life", None, 3),
    ];
    let e = SearchEngine::new(reviews, SearchConfig::default());
    let ids: Vec<_> = e.search("battery", Mode::And, 10).iter().map(|h| h.doc_id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn reruns_are_byte_identical() {
    let e = engine();
    let first: Vec<_> =
        e.search("audio poor", Mode::Or, 10).iter().map(|h| (h.doc_id, h.score)).collect();
    for _ in 0..5 {
        let again: Vec<_> =
            e.search("audio poor", Mode::Or, 10).iter().map(|h| (h.doc_id, h.score)).collect();
        assert_eq!(first, again);
    }
}

#[test]
fn results_respect_limit_and_ordering() {
    let e = engine();
    let hits = e.search("audio poor", Mode::Or, 2);
    assert_eq!(hits.len(), 2);
    for w in hits.windows(2) {
        assert!(
            w[0].score > w[1].score || (w[0].score == w[1].score && w[0].doc_id < w[1].doc_id)
        );
    }
}

#[test]
fn index_membership_matches_tokenized_bodies() {
    let reviews = corpus();
    let e = SearchEngine::new(reviews.clone(), SearchConfig::default());
    let stops = default_stopwords();
    for term in ["audio", "quality", "poor", "great", "packaging", "is", "the", "zzz"] {
        let postings = e.index().lookup(term);
        for (doc_id, review) in reviews.iter().enumerate() {
            let present = tokenize_filtered(&review.text, true, &stops).contains(&term.to_string());
            assert_eq!(
                postings.contains(&(doc_id as u32)),
                present,
                "term {term:?} doc {doc_id}"
            );
        }
    }
}
