//! Relevance Scoring
//!
//! Ranks the salient terms of a page in two stages:
//!
//! 1. [`keywords::extract_candidates`] ranks stemmed n-grams by frequency.
//! 2. Each candidate is rescored against a [`tfidf::TfIdf`] index holding
//!    the same text as its only document. The ranking order of stage 1 is
//!    kept; only the score is replaced.
//!
//! With one document the IDF term is a constant, so the second score is a
//! token-frequency signal. It is comparable within a page, not across pages.

pub mod keywords;
pub mod tfidf;

use std::borrow::Cow;

use rust_stemmers::{Algorithm, Stemmer};

use crate::options::ScoringOptions;
use crate::result::KeywordScore;
use crate::text::StopWords;

pub use keywords::{extract_candidates, Candidate};
pub use tfidf::TfIdf;

/// Reduces a lowercase word to its stem.
pub trait Stem: Send + Sync {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str>;
}

impl Stem for Stemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        Stemmer::stem(self, word)
    }
}

/// Identity stemmer: every word is its own stem.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStem;

impl Stem for NoStem {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(word)
    }
}

/// Snowball English stemmer.
#[must_use]
pub fn english_stemmer() -> Stemmer {
    Stemmer::create(Algorithm::English)
}

/// Scores the text of one page.
pub struct RelevanceScorer<'a> {
    stop_words: &'a StopWords,
    stemmer: &'a dyn Stem,
    options: &'a ScoringOptions,
}

impl<'a> RelevanceScorer<'a> {
    #[must_use]
    pub fn new(stop_words: &'a StopWords, stemmer: &'a dyn Stem, options: &'a ScoringOptions) -> Self {
        Self {
            stop_words,
            stemmer,
            options,
        }
    }

    /// Rank the keywords of `title` followed by `body`.
    ///
    /// Deterministic for identical input. Never returns more than
    /// `options.limit` entries, and never an entry with an empty term.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self, title: &str, body: &str) -> Vec<KeywordScore> {
        let text = format!("{title} {body}");

        let candidates = extract_candidates(&text, self.stop_words, self.stemmer, self.options);

        let mut index = TfIdf::new();
        let doc = index.add_document(&text, self.stop_words);

        candidates
            .into_iter()
            .filter(|c| !c.term.is_empty())
            .map(|c| KeywordScore {
                tfidf_score: index.tfidf(&c.term, doc),
                frequency_score: c.count as f64,
                term: c.term,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stemmer_collapses_variants() {
        let stemmer = english_stemmer();
        assert_eq!(Stem::stem(&stemmer, "jumping"), Stem::stem(&stemmer, "jumps"));
        assert_eq!(NoStem.stem("jumping"), "jumping");
    }

    #[test]
    fn test_fox_scenario() {
        let stemmer = english_stemmer();
        let options = ScoringOptions::default();
        let scorer = RelevanceScorer::new(StopWords::bundled(), &stemmer, &options);

        let ranked = scorer.score("Hello & World", "fox fox fox jumps");

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].term, "fox");
        assert_eq!(ranked[0].frequency_score, 3.0);
        let expected = 3.0 * (1.0 + 0.5_f64.ln());
        assert!((ranked[0].tfidf_score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_variants_share_a_candidate() {
        let stemmer = english_stemmer();
        let options = ScoringOptions::default();
        let scorer = RelevanceScorer::new(StopWords::bundled(), &stemmer, &options);

        let ranked = scorer.score("", "runner runs running runs");
        assert_eq!(ranked[0].term, "runs");
        assert!(ranked[0].frequency_score >= 3.0);
    }

    #[test]
    fn test_order_follows_frequency_not_tfidf() {
        let stemmer = NoStem;
        let options = ScoringOptions::default();
        let scorer = RelevanceScorer::new(StopWords::bundled(), &stemmer, &options);

        let ranked = scorer.score("", "solar panel output, solar panel cost, solar panel size, wind wind wind wind");
        let terms: Vec<&str> = ranked.iter().map(|k| k.term.as_str()).collect();
        assert_eq!(terms, vec!["wind", "solar panel"]);
        assert!(ranked[1].tfidf_score > ranked[0].tfidf_score);
    }

    #[test]
    fn test_limit_respected() {
        let stemmer = NoStem;
        let options = ScoringOptions {
            limit: 3,
            ..ScoringOptions::default()
        };
        let scorer = RelevanceScorer::new(StopWords::bundled(), &stemmer, &options);
        let body = "alpha alpha beta beta gamma gamma delta delta epsilon epsilon";
        assert_eq!(scorer.score("", body).len(), 3);
    }

    #[test]
    fn test_empty_input() {
        let stemmer = NoStem;
        let options = ScoringOptions::default();
        let scorer = RelevanceScorer::new(StopWords::bundled(), &stemmer, &options);
        assert!(scorer.score("", "").is_empty());
    }
}
