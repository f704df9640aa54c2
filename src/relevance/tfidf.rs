//! Term frequency / inverse document frequency index.

use std::collections::HashMap;

use crate::text::{word_tokens, StopWords};

/// A small in-memory TF-IDF index.
///
/// Documents are bags of lowercase word tokens with common words removed.
#[derive(Debug, Default)]
pub struct TfIdf {
    documents: Vec<HashMap<String, usize>>,
}

impl TfIdf {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a document, returning its position.
    pub fn add_document(&mut self, text: &str, stop_words: &StopWords) -> usize {
        let mut counts = HashMap::new();
        for token in word_tokens(text) {
            if stop_words.contains(&token) {
                continue;
            }
            *counts.entry(token).or_insert(0) += 1;
        }
        self.documents.push(counts);
        self.documents.len() - 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Occurrences of `term` in document `doc`.
    #[must_use]
    pub fn tf(&self, term: &str, doc: usize) -> usize {
        self.documents
            .get(doc)
            .and_then(|counts| counts.get(term))
            .copied()
            .unwrap_or(0)
    }

    /// `1 + ln(N / (1 + df))`.
    ///
    /// With a single document containing the term this is `1 + ln(1/2)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn idf(&self, term: &str) -> f64 {
        let df = self
            .documents
            .iter()
            .filter(|counts| counts.contains_key(term))
            .count();
        1.0 + (self.documents.len() as f64 / (1.0 + df as f64)).ln()
    }

    /// Sum of `tf * idf` over the word tokens of `terms` in document `doc`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn tfidf(&self, terms: &str, doc: usize) -> f64 {
        word_tokens(terms)
            .iter()
            .map(|term| {
                let tf = self.tf(term, doc);
                if tf == 0 {
                    0.0
                } else {
                    tf as f64 * self.idf(term)
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_document_scores() {
        let mut index = TfIdf::new();
        let doc = index.add_document("Fox fox fox jumps over the dog", StopWords::bundled());

        assert_eq!(doc, 0);
        assert_eq!(index.tf("fox", doc), 3);
        assert_eq!(index.tf("the", doc), 0);

        let expected = 3.0 * (1.0 + 0.5_f64.ln());
        assert!((index.tfidf("fox", doc) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_phrase_sums_tokens() {
        let mut index = TfIdf::new();
        index.add_document("red fox red fox red", StopWords::bundled());

        let idf = 1.0 + 0.5_f64.ln();
        assert!((index.tfidf("red fox", 0) - 5.0 * idf).abs() < 1e-12);
    }

    #[test]
    fn test_idf_across_documents() {
        let mut index = TfIdf::new();
        index.add_document("apple pie", StopWords::bundled());
        index.add_document("apple tart", StopWords::bundled());
        index.add_document("cherry tart", StopWords::bundled());

        assert!(index.idf("pie") > index.idf("apple"));
        assert!((index.idf("pie") - (1.0 + 1.5_f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_missing_term_and_document() {
        let mut index = TfIdf::new();
        index.add_document("alpha", StopWords::bundled());
        assert_eq!(index.tfidf("beta", 0), 0.0);
        assert_eq!(index.tfidf("alpha", 7), 0.0);
    }
}
