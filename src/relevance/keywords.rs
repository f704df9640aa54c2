//! Frequency-ranked keyword candidates.
//!
//! Candidates are n-grams of lowercase word tokens, keyed by their stems so
//! that morphological variants ("run", "runs") count together. A candidate
//! reports the surface form it was seen with most often.

use std::collections::HashMap;

use crate::options::ScoringOptions;
use crate::text::{word_tokens, StopWords};

use super::Stem;

/// A ranked candidate term or phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Most frequent surface form.
    pub term: String,
    /// Occurrences of the stem key.
    pub count: usize,
}

#[derive(Debug)]
struct Tally {
    stems: Vec<String>,
    count: usize,
    first: usize,
    surfaces: Vec<(String, usize)>,
}

impl Tally {
    fn surface(&self) -> String {
        // max_by_key keeps the last maximum; scan reversed to keep the first
        self.surfaces
            .iter()
            .rev()
            .max_by_key(|(_, n)| *n)
            .map(|(s, _)| s.clone())
            .unwrap_or_default()
    }
}

/// Extract candidates from `text`, highest count first.
///
/// Ties keep first-occurrence order. Candidates below `min_frequency` are
/// dropped, and a candidate contained in a longer candidate with
/// `long.count / short.count >= phrase_cutoff` is absorbed by it.
#[must_use]
pub fn extract_candidates(
    text: &str,
    stop_words: &StopWords,
    stemmer: &dyn Stem,
    options: &ScoringOptions,
) -> Vec<Candidate> {
    let tokens: Vec<String> = word_tokens(text)
        .into_iter()
        .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
        .collect();
    let stems: Vec<String> = tokens.iter().map(|t| stemmer.stem(t).into_owned()).collect();

    let mut tallies: HashMap<String, Tally> = HashMap::new();

    for n in 1..=options.max_ngram.max(1) {
        if n > tokens.len() {
            break;
        }
        for start in 0..=tokens.len() - n {
            let window = &tokens[start..start + n];
            let stem_window = &stems[start..start + n];
            if !is_candidate_window(window, stem_window, stop_words) {
                continue;
            }

            let key = stem_window.join(" ");
            let surface = window.join(" ");

            let tally = tallies.entry(key).or_insert_with(|| Tally {
                stems: stem_window.to_vec(),
                count: 0,
                first: start,
                surfaces: Vec::new(),
            });
            tally.count += 1;
            match tally.surfaces.iter_mut().find(|(s, _)| *s == surface) {
                Some((_, seen)) => *seen += 1,
                None => tally.surfaces.push((surface, 1)),
            }
        }
    }

    let mut ranked: Vec<Tally> = tallies
        .into_values()
        .filter(|t| t.count >= options.min_frequency)
        .collect();

    absorb_contained(&mut ranked, options.phrase_cutoff);

    ranked.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.first.cmp(&b.first))
            .then(b.stems.len().cmp(&a.stems.len()))
            .then_with(|| a.stems.cmp(&b.stems))
    });
    ranked.truncate(options.limit);

    ranked
        .into_iter()
        .map(|t| Candidate {
            term: t.surface(),
            count: t.count,
        })
        .collect()
}

/// A window neither starts nor ends with a stop word, and a phrase is not a
/// single stem repeated ("fox fox", "runs running").
fn is_candidate_window(window: &[String], stems: &[String], stop_words: &StopWords) -> bool {
    let (Some(first), Some(last)) = (window.first(), window.last()) else {
        return false;
    };
    if stop_words.contains(first) || stop_words.contains(last) {
        return false;
    }
    !(stems.len() > 1 && stems.iter().all(|s| *s == stems[0]))
}

fn absorb_contained(tallies: &mut Vec<Tally>, cutoff: f64) {
    let absorbed: Vec<bool> = tallies
        .iter()
        .map(|short| {
            tallies.iter().any(|long| {
                long.stems.len() > short.stems.len()
                    && contains_run(&long.stems, &short.stems)
                    && ratio(long.count, short.count) >= cutoff
            })
        })
        .collect();

    let mut flags = absorbed.into_iter();
    tallies.retain(|_| !flags.next().unwrap_or(false));
}

fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[allow(clippy::cast_precision_loss)]
fn ratio(long: usize, short: usize) -> f64 {
    long as f64 / short as f64
}
