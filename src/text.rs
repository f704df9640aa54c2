//! Text Normalization
//!
//! Turns body text into the lowercase token stream fed to keyword scoring,
//! optionally dropping common words.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::patterns::{NON_WORD, STRAY_TOKEN_CHARS, WHITESPACE, WORD};

static BUNDLED: LazyLock<StopWords> =
    LazyLock::new(|| StopWords::from_list(include_str!("../data/common-words.txt")));

/// A read-only set of common words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Build a set from a newline-separated list.
    ///
    /// Entries are trimmed and lowercased; blank lines and `#` comments are
    /// skipped.
    #[must_use]
    pub fn from_list(list: &str) -> Self {
        let words = list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    /// The English list shipped with the crate, loaded on first use.
    #[must_use]
    pub fn bundled() -> &'static Self {
        &BUNDLED
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(|w| w.into().to_lowercase()).collect(),
        }
    }
}

/// Normalize body text for scoring.
///
/// Every non-word character becomes a space. Each token is lowercased and
/// its digits, quotes, angle brackets and slashes are blanked out. With
/// `filter_common_words`, tokens in `stop_words` are dropped. Whitespace
/// runs collapse to one space and the result is trimmed.
#[must_use]
pub fn normalize(text: &str, stop_words: &StopWords, filter_common_words: bool) -> String {
    let spaced = NON_WORD.replace_all(text, " ");

    let mut out = String::with_capacity(spaced.len());
    for token in spaced.split(' ') {
        let lowered = token.to_lowercase();
        let cleaned = STRAY_TOKEN_CHARS.replace_all(&lowered, " ");
        let cleaned = cleaned.trim();

        if filter_common_words && stop_words.contains(cleaned) {
            continue;
        }
        out.push_str(cleaned);
        out.push(' ');
    }

    WHITESPACE.replace_all(&out, " ").trim().to_string()
}

/// Lowercase word runs of `text`, in order.
pub(crate) fn word_tokens(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Whitespace-delimited token count.
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
