//! "Did you mean" suggestions for card name words.

use std::collections::BTreeSet;

use strsim::{jaro_winkler, levenshtein};

use crate::normalize::normalize_name;

/// Vocabulary of card titles and title words, built once per corpus.
#[derive(Debug, Clone, Default)]
pub struct SpellingSuggestions {
    words: BTreeSet<String>,
    min_similarity: f64,
}

impl SpellingSuggestions {
    /// Builds the vocabulary from card names.
    pub fn new<'a>(titles: impl IntoIterator<Item = &'a str>, min_similarity: f64) -> Self {
        let mut words = BTreeSet::new();
        for title in titles {
            let title = normalize_name(title);
            for word in title.split(|c: char| c.is_whitespace() || c == ',') {
                if word.len() > 1 {
                    words.insert(word.to_string());
                }
            }
            words.insert(title);
        }
        Self {
            words,
            min_similarity,
        }
    }

    /// Number of known words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Best known spelling close to `word`, if `word` itself is unknown.
    ///
    /// Ranked by Jaro-Winkler similarity, then edit distance, then
    /// alphabetically so the answer is deterministic.
    pub fn suggest(&self, word: &str) -> Option<String> {
        let word = normalize_name(word);
        if word.is_empty() || self.words.contains(&word) {
            return None;
        }
        self.words
            .iter()
            .map(|candidate| (jaro_winkler(&word, candidate), candidate))
            .filter(|(score, _)| *score >= self.min_similarity)
            .min_by(|(score_a, a), (score_b, b)| {
                score_b
                    .total_cmp(score_a)
                    .then_with(|| levenshtein(&word, a).cmp(&levenshtein(&word, b)))
                    .then_with(|| a.cmp(b))
            })
            .map(|(_, candidate)| candidate.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestions() -> SpellingSuggestions {
        SpellingSuggestions::new(
            ["Lightning Bolt", "Llanowar Elves", "Counterspell"],
            0.85,
        )
    }

    #[test]
    fn test_suggests_close_word() {
        assert_eq!(suggestions().suggest("lightnin").as_deref(), Some("lightning"));
        assert_eq!(suggestions().suggest("Counterspel").as_deref(), Some("counterspell"));
    }

    #[test]
    fn test_known_word_has_no_suggestion() {
        assert_eq!(suggestions().suggest("bolt"), None);
        assert_eq!(suggestions().suggest("Lightning Bolt"), None);
    }

    #[test]
    fn test_far_word_has_no_suggestion() {
        assert_eq!(suggestions().suggest("zzzz"), None);
    }
}
