//! TF-IDF vectorizer.
//!
//! Tokens are runs of two or more word characters after lowercasing. The
//! vocabulary is sorted, weights are `count * idf` with smoothed IDF
//! `ln((1 + n) / (1 + df)) + 1`, and every vector is L2-normalized.

use std::collections::{BTreeMap, HashMap, HashSet};

use regex::Regex;

use crate::ml::sparse::SparseVector;
use crate::ml::stop_words::ENGLISH_STOP_WORDS;
use crate::ml::FitError;

const TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Unfitted vectorizer settings.
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    english_stop_words: bool,
}

/// Vocabulary and IDF weights learned from one corpus. Read-only after fit.
#[derive(Debug, Clone)]
pub struct FittedVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    stop_words: HashSet<&'static str>,
    token_pattern: Regex,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_english_stop_words(mut self) -> Self {
        self.english_stop_words = true;
        self
    }

    /// Learns the vocabulary and IDF weights from `documents`.
    pub fn fit<S: AsRef<str>>(&self, documents: &[S]) -> Result<FittedVectorizer, FitError> {
        let token_pattern = Regex::new(TOKEN_PATTERN)?;
        let stop_words: HashSet<&'static str> = if self.english_stop_words {
            ENGLISH_STOP_WORDS.iter().copied().collect()
        } else {
            HashSet::new()
        };

        let mut doc_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let unique: HashSet<String> = tokenize(&token_pattern, &stop_words, doc.as_ref())
                .into_iter()
                .collect();
            for term in unique {
                *doc_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if doc_frequency.is_empty() {
            return Err(FitError::EmptyVocabulary);
        }

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(doc_frequency.len());
        let mut idf = Vec::with_capacity(doc_frequency.len());
        // BTreeMap iteration gives the sorted vocabulary order.
        for (index, (term, df)) in doc_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Ok(FittedVectorizer {
            vocabulary,
            idf,
            stop_words,
            token_pattern,
        })
    }

    /// Fits on `documents` and returns the fitted vectorizer with each
    /// document's vector, index-aligned.
    pub fn fit_transform<S: AsRef<str>>(
        &self,
        documents: &[S],
    ) -> Result<(FittedVectorizer, Vec<SparseVector>), FitError> {
        let fitted = self.fit(documents)?;
        let vectors = documents
            .iter()
            .map(|doc| fitted.transform(doc.as_ref()))
            .collect();
        Ok((fitted, vectors))
    }
}

impl FittedVectorizer {
    /// Number of features (vocabulary size).
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Maps `text` into the fitted feature space. Unknown, stop-word or empty
    /// input produces the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(&self.token_pattern, &self.stop_words, text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = SparseVector::from_pairs(
            counts
                .into_iter()
                .map(|(index, count)| (index, count * self.idf[index]))
                .collect(),
        );
        vector.l2_normalize();
        vector
    }

    #[cfg(test)]
    fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}

fn tokenize(pattern: &Regex, stop_words: &HashSet<&'static str>, text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    pattern
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !stop_words.contains(*token))
        .map(str::to_string)
        .collect()
}
