use std::collections::HashMap;
use std::fs;
use std::path::Path;

use porter_stemmer::stem;

use crate::analyzer::trim_to_alphabetic;
use crate::data_models::{Corpus, FallbackPage, QueryOutcome, RankedResult};
use crate::indexer::TermIndex;

/// Flat bonus per expanded query word found as a substring of a title.
pub const TITLE_BONUS: f64 = 0.1;
pub const DEFAULT_TOP_K: usize = 5;
const PREVIEW_WORDS: usize = 20;

/// Ranks crawled documents against free-text queries.
///
/// Borrows the corpus and index, which are read-only once built; `n` and the
/// per-word document frequencies are precomputed at construction.
pub struct SearchEngine<'a> {
    corpus: &'a Corpus,
    index: &'a TermIndex,
    thesaurus: HashMap<String, Vec<String>>,
    fallback_paths: Vec<String>,
    n: usize,
    df: Vec<usize>,
}

impl<'a> SearchEngine<'a> {
    pub fn new(corpus: &'a Corpus, index: &'a TermIndex, fallback_paths: Vec<String>) -> Self {
        SearchEngine {
            n: corpus.crawled.len(),
            df: index.document_frequencies(),
            corpus,
            index,
            thesaurus: HashMap::new(),
            fallback_paths,
        }
    }

    /// Loads a comma-separated thesaurus (`word,alt1,alt2,...`). Callers
    /// treat a failure as a warning and keep the empty thesaurus.
    pub fn load_thesaurus(&mut self, path: &Path) -> anyhow::Result<usize> {
        let text = fs::read_to_string(path)?;
        self.thesaurus = parse_thesaurus(&text);
        Ok(self.thesaurus.len())
    }

    pub fn set_thesaurus(&mut self, thesaurus: HashMap<String, Vec<String>>) {
        self.thesaurus = thesaurus;
    }

    /// Log-dampened term frequency times inverse document frequency, over a
    /// count vector indexed like the vocabulary.
    ///
    /// `df` can never be zero for an in-vocabulary word, but the guard keeps
    /// a bad index from turning into a NaN.
    pub fn tf_idf(&self, counts: &[u32]) -> Vec<f64> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let df = self.df.get(i).copied().unwrap_or(0);
                if count == 0 || df == 0 || self.n == 0 {
                    0.0
                } else {
                    (1.0 + (count as f64).log10()) * (self.n as f64 / df as f64).log10()
                }
            })
            .collect()
    }

    /// Dot product of the L2-normalized tf-idf weight vectors.
    pub fn cosine_similarity(&self, query_counts: &[u32], doc_counts: &[u32]) -> f64 {
        let q = l2_normalize(self.tf_idf(query_counts));
        let d = l2_normalize(self.tf_idf(doc_counts));
        q.iter().zip(&d).map(|(a, b)| a * b).sum()
    }

    /// Scores every crawled document against the query and returns the top
    /// `k`, or the fixed landing pages when nothing scores above zero.
    pub fn query(&self, text: &str, k: usize) -> QueryOutcome {
        // Lower-case, split on whitespace, trim each word to an alphabetic
        // start. No punctuation stripping on the query side.
        let lowered = text.to_lowercase();
        let mut words: Vec<String> = lowered
            .split_whitespace()
            .map(trim_to_alphabetic)
            .filter(|w| !w.is_empty())
            .map(|w| w.to_string())
            .collect();

        // One-level thesaurus expansion: only the original words are looked
        // up; appended alternatives are never expanded themselves.
        let original_count = words.len();
        for i in 0..original_count {
            if let Some(alternatives) = self.thesaurus.get(&words[i]) {
                words.extend(alternatives.iter().cloned());
            }
        }

        // Title boost on the raw, pre-stem expanded words.
        let mut scores = vec![0.0f64; self.corpus.crawled.len()];
        for word in &words {
            for (doc, url) in self.corpus.crawled.iter().enumerate() {
                if let Some(title) = self.corpus.title_of(url) {
                    if title.contains(word.as_str()) {
                        scores[doc] += TITLE_BONUS;
                    }
                }
            }
        }

        // Stem, keep in-vocabulary terms, build the query count vector.
        let terms: Vec<String> = words
            .iter()
            .map(|w| stem(w))
            .filter(|t| self.index.term_position(t).is_some())
            .collect();
        log::info!("query converted into: {terms:?}");

        let mut query_counts = vec![0u32; self.index.term_count()];
        for term in &terms {
            if let Some(i) = self.index.term_position(term) {
                query_counts[i] += 1;
            }
        }

        for doc in 0..self.corpus.crawled.len() {
            scores[doc] += self.cosine_similarity(&query_counts, &self.index.column(doc));
        }

        // Rank descending; the stable sort keeps crawl order within ties.
        // Non-positive scores never qualify.
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let results: Vec<RankedResult> = order
            .into_iter()
            .filter(|&doc| scores[doc] > 0.0)
            .take(k)
            .map(|doc| self.ranked_result(scores[doc], &self.corpus.crawled[doc]))
            .collect();

        if results.is_empty() {
            QueryOutcome::Fallback(self.fallback_pages())
        } else {
            QueryOutcome::Ranked(results)
        }
    }

    fn ranked_result(&self, score: f64, url: &str) -> RankedResult {
        RankedResult {
            score,
            url: url.to_string(),
            title: self.corpus.title_of(url).unwrap_or("").to_string(),
            preview: self
                .corpus
                .tokens_for(url)
                .iter()
                .take(PREVIEW_WORDS)
                .cloned()
                .collect::<Vec<String>>()
                .join(" "),
        }
    }

    /// The domain's landing pages, titled where the crawl saw them.
    pub fn fallback_pages(&self) -> Vec<FallbackPage> {
        self.fallback_paths
            .iter()
            .map(|path| {
                let url = format!("{}{}", self.corpus.domain, path);
                let title = self.corpus.title_of(&url).map(|t| t.to_string());
                FallbackPage { url, title }
            })
            .collect()
    }
}

/// L2-normalizes a vector; the zero vector normalizes to itself.
pub fn l2_normalize(mut v: Vec<f64>) -> Vec<f64> {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
    v
}

/// Parses comma-separated thesaurus rows. A row with no alternatives maps
/// its word to an empty list; blank lines are skipped.
pub fn parse_thesaurus(text: &str) -> HashMap<String, Vec<String>> {
    let mut thesaurus = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split(',').map(str::trim);
        let Some(word) = fields.next() else {
            continue;
        };
        if word.is_empty() {
            continue;
        }
        thesaurus.insert(
            word.to_string(),
            fields
                .filter(|f| !f.is_empty())
                .map(|f| f.to_string())
                .collect(),
        );
    }
    thesaurus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_normalize() {
        let v = l2_normalize(vec![3.0, 4.0]);
        assert!((v[0] - 0.6).abs() < 1e-12);
        assert!((v[1] - 0.8).abs() < 1e-12);
        let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_l2_normalize_zero_vector() {
        assert_eq!(l2_normalize(vec![0.0, 0.0, 0.0]), vec![0.0, 0.0, 0.0]);
        assert_eq!(l2_normalize(vec![]), Vec::<f64>::new());
    }

    #[test]
    fn test_parse_thesaurus() {
        let text = "car,automobile,vehicle\nplane, jet\nbare\n\n,orphan\n";
        let thesaurus = parse_thesaurus(text);
        assert_eq!(
            thesaurus.get("car"),
            Some(&vec!["automobile".to_string(), "vehicle".to_string()])
        );
        assert_eq!(thesaurus.get("plane"), Some(&vec!["jet".to_string()]));
        assert_eq!(thesaurus.get("bare"), Some(&Vec::new()));
        assert_eq!(thesaurus.len(), 3);
    }
}
