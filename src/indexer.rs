use std::collections::{BTreeSet, HashMap};

use crate::data_models::Corpus;

/// The sorted vocabulary and the dense term-by-document frequency matrix.
///
/// Rows follow vocabulary order, columns follow the corpus's crawl order;
/// both orders are fixed at build time so repeated runs over the same corpus
/// produce identical matrices. Read-only after construction.
pub struct TermIndex {
    pub vocabulary: Vec<String>,
    pub matrix: Vec<Vec<u32>>,
    pub num_docs: usize,
}

/// One row of the report's word-frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopWord {
    pub word: String,
    pub total_frequency: u64,
    pub document_frequency: usize,
}

impl TermIndex {
    /// Collects the vocabulary and counts every word in every crawled
    /// document. One counting pass per document, then dense rows.
    pub fn build(corpus: &Corpus) -> TermIndex {
        let vocabulary: Vec<String> = corpus
            .documents
            .values()
            .flatten()
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();

        let columns: Vec<HashMap<&str, u32>> = corpus
            .crawled
            .iter()
            .map(|url| {
                let mut counts = HashMap::new();
                for term in corpus.tokens_for(url) {
                    *counts.entry(term.as_str()).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let matrix = vocabulary
            .iter()
            .map(|word| {
                columns
                    .iter()
                    .map(|counts| counts.get(word.as_str()).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        TermIndex {
            vocabulary,
            matrix,
            num_docs: corpus.crawled.len(),
        }
    }

    pub fn term_count(&self) -> usize {
        self.vocabulary.len()
    }

    /// Row index of a term, if it is in the vocabulary.
    pub fn term_position(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|word| word.as_str().cmp(term))
            .ok()
    }

    /// Number of documents with a positive count, per vocabulary word.
    pub fn document_frequencies(&self) -> Vec<usize> {
        self.matrix
            .iter()
            .map(|row| row.iter().filter(|&&count| count > 0).count())
            .collect()
    }

    /// The count vector of one document column.
    pub fn column(&self, doc: usize) -> Vec<u32> {
        self.matrix.iter().map(|row| row[doc]).collect()
    }

    /// The `n` words with the highest total corpus frequency. The stable sort
    /// keeps ties in vocabulary (alphabetical) order.
    pub fn top_words(&self, n: usize) -> Vec<TopWord> {
        let mut words: Vec<TopWord> = self
            .vocabulary
            .iter()
            .zip(&self.matrix)
            .map(|(word, row)| TopWord {
                word: word.clone(),
                total_frequency: row.iter().map(|&count| count as u64).sum(),
                document_frequency: row.iter().filter(|&&count| count > 0).count(),
            })
            .collect();
        words.sort_by(|a, b| b.total_frequency.cmp(&a.total_frequency));
        words.truncate(n);
        words
    }
}
