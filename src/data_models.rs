use std::collections::{BTreeSet, HashMap};
use std::fmt;

use sha2::{Digest, Sha256};

/// Content-hash identifier of a document.
///
/// Two URLs whose extracted text is byte-identical collapse to the same id;
/// the second and later ones are recorded as duplicates and never indexed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocId(String);

impl DocId {
    pub fn of_text(text: &str) -> DocId {
        DocId(hex::encode(Sha256::digest(text.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a URL's path suffix says about its content, decided once per URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Markup,
    PlainText,
    NonText,
}

impl ContentKind {
    pub fn of_url(url: &str) -> ContentKind {
        if url.ends_with('/')
            || url.ends_with(".html")
            || url.ends_with(".htm")
            || url.ends_with(".php")
        {
            ContentKind::Markup
        } else if url.ends_with(".txt") {
            ContentKind::PlainText
        } else {
            ContentKind::NonText
        }
    }

    /// Markup and plain text pages get tokenized and (for markup) link-followed.
    pub fn is_text(self) -> bool {
        !matches!(self, ContentKind::NonText)
    }
}

/// Everything the crawl produced: documents, titles, and the classification
/// of every URL whose fetch resolved.
///
/// A URL lands in exactly one of the six classes. `crawled` keeps insertion
/// order because it fixes the frequency-matrix column order; the other
/// classes are sorted sets so reports come out reproducible.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub domain: String,
    pub url_title: HashMap<String, (String, DocId)>,
    pub documents: HashMap<DocId, Vec<String>>,
    pub crawled: Vec<String>,
    pub broken: BTreeSet<String>,
    pub duplicate: BTreeSet<String>,
    pub invalid: BTreeSet<String>,
    pub out_of_domain: BTreeSet<String>,
    pub non_text: BTreeSet<String>,
}

impl Corpus {
    pub fn new(domain: String) -> Corpus {
        Corpus {
            domain,
            ..Default::default()
        }
    }

    pub fn is_duplicate(&self, id: &DocId) -> bool {
        self.documents.contains_key(id)
    }

    /// Stored title of a URL, if the URL was recorded.
    pub fn title_of(&self, url: &str) -> Option<&str> {
        self.url_title.get(url).map(|(title, _)| title.as_str())
    }

    /// Token sequence behind a crawled URL; empty for unknown URLs.
    pub fn tokens_for(&self, url: &str) -> &[String] {
        self.url_title
            .get(url)
            .and_then(|(_, id)| self.documents.get(id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// One scored entry of a ranked query answer.
#[derive(Debug, Clone)]
pub struct RankedResult {
    pub score: f64,
    pub url: String,
    pub title: String,
    /// First twenty normalized words of the document.
    pub preview: String,
}

/// Landing page returned when ranking produced nothing.
#[derive(Debug, Clone)]
pub struct FallbackPage {
    pub url: String,
    pub title: Option<String>,
}

/// Answer to a query: ranked matches, or the fixed landing pages when no
/// document scored above zero.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    Ranked(Vec<RankedResult>),
    Fallback(Vec<FallbackPage>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_id_is_deterministic() {
        let a = DocId::of_text("same text");
        let b = DocId::of_text("same text");
        let c = DocId::of_text("other text");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn content_kind_from_suffix() {
        assert_eq!(ContentKind::of_url("https://e.com/dir/"), ContentKind::Markup);
        assert_eq!(ContentKind::of_url("https://e.com/a.html"), ContentKind::Markup);
        assert_eq!(ContentKind::of_url("https://e.com/a.htm"), ContentKind::Markup);
        assert_eq!(ContentKind::of_url("https://e.com/a.php"), ContentKind::Markup);
        assert_eq!(ContentKind::of_url("https://e.com/a.txt"), ContentKind::PlainText);
        assert_eq!(ContentKind::of_url("https://e.com/a.png"), ContentKind::NonText);
        assert_eq!(ContentKind::of_url("https://e.com/a.pdf"), ContentKind::NonText);
        assert!(ContentKind::of_url("https://e.com/a.txt").is_text());
        assert!(!ContentKind::of_url("https://e.com/a.png").is_text());
    }
}
