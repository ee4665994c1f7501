use porter_stemmer::stem;

/// A character filter transforms the raw text before tokenization, for
/// example by stripping punctuation from the character stream.
pub trait CharacterFilter: Send + Sync {
    fn filter(&self, text: String) -> String;
}

/// Removes every ASCII punctuation character from the stream.
///
/// Characters are removed, not replaced by spaces, so `"don't"` becomes
/// `"dont"` and hyphenated words fuse. Term frequencies depend on this.
#[derive(Debug, Default)]
pub struct PunctuationStripFilter;

impl CharacterFilter for PunctuationStripFilter {
    fn filter(&self, text: String) -> String {
        text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
    }
}

/// A tokenizer breaks the filtered text into individual tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: String) -> Vec<String>;
}

pub struct WhiteSpaceTokenizer;

impl Tokenizer for WhiteSpaceTokenizer {
    fn tokenize(&self, text: String) -> Vec<String> {
        text.split_whitespace().map(|w| w.to_string()).collect()
    }
}

/// A token with its position in the original token stream. Positions keep
/// their gaps after filtering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextToken {
    pub term: String,
    pub pos: usize,
}

/// A token filter may change or remove tokens from the stream.
pub trait TokenFilter: Send + Sync {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken>;
}

pub struct LowerCaseTokenFilter;

impl TokenFilter for LowerCaseTokenFilter {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken> {
        tokens
            .into_iter()
            .map(|mut t| {
                t.term = t.term.to_lowercase();
                t
            })
            .collect()
    }
}

/// Drops leading characters until a token starts with a letter, and drops
/// tokens that nothing survives of. `"$50"` trims to `"50"`, still starts
/// non-alphabetically, and is discarded.
pub struct AlphabeticPrefixFilter;

/// Leading-trim applied to every token; runs after lower-casing, so only
/// `a..z` count as letters. Also used on raw query words.
pub fn trim_to_alphabetic(word: &str) -> &str {
    word.trim_start_matches(|c: char| !c.is_ascii_lowercase())
}

impl TokenFilter for AlphabeticPrefixFilter {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken> {
        tokens
            .into_iter()
            .filter_map(|mut t| {
                let trimmed = trim_to_alphabetic(&t.term);
                if trimmed.is_empty() {
                    None
                } else {
                    t.term = trimmed.to_string();
                    Some(t)
                }
            })
            .collect()
    }
}

pub struct PorterStemmerTokenFilter;

impl TokenFilter for PorterStemmerTokenFilter {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken> {
        tokens
            .into_iter()
            .map(|mut t| {
                t.term = stem(&t.term);
                t
            })
            .collect()
    }
}

/// Pure text analysis pipeline - no I/O, just text transformations.
pub struct TextAnalyzer {
    char_filters: Vec<Box<dyn CharacterFilter>>,
    tokenizer: Box<dyn Tokenizer>,
    token_filters: Vec<Box<dyn TokenFilter>>,
}

impl TextAnalyzer {
    pub fn new(
        char_filters: Vec<Box<dyn CharacterFilter>>,
        tokenizer: Box<dyn Tokenizer>,
        token_filters: Vec<Box<dyn TokenFilter>>,
    ) -> Self {
        Self {
            char_filters,
            tokenizer,
            token_filters,
        }
    }

    /// The document pipeline: strip punctuation, split on whitespace,
    /// lower-case, trim to an alphabetic start, stem. Order matters;
    /// multiplicities are preserved for term-frequency counting.
    pub fn for_documents() -> Self {
        Self::new(
            vec![Box::new(PunctuationStripFilter)],
            Box::new(WhiteSpaceTokenizer),
            vec![
                Box::new(LowerCaseTokenFilter),
                Box::new(AlphabeticPrefixFilter),
                Box::new(PorterStemmerTokenFilter),
            ],
        )
    }

    pub fn char_filter(&self, mut content: String) -> String {
        for filter in self.char_filters.iter() {
            content = filter.filter(content);
        }
        content
    }

    pub fn tokenize(&self, content: String) -> Vec<TextToken> {
        self.tokenizer
            .tokenize(content)
            .into_iter()
            .enumerate()
            .map(|(pos, term)| TextToken { term, pos })
            .collect()
    }

    pub fn token_filter(&self, mut tokens: Vec<TextToken>) -> Vec<TextToken> {
        for filter in self.token_filters.iter() {
            tokens = filter.filter(tokens);
        }
        tokens
    }

    /// Analyzes raw text into the ordered, normalized token stream.
    pub fn analyze(&self, raw_content: &str) -> Vec<TextToken> {
        let content = self.char_filter(raw_content.to_string());
        let tokens = self.tokenize(content);
        self.token_filter(tokens)
    }

    /// Convenience for callers that only want the terms.
    pub fn terms(&self, raw_content: &str) -> Vec<String> {
        self.analyze(raw_content).into_iter().map(|t| t.term).collect()
    }
}
