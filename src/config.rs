use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        start_url: get_env_or_default("SCOUR_START_URL", "https://s2.smu.edu/~fmoore/index.htm"),
        page_limit: parse_env_or_default("SCOUR_PAGE_LIMIT", 100),
        top_words: parse_env_or_default("SCOUR_TOP_WORDS", 20),
        thesaurus_file: get_env_or_default("SCOUR_THESAURUS_FILE", "thesaurus.csv"),
        report_file: get_env_or_default("SCOUR_REPORT_FILE", "result.txt"),
        matrix_file: get_env_or_default("SCOUR_MATRIX_FILE", "tf_matrix.csv"),
        fallback_pages: get_env_or_default(
            "SCOUR_FALLBACK_PAGES",
            "index.htm,schedule.htm,textfiles/index.html,textfiles/extratextfiles/index.php",
        )
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect(),
    }
});

pub struct Config {
    pub start_url: String,
    pub page_limit: usize,
    pub top_words: usize,
    pub thesaurus_file: String,
    pub report_file: String,
    pub matrix_file: String,
    /// Landing pages (relative to the domain) returned when a query matches nothing.
    pub fallback_pages: Vec<String>,
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env_or_default(key: &str, default: usize) -> usize {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a number, got {value:?}")),
        Err(_) => default,
    }
}
