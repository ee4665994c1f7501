use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use thiserror::Error;

use crate::analyzer::TextAnalyzer;
use crate::data_models::{ContentKind, Corpus, DocId};
use crate::robots::RobotsPolicy;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a fetch yielded no page. Either way the URL is classified broken and
/// the crawl moves on; nothing here aborts the run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("resource not found (404)")]
    NotFound,
}

/// What the HTML parser hands back for one page. Links are the raw href
/// strings, unresolved: the robots and domain checks look at them as written.
#[derive(Debug, Clone)]
pub struct ParsedPage {
    pub title: Option<String>,
    pub meta_robots: Option<String>,
    pub links: Vec<String>,
    pub text: String,
}

impl ParsedPage {
    pub fn noindex(&self) -> bool {
        self.meta_robots
            .as_deref()
            .is_some_and(|content| content.to_lowercase().contains("noindex"))
    }
}

pub struct Crawler {
    client: Client,
    analyzer: TextAnalyzer,
    page_limit: usize,
}

impl Crawler {
    pub fn new(page_limit: usize) -> Result<Crawler, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("scour/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Crawler {
            client,
            analyzer: TextAnalyzer::for_documents(),
            page_limit,
        })
    }

    /// Breadth-first crawl from `start_url`, bounded by the page budget.
    ///
    /// The budget counts successful fetches, so pages later classified
    /// invalid, duplicate or non-text still consume it. FIFO order means
    /// breadth, not depth, decides what fits under the budget.
    pub async fn crawl(&self, start_url: &str) -> Corpus {
        let domain = domain_of(start_url);
        let robots = self.fetch_robots(&domain).await;
        let mut corpus = Corpus::new(domain);

        let mut frontier: VecDeque<String> = VecDeque::new();
        let mut visited: HashSet<String> = HashSet::new();
        frontier.push_back(start_url.to_string());
        visited.insert(start_url.to_string());

        let mut page_count = 0usize;
        while page_count < self.page_limit {
            let Some(url) = frontier.pop_front() else {
                break;
            };
            log::info!("fetching {url}");
            let body = match self.fetch_page(&url).await {
                Ok(body) => body,
                Err(e) => {
                    log::warn!("{url}: {e}");
                    corpus.broken.insert(url);
                    continue;
                }
            };
            page_count += 1;

            let page = parse_page(&body);
            if page.noindex() {
                corpus.invalid.insert(url);
                continue;
            }

            let title = page.title.as_deref().unwrap_or("").trim().to_lowercase();
            let doc_id = DocId::of_text(&page.text);
            if corpus.is_duplicate(&doc_id) {
                log::debug!("{url}: content already indexed");
                corpus.duplicate.insert(url);
                continue;
            }
            corpus.url_title.insert(url.clone(), (title, doc_id.clone()));

            if !ContentKind::of_url(&url).is_text() {
                corpus.non_text.insert(url);
                continue;
            }

            corpus.documents.insert(doc_id, self.analyzer.terms(&page.text));
            corpus.crawled.push(url.clone());

            let base_dir = directory_of(&url);
            for href in &page.links {
                if robots.is_disallowed(href) {
                    corpus.invalid.insert(format!("{}{}", corpus.domain, href));
                    continue;
                }
                if href.starts_with("http") {
                    corpus.out_of_domain.insert(href.clone());
                    continue;
                }
                // Relative links rebase against the current page's directory,
                // not the crawl's original domain.
                let resolved = format!("{base_dir}/{href}");
                if visited.insert(resolved.clone()) {
                    frontier.push_back(resolved);
                }
            }
        }

        log::info!(
            "crawl finished: {} fetched, {} indexed, {} broken, {} left in frontier",
            page_count,
            corpus.crawled.len(),
            corpus.broken.len(),
            frontier.len()
        );
        corpus
    }

    async fn fetch_robots(&self, domain: &str) -> RobotsPolicy {
        let robots_url = format!("{domain}robots.txt");
        match self.fetch_page(&robots_url).await {
            Ok(body) => {
                let policy = RobotsPolicy::from_content(&body);
                log::info!("robots.txt: {} disallowed prefixes", policy.rules().len());
                policy
            }
            Err(e) => {
                log::warn!("no robots file at {robots_url}: {e}");
                RobotsPolicy::allow_all()
            }
        }
    }

    /// Fetches one URL. Only 404 is special-cased; any other non-2xx status
    /// still returns its body to be parsed like an ordinary page.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        Ok(response.text().await?)
    }
}

/// Extracts title, robots meta directive, raw hrefs and the full text of a
/// page in one parse.
pub fn parse_page(body: &str) -> ParsedPage {
    let document = Html::parse_document(body);

    let title_selector = Selector::parse("title").unwrap();
    let meta_selector = Selector::parse(r#"meta[name="robots"]"#).unwrap();
    let href_selector = Selector::parse("a").unwrap();

    let title = document
        .select(&title_selector)
        .next()
        .map(|t| t.text().collect::<String>());

    let meta_robots = document
        .select(&meta_selector)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(|c| c.to_string());

    let links = document
        .select(&href_selector)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(|href| href.to_string())
        .collect();

    let text = document.root_element().text().collect();

    ParsedPage {
        title,
        meta_robots,
        links,
        text,
    }
}

/// The crawl's domain: the start URL with its trailing file component
/// dropped, keeping the slash.
pub fn domain_of(start_url: &str) -> String {
    match start_url.rsplit_once('/') {
        Some((dir, _)) => format!("{dir}/"),
        None => start_url.to_string(),
    }
}

/// The directory a page's relative links resolve against: everything before
/// the URL's last slash.
fn directory_of(url: &str) -> &str {
    url.rsplit_once('/').map(|(dir, _)| dir).unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_of() {
        assert_eq!(
            domain_of("https://s2.smu.edu/~fmoore/index.htm"),
            "https://s2.smu.edu/~fmoore/"
        );
        assert_eq!(domain_of("https://example.com/"), "https://example.com/");
    }

    #[test]
    fn test_directory_of() {
        assert_eq!(
            directory_of("https://example.com/a/b.html"),
            "https://example.com/a"
        );
        assert_eq!(directory_of("https://example.com/"), "https://example.com");
    }

    #[test]
    fn test_parse_page_extracts_everything() {
        let html = r#"<html><head><title>Test Page</title>
            <meta name="robots" content="noindex, nofollow"></head>
            <body><p>Some body text</p>
            <a href="b.html">B</a>
            <a href="http://other.example/c">C</a>
            <a>no href</a>
            </body></html>"#;
        let page = parse_page(html);
        assert_eq!(page.title.as_deref(), Some("Test Page"));
        assert!(page.noindex());
        assert_eq!(page.links, vec!["b.html", "http://other.example/c"]);
        assert!(page.text.contains("Some body text"));
    }

    #[test]
    fn test_noindex_absent() {
        let page = parse_page("<html><head><title>t</title></head><body></body></html>");
        assert!(!page.noindex());
    }
}
