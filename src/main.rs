use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use scour::config::CONFIG;
use scour::crawler::Crawler;
use scour::data_models::QueryOutcome;
use scour::indexer::TermIndex;
use scour::query_engine::{DEFAULT_TOP_K, SearchEngine};
use scour::reporter;

/// Crawl a single web domain and search it with TF-IDF ranked queries.
#[derive(Parser, Debug)]
#[command(name = "scour", version, about = "Single-domain crawler and TF-IDF search", long_about = None)]
struct Cli {
    /// URL the crawl starts from
    #[arg(value_name = "START_URL")]
    start_url: Option<String>,

    /// Maximum number of successful page fetches
    #[arg(short = 'n', long)]
    page_limit: Option<usize>,

    /// Thesaurus file (comma-separated rows: word,alt1,alt2,...)
    #[arg(long)]
    thesaurus: Option<PathBuf>,

    /// Crawl report output path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Frequency matrix CSV output path
    #[arg(long)]
    matrix: Option<PathBuf>,

    /// Number of rows in the report's word-frequency table
    #[arg(long)]
    top_words: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let start_url = cli.start_url.unwrap_or_else(|| CONFIG.start_url.clone());
    let page_limit = cli.page_limit.unwrap_or(CONFIG.page_limit);
    let top_words = cli.top_words.unwrap_or(CONFIG.top_words);
    let thesaurus_path = cli
        .thesaurus
        .unwrap_or_else(|| PathBuf::from(&CONFIG.thesaurus_file));
    let report_path = cli
        .report
        .unwrap_or_else(|| PathBuf::from(&CONFIG.report_file));
    let matrix_path = cli
        .matrix
        .unwrap_or_else(|| PathBuf::from(&CONFIG.matrix_file));

    log::info!("crawling {start_url} (page limit {page_limit})");
    let crawler = Crawler::new(page_limit)?;
    let corpus = crawler.crawl(&start_url).await;

    let index = TermIndex::build(&corpus);
    log::info!(
        "indexed {} documents, {} distinct terms",
        index.num_docs,
        index.term_count()
    );

    reporter::write_matrix_csv(&matrix_path, &index)?;
    reporter::write_report(&report_path, &corpus, &index, top_words)?;
    log::info!(
        "wrote {} and {}",
        matrix_path.display(),
        report_path.display()
    );

    let mut engine = SearchEngine::new(&corpus, &index, CONFIG.fallback_pages.clone());
    match engine.load_thesaurus(&thesaurus_path) {
        Ok(entries) => log::info!("loaded thesaurus ({entries} entries)"),
        Err(e) => log::warn!(
            "could not load thesaurus {}: {e}",
            thesaurus_path.display()
        ),
    }

    run_query_loop(&engine).await
}

/// Reads one query per line from stdin until the literal input `stop`.
async fn run_query_loop(engine: &SearchEngine<'_>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Enter a query (\"stop\" to quit):");
    while let Some(line) = lines.next_line().await? {
        let query = line.trim();
        if query == "stop" {
            break;
        }
        if !query.is_empty() {
            print_outcome(engine.query(query, DEFAULT_TOP_K));
        }
        println!("Enter a query (\"stop\" to quit):");
    }
    Ok(())
}

fn print_outcome(outcome: QueryOutcome) {
    match outcome {
        QueryOutcome::Ranked(results) => {
            for (rank, result) in results.iter().enumerate() {
                println!("Result {}", rank + 1);
                println!("Score: {:06.4}", result.score);
                println!("URL: {}", result.url);
                if result.title.is_empty() {
                    println!("Title: no title");
                } else {
                    println!("Title: {}", result.title);
                }
                println!("First 20 words: {}", result.preview);
                println!("-----------------------------");
            }
        }
        QueryOutcome::Fallback(pages) => {
            println!("Sorry! Can not find any relative webpage");
            println!("Will return some main pages");
            println!("---------------------------");
            for (rank, page) in pages.iter().enumerate() {
                println!("Result {}", rank + 1);
                println!("URL: {}", page.url);
                println!("Title: {}", page.title.as_deref().unwrap_or("no title"));
                println!("---------------------------");
            }
        }
    }
}
