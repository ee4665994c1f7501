use scour::data_models::{Corpus, DocId};
use scour::indexer::TermIndex;
use scour::reporter;

fn make_corpus() -> Corpus {
    let mut corpus = Corpus::new("https://example.com/".to_string());
    for (url, title, tokens) in [
        ("https://example.com/a.html", "page a", "apple banana"),
        ("https://example.com/b.html", "", "banana"),
    ] {
        let doc_id = DocId::of_text(url);
        corpus
            .url_title
            .insert(url.to_string(), (title.to_string(), doc_id.clone()));
        corpus.documents.insert(
            doc_id,
            tokens.split_whitespace().map(|t| t.to_string()).collect(),
        );
        corpus.crawled.push(url.to_string());
    }
    corpus
        .broken
        .insert("https://example.com/missing.html".to_string());
    corpus
        .duplicate
        .insert("https://example.com/copy.html".to_string());
    corpus
        .out_of_domain
        .insert("http://elsewhere.example/".to_string());
    corpus
        .non_text
        .insert("https://example.com/logo.png".to_string());
    corpus
}

#[test]
fn test_matrix_csv_layout() {
    let corpus = make_corpus();
    let index = TermIndex::build(&corpus);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tf_matrix.csv");

    reporter::write_matrix_csv(&path, &index).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], ",Doc0,Doc1");
    assert_eq!(lines[1], "apple,1,0");
    assert_eq!(lines[2], "banana,1,1");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_matrix_csv_empty_index() {
    let corpus = Corpus::new("https://example.com/".to_string());
    let index = TermIndex::build(&corpus);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tf_matrix.csv");

    reporter::write_matrix_csv(&path, &index).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, ",\n");
}

#[test]
fn test_report_contents() {
    let corpus = make_corpus();
    let index = TermIndex::build(&corpus);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.txt");

    reporter::write_report(&path, &corpus, &index, 5).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("Domain URL: https://example.com/\n"));
    assert!(written.contains("Total number of words: 2\n"));

    // All six classification sections are present with their members.
    assert!(written.contains("Crawled URL:\nhttps://example.com/a.html\n"));
    assert!(written.contains("Duplicate URL:\nhttps://example.com/copy.html\n"));
    assert!(written.contains("Broken URL:\nhttps://example.com/missing.html\n"));
    assert!(written.contains("Out of domain URL:\nhttp://elsewhere.example/\n"));
    assert!(written.contains("Invalid URL:\n"));
    assert!(written.contains("Non text URL:\nhttps://example.com/logo.png\n"));

    // URL/title table and the word-frequency table.
    assert!(written.contains("URL and Title:"));
    assert!(written.contains("| https://example.com/a.html | page a |"));
    assert!(written.contains("top 5 words:"));
    assert!(written.contains("| Word"));
    assert!(written.contains("| banana"));
}
