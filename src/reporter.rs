//! Crawl report and frequency-matrix files. A pure sink: nothing in the
//! pipeline depends on what gets written here.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data_models::Corpus;
use crate::indexer::TermIndex;

const SECTION_SEPARATOR: &str = "-------------------------";

/// Writes the term-frequency matrix as CSV: a header of document column
/// labels, then one `word,count,count,...` row per vocabulary word.
pub fn write_matrix_csv(path: &Path, index: &TermIndex) -> Result<()> {
    let mut out = String::new();
    out.push(',');
    out.push_str(
        &(0..index.num_docs)
            .map(|doc| format!("Doc{doc}"))
            .collect::<Vec<String>>()
            .join(","),
    );
    out.push('\n');
    for (word, row) in index.vocabulary.iter().zip(&index.matrix) {
        out.push_str(word);
        for count in row {
            out.push(',');
            out.push_str(&count.to_string());
        }
        out.push('\n');
    }
    fs::write(path, out).with_context(|| format!("writing matrix to {}", path.display()))
}

/// Writes the human-readable crawl report: domain, vocabulary size, the six
/// URL classification lists, the URL/title table and the top-N word table.
pub fn write_report(path: &Path, corpus: &Corpus, index: &TermIndex, top_n: usize) -> Result<()> {
    let mut out = String::new();
    out.push_str(&format!("Domain URL: {}\n", corpus.domain));
    out.push_str(&format!(
        "Generated: {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!(
        "Total number of words: {}\n",
        index.vocabulary.len()
    ));

    push_list(&mut out, "Crawled URL:", corpus.crawled.iter());
    push_set(&mut out, "Duplicate URL:", &corpus.duplicate);
    push_set(&mut out, "Broken URL:", &corpus.broken);
    push_set(&mut out, "Out of domain URL:", &corpus.out_of_domain);
    push_set(&mut out, "Invalid URL:", &corpus.invalid);
    push_set(&mut out, "Non text URL:", &corpus.non_text);

    out.push_str(SECTION_SEPARATOR);
    out.push_str("\nURL and Title:\n");
    let mut titled: Vec<(&String, &String)> = corpus
        .url_title
        .iter()
        .map(|(url, (title, _))| (url, title))
        .collect();
    titled.sort();
    let rows: Vec<Vec<String>> = titled
        .into_iter()
        .map(|(url, title)| vec![url.clone(), title.clone()])
        .collect();
    out.push_str(&render_table(&["URL", "Title"], &rows));

    out.push_str(SECTION_SEPARATOR);
    out.push_str(&format!("\ntop {top_n} words:\n"));
    let rows: Vec<Vec<String>> = index
        .top_words(top_n)
        .into_iter()
        .map(|w| {
            vec![
                w.word,
                w.total_frequency.to_string(),
                w.document_frequency.to_string(),
            ]
        })
        .collect();
    out.push_str(&render_table(
        &["Word", "Frequency", "Document frequency"],
        &rows,
    ));

    fs::write(path, out).with_context(|| format!("writing report to {}", path.display()))
}

fn push_list<'a>(out: &mut String, heading: &str, urls: impl Iterator<Item = &'a String>) {
    out.push_str(SECTION_SEPARATOR);
    out.push('\n');
    out.push_str(heading);
    out.push('\n');
    for url in urls {
        out.push_str(url);
        out.push('\n');
    }
}

fn push_set(out: &mut String, heading: &str, urls: &BTreeSet<String>) {
    push_list(out, heading, urls.iter());
}

/// Plain-text box table, one header row and left-aligned cells.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let rule: String = {
        let mut r = String::from("+");
        for w in &widths {
            r.push_str(&"-".repeat(w + 2));
            r.push('+');
        }
        r.push('\n');
        r
    };
    let render_row = |cells: &[String]| -> String {
        let mut line = String::from("|");
        for (i, cell) in cells.iter().enumerate() {
            line.push_str(&format!(" {:<width$} |", cell, width = widths[i]));
        }
        line.push('\n');
        line
    };

    let mut out = rule.clone();
    out.push_str(&render_row(
        &headers.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
    ));
    out.push_str(&rule);
    for row in rows {
        out.push_str(&render_row(row));
    }
    out.push_str(&rule);
    out
}
