//! Scour crawls a single web domain under a page budget, builds a
//! term-by-document frequency matrix from the crawled text, and answers
//! free-text queries with TF-IDF cosine ranking.

pub mod analyzer;
pub mod config;
pub mod crawler;
pub mod data_models;
pub mod indexer;
pub mod query_engine;
pub mod reporter;
pub mod robots;
