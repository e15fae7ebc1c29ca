//! Criterion benchmarks for synfilter.
//!
//! Covers dictionary compilation, rule-file parsing, and filter throughput
//! with and without matches.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use synfilter::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use synfilter::analysis::synonym::config::SynonymFilterConfig;
use synfilter::analysis::synonym::map::{SynonymMap, SynonymMapBuilder};
use synfilter::analysis::token_filter::SynonymFilter;
use synfilter::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};

const WORDS: &[&str] = &[
    "search", "engine", "full", "text", "index", "query", "document", "field", "term",
    "phrase", "boolean", "similarity", "relevance", "score", "analysis", "token", "new",
    "york", "city", "national", "hockey", "league", "big", "apple", "data", "structure",
];

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 50 + (i % 100);
        let doc_words: Vec<&str> = (0..doc_length)
            .map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()])
            .collect();
        documents.push(doc_words.join(" "));
    }
    documents
}

/// Rules pairing consecutive vocabulary words, plus a few longer phrases.
fn generate_rules(count: usize) -> Vec<(Vec<String>, Vec<String>)> {
    let mut rules = Vec::with_capacity(count + 3);
    for i in 0..count {
        let len = 1 + i % 3;
        let input: Vec<String> = (0..len)
            .map(|j| WORDS[(i * 5 + j * 13) % WORDS.len()].to_string())
            .collect();
        rules.push((input, vec![format!("syn{i}")]));
    }
    for (input, output) in [
        ("new york city", "nyc"),
        ("national hockey league", "nhl"),
        ("big apple", "new york city"),
    ] {
        rules.push((
            input.split(' ').map(String::from).collect(),
            output.split(' ').map(String::from).collect(),
        ));
    }
    rules
}

fn build_map(rules: &[(Vec<String>, Vec<String>)]) -> SynonymMap {
    let mut builder = SynonymMapBuilder::new(true);
    for (i, (input, output)) in rules.iter().enumerate() {
        builder.add_phrase(input, output, i % 2 == 0).unwrap();
    }
    builder.build().unwrap()
}

/// Benchmark dictionary compilation.
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("synonym_map");

    for count in [100, 1_000] {
        let rules = generate_rules(count);
        group.throughput(Throughput::Elements(rules.len() as u64));
        group.bench_function(format!("build_{count}_rules"), |b| {
            b.iter(|| black_box(build_map(black_box(&rules))))
        });
    }

    let solr: String = generate_rules(1_000)
        .iter()
        .map(|(input, output)| format!("{} => {}\n", input.join(" "), output.join(" ")))
        .collect();
    let config = SynonymFilterConfig::default();
    group.bench_function("parse_solr_1000_rules", |b| {
        b.iter(|| black_box(config.build_map(black_box(&solr)).unwrap()))
    });

    group.finish();
}

/// Benchmark the filter over generated documents.
fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("synonym_filter");

    let texts = generate_test_documents(100);
    let total_bytes: usize = texts.iter().map(String::len).sum();
    let tokenizer = WhitespaceTokenizer::new();

    group.throughput(Throughput::Bytes(total_bytes as u64));
    group.bench_function("tokenize_only", |b| {
        b.iter(|| {
            for text in &texts {
                black_box(tokenizer.tokenize(black_box(text)).unwrap().count());
            }
        })
    });

    let dense = SynonymFilter::new(build_map(&generate_rules(1_000)), false).unwrap();
    group.bench_function("filter_dense_matches", |b| {
        b.iter(|| {
            for text in &texts {
                let tokens = tokenizer.tokenize(black_box(text)).unwrap();
                black_box(dense.wrap(tokens).count());
            }
        })
    });

    let mut builder = SynonymMapBuilder::new(true);
    builder
        .add_phrase(&["never", "matches"], &["nothing"], false)
        .unwrap();
    let sparse = SynonymFilter::new(builder.build().unwrap(), false).unwrap();
    group.bench_function("filter_no_matches", |b| {
        b.iter(|| {
            for text in &texts {
                let tokens = tokenizer.tokenize(black_box(text)).unwrap();
                black_box(sparse.wrap(tokens).count());
            }
        })
    });

    let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
        .add_filter(Arc::new(SynonymFilter::new(build_map(&generate_rules(100)), true).unwrap()));
    group.bench_function("analyze_ignore_case", |b| {
        b.iter(|| {
            for text in &texts {
                black_box(analyzer.analyze(black_box(text)).unwrap().count());
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_filter);
criterion_main!(benches);
