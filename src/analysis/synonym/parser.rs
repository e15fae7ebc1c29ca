//! Synonym rule-file parsers.
//!
//! Both formats share [`SynonymParser`], which owns the map builder and runs
//! every rule phrase through an [`Analyzer`] so that dictionary entries are
//! normalized exactly like the text they will be matched against.
//!
//! - [`solr::SolrSynonymParser`] - `a, b => c` and `a, b, c` rules
//! - [`wordnet::WordnetSynonymParser`] - WordNet prolog `s(...)` facts

use std::io::BufRead;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::synonym::map::{SynonymMap, SynonymMapBuilder, WORD_SEPARATOR};
use crate::error::{Result, SynfilterError};

pub mod solr;
pub mod wordnet;

pub use solr::SolrSynonymParser;
pub use wordnet::WordnetSynonymParser;

/// Builder plus analyzer shared by the rule-file parsers.
pub struct SynonymParser {
    builder: SynonymMapBuilder,
    analyzer: Arc<dyn Analyzer>,
}

impl SynonymParser {
    /// Create a parser whose phrases are normalized by `analyzer`.
    pub fn new(dedup: bool, analyzer: Arc<dyn Analyzer>) -> Self {
        SynonymParser {
            builder: SynonymMapBuilder::new(dedup),
            analyzer,
        }
    }

    /// Analyze `text` and join the resulting terms with the word separator.
    ///
    /// Every token must be non-empty and follow the previous one directly
    /// (position increment 1), and at least one token must survive analysis.
    pub fn analyze(&self, text: &str) -> Result<String> {
        let mut phrase = String::new();
        let mut empty = true;
        for token in self.analyzer.analyze(text)? {
            if token.text.is_empty() {
                return Err(SynfilterError::invalid_argument(format!(
                    "term: {text} analyzed to a zero-length token"
                )));
            }
            if token.position_increment != 1 {
                return Err(SynfilterError::invalid_argument(format!(
                    "term: {text} analyzed to a token with posinc != 1"
                )));
            }
            if !empty {
                phrase.push(WORD_SEPARATOR);
            }
            phrase.push_str(&token.text);
            empty = false;
        }
        if empty {
            return Err(SynfilterError::invalid_argument(format!(
                "term: {text} was completely eliminated by analyzer"
            )));
        }
        Ok(phrase)
    }

    /// Add an already analyzed rule.
    pub fn add(&mut self, input: &str, output: &str, include_original: bool) -> Result<()> {
        self.builder.add(input, output, include_original)
    }

    /// The underlying builder.
    pub fn builder(&self) -> &SynonymMapBuilder {
        &self.builder
    }

    /// Compile everything parsed so far.
    pub fn build(self) -> Result<SynonymMap> {
        self.builder.build()
    }
}

/// A synonym rule format.
pub trait RuleParser {
    /// Parse every rule from `reader`.
    ///
    /// Failures are reported as [`SynfilterError::Parse`] carrying the
    /// 1-based line number of the offending rule.
    fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<()>;

    /// Parse rules held in a string.
    fn parse(&mut self, rules: &str) -> Result<()> {
        self.parse_reader(rules.as_bytes())
    }

    /// Compile the parsed rules.
    fn into_map(self) -> Result<SynonymMap>
    where
        Self: Sized;
}

/// Wrap a rule failure with its line number.
fn rule_error(line: usize, cause: SynfilterError) -> SynfilterError {
    match cause {
        SynfilterError::Io(e) => SynfilterError::Io(e),
        cause => SynfilterError::parse_at(line, format!("Invalid synonym rule: {cause}")),
    }
}
