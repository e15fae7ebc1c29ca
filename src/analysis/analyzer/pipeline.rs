//! Tokenizer plus filter chain.
//!
//! A pipeline plays two roles here. The rule parsers run every rule phrase
//! through one to split it into words, so `"Big  Apple"` becomes the
//! dictionary phrase `big\0apple` when the pipeline lowercases. At query
//! time the same kind of pipeline feeds the synonym filter, which goes last
//! so it sees tokens normalized the way its rules were.
//!
//! ```
//! use std::sync::Arc;
//!
//! use synfilter::analysis::analyzer::{Analyzer, PipelineAnalyzer};
//! use synfilter::analysis::synonym::SynonymMapBuilder;
//! use synfilter::analysis::token_filter::{LowercaseFilter, SynonymFilter};
//! use synfilter::analysis::tokenizer::WhitespaceTokenizer;
//!
//! let mut builder = SynonymMapBuilder::new(true);
//! builder.add_phrase(&["big", "apple"], &["nyc"], false).unwrap();
//! let synonyms = SynonymFilter::new(builder.build().unwrap(), false).unwrap();
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .add_filter(Arc::new(synonyms));
//!
//! let texts: Vec<String> = analyzer.analyze("the Big APPLE").unwrap().map(|t| t.text).collect();
//! assert_eq!(texts, vec!["the", "nyc"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// Analyzer made of one tokenizer and an ordered chain of filters.
///
/// Filters wrap the stream in the order they were added, so the last one
/// added sees the output of all the others.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
