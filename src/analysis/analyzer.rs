//! Analyzers combine a tokenizer with a chain of token filters.
//!
//! The synonym rule parsers run every rule phrase through an [`Analyzer`] so
//! that dictionary entries are normalized the same way as the text they will
//! be matched against.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use synfilter::analysis::analyzer::{Analyzer, PipelineAnalyzer};
//! use synfilter::analysis::token_filter::lowercase::LowercaseFilter;
//! use synfilter::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
//!     .add_filter(Arc::new(LowercaseFilter::new()));
//! let tokens: Vec<_> = analyzer.analyze("Hello World").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so one analyzer can be shared across
/// threads.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &str;
}

pub mod pipeline;

pub use pipeline::PipelineAnalyzer;
