//! Token filter implementations for token transformation.
//!
//! Filters transform the token streams produced by tokenizers. They can
//! modify, remove, or add tokens.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`synonym::SynonymFilter`] - Expands single and multi-word synonyms
//!
//! # Examples
//!
//! ```
//! use synfilter::analysis::token_filter::Filter;
//! use synfilter::analysis::token_filter::lowercase::LowercaseFilter;
//! use synfilter::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` so a configured filter can be shared by
/// analyzers running on several threads; the streams it returns are
/// single-threaded.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod synonym;

pub use lowercase::LowercaseFilter;
pub use synonym::{SynonymFilter, SynonymTokenStream};
