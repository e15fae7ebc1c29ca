//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of an analysis pipeline: they split raw
//! text into [`Token`](crate::analysis::token::Token)s carrying byte offsets
//! and position increments.
//!
//! # Available Tokenizers
//!
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace characters
//! - [`keyword::KeywordTokenizer`] - Emits the entire input as one token
//!
//! # Examples
//!
//! ```
//! use synfilter::analysis::tokenizer::Tokenizer;
//! use synfilter::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so tokenizers can be shared by analyzers
/// used from several threads.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod keyword;
pub mod whitespace;

pub use keyword::KeywordTokenizer;
pub use whitespace::WhitespaceTokenizer;
