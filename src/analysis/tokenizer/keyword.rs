//! Keyword tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::error::Result;

/// A tokenizer that emits the entire input as a single token.
///
/// Unlike most tokenizers it also emits a token for empty input, so
/// downstream filters see a zero-length term.
#[derive(Clone, Debug, Default)]
pub struct KeywordTokenizer;

impl KeywordTokenizer {
    /// Create a new keyword tokenizer.
    pub fn new() -> Self {
        KeywordTokenizer
    }
}

impl Tokenizer for KeywordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let token = Token::with_offsets(text, 0, 0, text.len())
            .with_token_type(TokenType::detect(text));
        Ok(Box::new(std::iter::once(token)))
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}
