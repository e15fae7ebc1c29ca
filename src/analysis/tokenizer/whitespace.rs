//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::error::Result;

/// A tokenizer that splits text on whitespace.
///
/// Offsets are byte offsets into the input; every token has a position
/// increment of 1.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;

        for (idx, ch) in text.char_indices() {
            match (ch.is_whitespace(), start) {
                (true, Some(s)) => {
                    tokens.push(Self::make_token(text, tokens.len(), s, idx));
                    start = None;
                }
                (false, None) => start = Some(idx),
                _ => {}
            }
        }
        if let Some(s) = start {
            tokens.push(Self::make_token(text, tokens.len(), s, text.len()));
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

impl WhitespaceTokenizer {
    fn make_token(text: &str, position: usize, start: usize, end: usize) -> Token {
        let word = &text[start..end];
        Token::with_offsets(word, position, start, end).with_token_type(TokenType::detect(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_tokenizer() {
        let tokenizer = WhitespaceTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("hello  world\ttest").unwrap().collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[2].text, "test");
        assert_eq!((tokens[1].start_offset, tokens[1].end_offset), (7, 12));
        assert_eq!(tokens[2].position, 2);
    }

    #[test]
    fn test_repeated_words_get_their_own_offsets() {
        let tokens: Vec<Token> = WhitespaceTokenizer::new()
            .tokenize("a b a")
            .unwrap()
            .collect();

        assert_eq!((tokens[2].start_offset, tokens[2].end_offset), (4, 5));
    }

    #[test]
    fn test_multibyte_offsets() {
        let tokens: Vec<Token> = WhitespaceTokenizer::new()
            .tokenize(" ü $")
            .unwrap()
            .collect();

        assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (1, 3));
        assert_eq!(tokens[1].token_type, TokenType::Punctuation);
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(WhitespaceTokenizer::new().name(), "whitespace");
    }
}
