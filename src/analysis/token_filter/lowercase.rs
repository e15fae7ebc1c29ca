//! Per-character lowercasing shared by rule compilation and matching.
//!
//! The synonym matcher folds runtime input one character at a time, so rule
//! phrases must be folded the same way before they are compiled. Both sides
//! use [`lowercase_char`]: the first character of the Unicode lowercase
//! mapping. Multi-character mappings are cut to their first character, which
//! keeps every fold one character wide ('İ' becomes 'i').

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Lowercase one character.
pub fn lowercase_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Lowercase `text` with [`lowercase_char`].
pub fn lowercase(text: &str) -> String {
    text.chars().map(lowercase_char).collect()
}

/// Filter that folds token text with [`lowercase_char`].
///
/// Positions and offsets are preserved.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|mut token| {
            if token.text.chars().any(|c| lowercase_char(c) != c) {
                token.text = lowercase(&token.text);
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_lowercase_char() {
        assert_eq!(lowercase_char('A'), 'a');
        assert_eq!(lowercase_char('Ä'), 'ä');
        assert_eq!(lowercase_char('a'), 'a');
        assert_eq!(lowercase_char('1'), '1');
        // Lowercases to "i\u{307}"; only the first char is kept.
        assert_eq!(lowercase_char('İ'), 'i');
    }

    #[test]
    fn test_lowercase_filter() {
        let filter = LowercaseFilter::new();
        let tokens = vec![
            Token::with_offsets("Hello", 0, 0, 5),
            Token::new("ÜBER", 1),
            Token::with_offsets("İstanbul", 2, 6, 15),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "hello");
        assert_eq!(result[0].end_offset, 5);
        assert_eq!(result[1].text, "über");
        assert_eq!(result[2].text, "istanbul");
        assert_eq!(result[2].start_offset, 6);
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LowercaseFilter::new().name(), "lowercase");
    }
}
