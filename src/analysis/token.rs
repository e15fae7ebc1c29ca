//! Token types for text analysis.
//!
//! A [`Token`] is the unit flowing through the analysis pipeline: tokenizers
//! produce them, filters rewrite them, and the index consumes them.
//!
//! # Positions
//!
//! Tokens describe positions relatively through `position_increment` and
//! `position_length`. A synonym stacked on top of an original token has an
//! increment of 0; a single-word synonym replacing a multi-word phrase spans
//! several positions:
//!
//! ```text
//! Input: "national hockey league"
//! Rule:  national hockey league => nhl (keep original)
//!
//!   "national" (pos_inc=1, pos_len=1)
//!   "nhl"      (pos_inc=0, pos_len=3)  <- same position, spans 3
//!   "hockey"   (pos_inc=1, pos_len=1)
//!   "league"   (pos_inc=1, pos_len=1)
//! ```
//!
//! # Examples
//!
//! ```
//! use synfilter::analysis::token::Token;
//!
//! let token = Token::with_offsets("world", 1, 6, 11);
//! assert_eq!(token.text, "world");
//! assert_eq!(token.start_offset, 6);
//! assert_eq!(token.end_offset, 11);
//! assert_eq!(token.position_increment, 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single analyzed token.
///
/// `Clone` doubles as the attribute snapshot used by filters that need to
/// look ahead and replay tokens later.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// Absolute position in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Position increment from the previous token (default: 1).
    ///
    /// - 1: next position
    /// - 0: same position as the previous token (stacked synonyms)
    /// - >1: skipped positions (e.g. removed stop words)
    pub position_increment: usize,

    /// How many positions this token spans (default: 1).
    pub position_length: usize,

    /// Classification of the token content.
    pub token_type: TokenType,
}

/// Token type classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Alphanumeric word
    #[default]
    Word,
    /// Numeric value
    Num,
    /// Punctuation only
    Punctuation,
    /// Token produced by the synonym filter
    Synonym,
    /// Anything else
    Other,
}

impl TokenType {
    /// Short label used when printing token streams.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Word => "word",
            TokenType::Num => "num",
            TokenType::Punctuation => "punctuation",
            TokenType::Synonym => "synonym",
            TokenType::Other => "other",
        }
    }

    /// Classify a word by its characters.
    pub fn detect(word: &str) -> TokenType {
        if word.is_empty() {
            TokenType::Other
        } else if word.chars().all(|c| c.is_ascii_digit()) {
            TokenType::Num
        } else if word.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
            TokenType::Word
        } else if word.chars().all(|c| c.is_ascii_punctuation()) {
            TokenType::Punctuation
        } else {
            TokenType::Other
        }
    }
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            position_increment: 1,
            position_length: 1,
            token_type: TokenType::Word,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            start_offset,
            end_offset,
            ..Token::new(text, position)
        }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Clone this token with updated text.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        let mut token = self.clone();
        token.text = text.into();
        token
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }

    /// Set the position length.
    pub fn with_position_length(mut self, length: usize) -> Self {
        self.position_length = length;
        self
    }

    /// Whether this token was generated by the synonym filter.
    pub fn is_synonym(&self) -> bool {
        self.token_type == TokenType::Synonym
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}
