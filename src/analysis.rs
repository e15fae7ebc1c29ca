//! Text analysis module for synfilter.
//!
//! This module provides tokenization, token filters (including the synonym
//! filter), analysis pipelines and synonym dictionaries.

pub mod analyzer;
pub mod synonym;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
