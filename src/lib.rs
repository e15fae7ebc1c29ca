//! # synfilter
//!
//! Multi-word synonym expansion for full-text analysis pipelines.
//!
//! ## Features
//!
//! - Compact FST dictionary mapping input phrases to output phrases
//! - Greedy longest-match streaming filter with bounded look-ahead
//! - Position increment, position length and offset bookkeeping
//! - Solr and WordNet rule-file parsers
//! - Serde-configurable filter factory and a command line tool

pub mod analysis;
pub mod cli;
pub mod error;
pub mod util;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
