//! Synonym dictionaries: compilation, storage and rule parsing.
//!
//! Rules map an input phrase to an output phrase. They are accumulated by a
//! [`SynonymMapBuilder`] (directly, or through one of the rule-file parsers)
//! and compiled into an immutable [`SynonymMap`], which the
//! [`SynonymFilter`](crate::analysis::token_filter::SynonymFilter) matches
//! against token streams.
//!
//! # Components
//!
//! - [`words`] - Deduplicated table of output phrases
//! - [`map`] - Rule builder and compiled map
//! - [`parser`] - Solr and WordNet rule-file parsers
//! - [`config`] - Serde-configurable filter factory
//!
//! # Multi-word phrases
//!
//! Words of a phrase are joined by [`WORD_SEPARATOR`] (`'\u{0}'`), a zero
//! byte in the FST key, so the walk can continue from one token into the
//! next:
//!
//! ```text
//! national\0hockey\0league  ->  nhl
//! ```
//!
//! # Examples
//!
//! ```
//! use synfilter::analysis::synonym::SynonymMapBuilder;
//!
//! let mut builder = SynonymMapBuilder::new(true);
//! builder.add_phrase(&["quick"], &["fast"], true).unwrap();
//! builder.add_phrase(&["big", "apple"], &["new", "york"], false).unwrap();
//!
//! let map = builder.build().unwrap();
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.synonyms("quick"), vec!["fast"]);
//! ```

pub mod config;
pub mod map;
pub mod parser;
pub mod words;

pub use config::SynonymFilterConfig;
pub use map::{SynonymEntry, SynonymMap, SynonymMapBuilder, WORD_SEPARATOR};
pub use parser::{RuleParser, SolrSynonymParser, SynonymParser, WordnetSynonymParser};
