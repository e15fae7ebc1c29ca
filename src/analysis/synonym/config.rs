//! Serde-configurable factory for [`SynonymFilter`]s.
//!
//! # Examples
//!
//! ```
//! use synfilter::analysis::synonym::config::SynonymFilterConfig;
//!
//! let config = SynonymFilterConfig::from_json(r#"{"ignore_case": true}"#).unwrap();
//! let filter = config.create("Couch, Sofa").unwrap().expect("non-empty dictionary");
//! assert!(filter.ignore_case());
//!
//! // An empty dictionary needs no filter at all.
//! assert!(config.create("# nothing here").unwrap().is_none());
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::synonym::map::SynonymMap;
use crate::analysis::synonym::parser::{RuleParser, SolrSynonymParser, WordnetSynonymParser};
use crate::analysis::token_filter::SynonymFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::{KeywordTokenizer, Tokenizer, WhitespaceTokenizer};
use crate::error::Result;

/// Synonym rule file format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleFormat {
    /// `a, b => c` and `a, b, c` rules
    #[default]
    Solr,
    /// WordNet prolog `s(...)` facts
    Wordnet,
}

/// Tokenizer used to analyze rule phrases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// Split on whitespace
    #[default]
    Whitespace,
    /// Whole phrase as one token
    Keyword,
}

/// Settings for building a synonym filter from a rule file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynonymFilterConfig {
    /// Rule file format.
    pub format: RuleFormat,

    /// Expand equivalence rules to every pairing instead of mapping every
    /// phrase to the first one.
    pub expand: bool,

    /// Drop duplicate outputs of the same input.
    pub dedup: bool,

    /// Match case-insensitively. Rule phrases are lowercased as well.
    pub ignore_case: bool,

    /// Tokenizer for rule phrases.
    pub tokenizer: TokenizerKind,
}

impl Default for SynonymFilterConfig {
    fn default() -> Self {
        SynonymFilterConfig {
            format: RuleFormat::Solr,
            expand: true,
            dedup: true,
            ignore_case: false,
            tokenizer: TokenizerKind::Whitespace,
        }
    }
}

impl SynonymFilterConfig {
    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// The analyzer applied to rule phrases.
    pub fn analyzer(&self) -> Arc<dyn Analyzer> {
        let tokenizer: Arc<dyn Tokenizer> = match self.tokenizer {
            TokenizerKind::Whitespace => Arc::new(WhitespaceTokenizer::new()),
            TokenizerKind::Keyword => Arc::new(KeywordTokenizer::new()),
        };
        let mut analyzer = PipelineAnalyzer::new(tokenizer).with_name("synonym_rules");
        if self.ignore_case {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
        }
        Arc::new(analyzer)
    }

    /// Parse rules from `reader` and compile them.
    pub fn build_map_from_reader<R: BufRead>(&self, reader: R) -> Result<SynonymMap> {
        let analyzer = self.analyzer();
        match self.format {
            RuleFormat::Solr => {
                let mut parser = SolrSynonymParser::new(self.expand, self.dedup, analyzer);
                parser.parse_reader(reader)?;
                parser.into_map()
            }
            RuleFormat::Wordnet => {
                let mut parser = WordnetSynonymParser::new(self.expand, self.dedup, analyzer);
                parser.parse_reader(reader)?;
                parser.into_map()
            }
        }
    }

    /// Parse rules held in a string and compile them.
    pub fn build_map(&self, rules: &str) -> Result<SynonymMap> {
        self.build_map_from_reader(rules.as_bytes())
    }

    /// Build a filter from rules held in a string.
    ///
    /// Returns `None` when the rules compile to an empty dictionary, in which
    /// case the token stream should be passed through untouched.
    pub fn create(&self, rules: &str) -> Result<Option<SynonymFilter>> {
        self.filter_for(self.build_map(rules)?)
    }

    /// Build a filter from a rule file.
    pub fn create_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Option<SynonymFilter>> {
        let path = path.as_ref();
        log::debug!("loading {:?} synonym rules from {}", self.format, path.display());
        let reader = BufReader::new(File::open(path)?);
        self.filter_for(self.build_map_from_reader(reader)?)
    }

    fn filter_for(&self, map: SynonymMap) -> Result<Option<SynonymFilter>> {
        if map.fst().is_none() {
            log::warn!("synonym dictionary is empty; synonym filter disabled");
            return Ok(None);
        }
        SynonymFilter::new(map, self.ignore_case).map(Some)
    }
}
