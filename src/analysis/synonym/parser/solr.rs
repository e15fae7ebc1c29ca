//! Parser for Solr-style synonym files.
//!
//! ```text
//! # blank lines and lines starting with '#' are ignored
//!
//! # explicit mappings: every input maps to every output
//! i-pod, i pod => ipod
//!
//! # equivalent synonyms: with expand every phrase maps to every other
//! # phrase, otherwise every phrase maps to the first one
//! couch, sofa, divan
//! ```
//!
//! Commas and `=>` can be escaped with a backslash.

use std::io::BufRead;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::synonym::map::SynonymMap;
use crate::analysis::synonym::parser::{RuleParser, SynonymParser, rule_error};
use crate::error::{Result, SynfilterError};

/// Parser for the Solr synonym format.
pub struct SolrSynonymParser {
    parser: SynonymParser,
    expand: bool,
}

impl SolrSynonymParser {
    /// Create a parser.
    ///
    /// `expand` controls how equivalence lines are compiled and `dedup` is
    /// passed on to the map builder.
    pub fn new(expand: bool, dedup: bool, analyzer: Arc<dyn Analyzer>) -> Self {
        SolrSynonymParser {
            parser: SynonymParser::new(dedup, analyzer),
            expand,
        }
    }

    /// The shared builder and analyzer.
    pub fn parser(&self) -> &SynonymParser {
        &self.parser
    }

    fn add_line(&mut self, line: &str) -> Result<()> {
        let sides = split(line, "=>");
        if sides.len() > 1 {
            if sides.len() != 2 {
                return Err(SynfilterError::invalid_argument(
                    "more than one explicit mapping specified on the same line",
                ));
            }
            let inputs = self.analyze_list(&sides[0])?;
            let outputs = self.analyze_list(&sides[1])?;
            for input in &inputs {
                for output in &outputs {
                    self.parser.add(input, output, false)?;
                }
            }
        } else {
            let phrases = self.analyze_list(line)?;
            if self.expand {
                for (i, input) in phrases.iter().enumerate() {
                    for (j, output) in phrases.iter().enumerate() {
                        if i != j {
                            self.parser.add(input, output, true)?;
                        }
                    }
                }
            } else if let Some(first) = phrases.first() {
                for input in &phrases {
                    self.parser.add(input, first, false)?;
                }
            }
        }
        Ok(())
    }

    fn analyze_list(&self, list: &str) -> Result<Vec<String>> {
        split(list, ",")
            .iter()
            .map(|part| self.parser.analyze(unescape(part).trim()))
            .collect()
    }
}

impl RuleParser for SolrSynonymParser {
    fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let mut rules = 0;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            self.add_line(&line).map_err(|e| rule_error(idx + 1, e))?;
            rules += 1;
        }
        log::debug!(
            "parsed {} solr synonym rules, {} distinct inputs",
            rules,
            self.parser.builder().len()
        );
        Ok(())
    }

    fn into_map(self) -> Result<SynonymMap> {
        self.parser.build()
    }
}

/// Split on `separator`, honouring backslash escapes. Escapes are kept in
/// the parts and empty parts are dropped.
fn split(s: &str, separator: &str) -> Vec<String> {
    let mut parts = Vec::with_capacity(2);
    let mut part = String::new();
    let mut rest = s;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(separator) {
            if !part.is_empty() {
                parts.push(std::mem::take(&mut part));
            }
            rest = after;
            continue;
        }
        let mut chars = rest.chars();
        let Some(ch) = chars.next() else {
            break;
        };
        part.push(ch);
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                part.push(escaped);
            }
        }
        rest = chars.as_str();
    }
    if !part.is_empty() {
        parts.push(part);
    }
    parts
}

/// Remove backslash escapes. A trailing lone backslash is kept.
fn unescape(s: &str) -> String {
    if !s.contains('\\') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
                continue;
            }
        }
        out.push(ch);
    }
    out
}
