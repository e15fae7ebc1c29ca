//! Parser for the WordNet prolog synonym database (`wn_s.pl`).
//!
//! Each line is a fact of the form
//!
//! ```text
//! s(100002137,1,'abstraction',n,6,0).
//! ```
//!
//! Consecutive lines sharing the 9-digit synset id form one synonym set.

use std::io::BufRead;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::synonym::map::SynonymMap;
use crate::analysis::synonym::parser::{RuleParser, SynonymParser, rule_error};
use crate::error::{Result, SynfilterError};

/// Parser for the WordNet prolog format.
pub struct WordnetSynonymParser {
    parser: SynonymParser,
    expand: bool,
}

impl WordnetSynonymParser {
    /// Create a parser.
    ///
    /// With `expand` every word of a set maps to every word of the set
    /// (itself included); otherwise every word maps to the first one.
    pub fn new(expand: bool, dedup: bool, analyzer: Arc<dyn Analyzer>) -> Self {
        WordnetSynonymParser {
            parser: SynonymParser::new(dedup, analyzer),
            expand,
        }
    }

    /// The shared builder and analyzer.
    pub fn parser(&self) -> &SynonymParser {
        &self.parser
    }

    fn parse_word(&self, line: &str) -> Result<String> {
        let (Some(first), Some(last)) = (line.find('\''), line.rfind('\'')) else {
            return Err(SynfilterError::invalid_argument(format!(
                "no quoted word in: {line}"
            )));
        };
        if first == last {
            return Err(SynfilterError::invalid_argument(format!(
                "unterminated word in: {line}"
            )));
        }
        let word = line[first + 1..last].replace("''", "'");
        self.parser.analyze(&word)
    }

    fn add_synset(&mut self, synset: &[String]) -> Result<()> {
        if synset.len() <= 1 {
            return Ok(());
        }
        if self.expand {
            for input in synset {
                for output in synset {
                    self.parser.add(input, output, false)?;
                }
            }
        } else {
            for input in synset {
                self.parser.add(input, &synset[0], false)?;
            }
        }
        Ok(())
    }
}

impl RuleParser for WordnetSynonymParser {
    fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let mut last_synset_id = String::new();
        let mut synset: Vec<String> = Vec::with_capacity(8);
        let mut synsets = 0;
        let mut line_number = 0;

        for line in reader.lines() {
            let line = line?;
            line_number += 1;
            if line.trim().is_empty() {
                continue;
            }

            let Some(synset_id) = line.get(2..11) else {
                return Err(rule_error(
                    line_number,
                    SynfilterError::invalid_argument(format!("no synset id in: {line}")),
                ));
            };
            if synset_id != last_synset_id {
                // A failing set is reported at the line that closed it.
                self.add_synset(&synset)
                    .map_err(|e| rule_error(line_number, e))?;
                if synset.len() > 1 {
                    synsets += 1;
                }
                synset.clear();
                last_synset_id = synset_id.to_string();
            }

            let word = self
                .parse_word(&line)
                .map_err(|e| rule_error(line_number, e))?;
            synset.push(word);
        }

        self.add_synset(&synset)
            .map_err(|e| rule_error(line_number, e))?;
        if synset.len() > 1 {
            synsets += 1;
        }

        log::debug!(
            "parsed {} wordnet synsets, {} distinct inputs",
            synsets,
            self.parser.builder().len()
        );
        Ok(())
    }

    fn into_map(self) -> Result<SynonymMap> {
        self.parser.build()
    }
}
