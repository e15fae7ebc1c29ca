//! Compiled synonym map and its builder.
//!
//! Rules are accumulated by [`SynonymMapBuilder`] and compiled into an
//! immutable [`SynonymMap`]: an [`fst::Map`] keyed by the UTF-8 bytes of each
//! input phrase, a packed buffer of encoded [`SynonymEntry`] records, a table
//! of output phrases, and the longest phrase length (in words) on either side
//! of any rule.
//!
//! The FST value of a phrase is the byte offset of its record in the packed
//! buffer.
//!
//! Phrases are strings whose words are joined by [`WORD_SEPARATOR`].
//!
//! # Examples
//!
//! ```
//! use synfilter::analysis::synonym::map::SynonymMapBuilder;
//!
//! let mut builder = SynonymMapBuilder::new(true);
//! let input = SynonymMapBuilder::join(&["national", "hockey", "league"]).unwrap();
//! builder.add(&input, "nhl", true).unwrap();
//!
//! let map = builder.build().unwrap();
//! assert_eq!(map.max_horizontal_context(), 3);
//! assert_eq!(map.synonyms(&input), vec!["nhl"]);
//! ```

use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::sync::Arc;

use ahash::AHashSet;
use fst::{Map, MapBuilder};

use crate::analysis::synonym::words::{WordTable, WordTableBuilder};
use crate::error::{Result, SynfilterError};
use crate::util::varint;

/// Separator placed between the words of a phrase.
pub const WORD_SEPARATOR: char = '\u{0}';

/// Decoded FST output for one input phrase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SynonymEntry {
    /// Whether the matched input tokens are kept in the output
    pub keep_original: bool,
    /// Ordinals of the output phrases, in the order they were added
    pub ords: Vec<u32>,
}

impl SynonymEntry {
    /// Append the encoded record: a vint header `(count << 1) | keep_original`
    /// followed by one vint per ordinal.
    pub fn encode(&self, buf: &mut Vec<u8>) {
        let header = ((self.ords.len() as u32) << 1) | self.keep_original as u32;
        varint::push_u32(buf, header);
        for &ord in &self.ords {
            varint::push_u32(buf, ord);
        }
    }

    /// Read one record from the front of `reader`.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let header = varint::read_u32(reader)?;
        let count = (header >> 1) as usize;
        let mut ords = Vec::with_capacity(count);
        for _ in 0..count {
            ords.push(varint::read_u32(reader)?);
        }
        Ok(SynonymEntry {
            keep_original: header & 1 == 1,
            ords,
        })
    }

    /// Decode exactly one record produced by [`encode`](Self::encode).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = Cursor::new(bytes);
        let entry = Self::read(&mut reader)?;
        if reader.position() as usize != bytes.len() {
            return Err(SynfilterError::other(format!(
                "synonym entry has {} trailing bytes",
                bytes.len() - reader.position() as usize
            )));
        }
        Ok(entry)
    }
}

/// An immutable, compiled synonym dictionary.
///
/// Cloning is cheap and clones share the compiled data, so one map can back
/// any number of filters and token streams across threads.
#[derive(Clone, Debug)]
pub struct SynonymMap {
    /// FST map: input phrase -> offset into `records`
    fst: Option<Arc<Map<Arc<[u8]>>>>,
    /// Encoded entries, back to back
    records: Arc<[u8]>,
    words: Arc<WordTable>,
    max_horizontal_context: usize,
}

impl SynonymMap {
    /// The compiled FST, or `None` if the map holds no rules.
    pub fn fst(&self) -> Option<&Arc<Map<Arc<[u8]>>>> {
        self.fst.as_ref()
    }

    /// The packed entry records the FST values point into.
    pub fn records(&self) -> &[u8] {
        &self.records
    }

    /// Decode the entry stored at `offset`, an FST value of this map.
    ///
    /// # Panics
    ///
    /// Panics if no well-formed record starts at `offset`. Records are
    /// written by the builder together with the FST, so this only happens
    /// when the map itself is corrupt.
    pub fn entry_at(&self, offset: u64) -> SynonymEntry {
        let Some(bytes) = self.records.get(offset as usize..) else {
            panic!("synonym entry offset {offset} is out of range");
        };
        match SynonymEntry::read(&mut Cursor::new(bytes)) {
            Ok(entry) => entry,
            Err(e) => panic!("corrupt synonym entry at offset {offset}: {e}"),
        }
    }

    /// The output phrase table.
    pub fn words(&self) -> &WordTable {
        &self.words
    }

    /// The output phrase stored under `ord`.
    pub fn word(&self, ord: u32) -> Option<&str> {
        self.words.get(ord)
    }

    /// Longest phrase, in words, on either side of any rule.
    pub fn max_horizontal_context(&self) -> usize {
        self.max_horizontal_context
    }

    /// Number of distinct input phrases.
    pub fn len(&self) -> usize {
        self.fst.as_ref().map_or(0, |fst| fst.len())
    }

    /// Whether the map holds no rules.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up the compiled entry for a separator-joined input phrase.
    ///
    /// # Panics
    ///
    /// Panics on a corrupt record, like [`entry_at`](Self::entry_at).
    pub fn lookup(&self, phrase: &str) -> Option<SynonymEntry> {
        let offset = self.fst.as_ref()?.get(phrase.as_bytes())?;
        Some(self.entry_at(offset))
    }

    /// Output phrases mapped from a separator-joined input phrase.
    pub fn synonyms(&self, phrase: &str) -> Vec<&str> {
        self.lookup(phrase)
            .map(|entry| entry.ords.iter().filter_map(|&ord| self.word(ord)).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default)]
struct MapEntry {
    include_original: bool,
    ords: Vec<u32>,
}

/// Accumulates synonym rules and compiles them into a [`SynonymMap`].
///
/// Rules sharing an input phrase accumulate their outputs. When `dedup` is
/// set, an output added several times for the same input is kept once.
#[derive(Debug)]
pub struct SynonymMapBuilder {
    entries: BTreeMap<String, MapEntry>,
    words: WordTableBuilder,
    max_horizontal_context: usize,
    dedup: bool,
}

impl SynonymMapBuilder {
    /// Create a builder.
    pub fn new(dedup: bool) -> Self {
        SynonymMapBuilder {
            entries: BTreeMap::new(),
            words: WordTableBuilder::new(),
            max_horizontal_context: 0,
            dedup,
        }
    }

    /// Join words into a phrase. Words must be non-empty.
    pub fn join<S: AsRef<str>>(words: &[S]) -> Result<String> {
        let mut phrase = String::new();
        for (i, word) in words.iter().enumerate() {
            let word = word.as_ref();
            if word.is_empty() {
                return Err(SynfilterError::invalid_argument(format!(
                    "word {i} of the phrase is empty"
                )));
            }
            if i > 0 {
                phrase.push(WORD_SEPARATOR);
            }
            phrase.push_str(word);
        }
        Ok(phrase)
    }

    /// Add a rule mapping `input` to `output`.
    ///
    /// Both phrases must be non-empty and free of holes (leading, trailing or
    /// doubled separators). A rejected rule leaves the builder unchanged.
    pub fn add(&mut self, input: &str, output: &str, include_original: bool) -> Result<()> {
        let input_words = count_words(input, "input")?;
        let output_words = count_words(output, "output")?;

        let ord = self.words.add(output);
        let entry = self.entries.entry(input.to_string()).or_default();
        entry.ords.push(ord);
        entry.include_original |= include_original;

        self.max_horizontal_context = self
            .max_horizontal_context
            .max(input_words)
            .max(output_words);
        Ok(())
    }

    /// Add a rule given as word slices.
    pub fn add_phrase<S: AsRef<str>>(
        &mut self,
        input: &[S],
        output: &[S],
        include_original: bool,
    ) -> Result<()> {
        let input = Self::join(input)?;
        let output = Self::join(output)?;
        self.add(&input, &output, include_original)
    }

    /// Number of distinct input phrases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no rule has been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest phrase seen so far.
    pub fn max_horizontal_context(&self) -> usize {
        self.max_horizontal_context
    }

    /// Compile the accumulated rules.
    pub fn build(self) -> Result<SynonymMap> {
        let mut fst_builder = MapBuilder::memory();
        let mut records = Vec::new();
        let mut seen = AHashSet::new();

        // BTreeMap iterates in byte order, the order the FST builder needs.
        for (input, entry) in &self.entries {
            let ords = if self.dedup {
                seen.clear();
                entry
                    .ords
                    .iter()
                    .copied()
                    .filter(|ord| seen.insert(*ord))
                    .collect()
            } else {
                entry.ords.clone()
            };

            let offset = records.len() as u64;
            SynonymEntry {
                keep_original: entry.include_original,
                ords,
            }
            .encode(&mut records);
            fst_builder.insert(input.as_bytes(), offset)?;
        }

        let fst_bytes = fst_builder.into_inner()?;
        let fst = if self.entries.is_empty() {
            None
        } else {
            Some(Arc::new(Map::new(Arc::from(fst_bytes))?))
        };
        log::debug!(
            "built synonym map: inputs={} outputs={} record_bytes={} max_horizontal_context={} dedup={}",
            self.entries.len(),
            self.words.len(),
            records.len(),
            self.max_horizontal_context,
            self.dedup
        );

        Ok(SynonymMap {
            fst,
            records: Arc::from(records),
            words: Arc::new(self.words.freeze()),
            max_horizontal_context: self.max_horizontal_context,
        })
    }
}

fn count_words(phrase: &str, what: &str) -> Result<usize> {
    if phrase.is_empty() {
        return Err(SynfilterError::invalid_argument(format!(
            "{what} cannot be empty"
        )));
    }
    let mut count = 0;
    for word in phrase.split(WORD_SEPARATOR) {
        if word.is_empty() {
            return Err(SynfilterError::invalid_argument(format!(
                "{what} has holes: {phrase:?}"
            )));
        }
        count += 1;
    }
    Ok(count)
}
