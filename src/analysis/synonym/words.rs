//! Deduplicating table of synonym outputs.
//!
//! Every distinct output phrase (words joined by the word separator) is
//! stored once and referred to by a dense `u32` ordinal from the compiled
//! FST entries.

use ahash::AHashMap;

/// Frozen, read-only output table embedded in a compiled synonym map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordTable {
    words: Vec<Box<str>>,
}

impl WordTable {
    /// The output phrase stored under `ord`.
    pub fn get(&self, ord: u32) -> Option<&str> {
        self.words.get(ord as usize).map(|w| &**w)
    }

    /// Number of distinct outputs.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over (ordinal, phrase) pairs in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.words.iter().enumerate().map(|(i, w)| (i as u32, &**w))
    }
}

/// Mutable table used while rules are accumulated.
#[derive(Debug, Default)]
pub struct WordTableBuilder {
    words: Vec<Box<str>>,
    ords: AHashMap<Box<str>, u32>,
}

impl WordTableBuilder {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the ordinal of `word`, inserting it if it is new.
    pub fn add(&mut self, word: &str) -> u32 {
        if let Some(&ord) = self.ords.get(word) {
            return ord;
        }
        let ord = self.words.len() as u32;
        self.words.push(word.into());
        self.ords.insert(word.into(), ord);
        ord
    }

    /// Number of distinct words seen so far.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no word has been added.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Freeze into a read-only table.
    pub fn freeze(self) -> WordTable {
        WordTable { words: self.words }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_are_stable_and_deduplicated() {
        let mut builder = WordTableBuilder::new();
        assert_eq!(builder.add("dog"), 0);
        assert_eq!(builder.add("dog\u{0}collar"), 1);
        assert_eq!(builder.add("dog"), 0);
        assert_eq!(builder.len(), 2);

        let table = builder.freeze();
        assert_eq!(table.get(0), Some("dog"));
        assert_eq!(table.get(1), Some("dog\u{0}collar"));
        assert_eq!(table.get(2), None);
        assert_eq!(table.iter().count(), 2);
    }
}
