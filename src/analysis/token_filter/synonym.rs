//! Synonym filter backed by a compiled [`SynonymMap`].
//!
//! The filter matches single and multi-word synonyms against the incoming
//! token stream and splices the replacements in. Matching is greedy: at each
//! input position the longest matching phrase wins, and once a phrase has
//! matched, none of its tokens take part in another match. Generated tokens
//! are never matched again.
//!
//! The output is not a true token graph. Tokens are "stacked" at shared
//! positions: the first token at a position has a position increment of 1,
//! every other token at that position has 0. Multi-word synonyms therefore
//! overlap the following input tokens:
//!
//! ```text
//! Rule:   a -> x y (keep original)
//! Input:  a b
//! Output: a/x b/y
//! ```
//!
//! # Buffering
//!
//! Look-ahead tokens are captured into a fixed ring of
//! `max_horizontal_context + 1` slots, alongside a parallel ring of pending
//! outputs. Memory use is bounded by the dictionary, never by the input.
//!
//! # Examples
//!
//! ```
//! use synfilter::analysis::synonym::map::SynonymMapBuilder;
//! use synfilter::analysis::token::Token;
//! use synfilter::analysis::token_filter::{Filter, SynonymFilter};
//!
//! let mut builder = SynonymMapBuilder::new(true);
//! builder.add_phrase(&["a", "b"], &["foo"], true).unwrap();
//! let filter = SynonymFilter::new(builder.build().unwrap(), false).unwrap();
//!
//! let tokens = vec![
//!     Token::with_offsets("a", 0, 0, 1),
//!     Token::with_offsets("b", 1, 2, 3),
//!     Token::with_offsets("c", 2, 4, 5),
//! ];
//! let out: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//! let texts: Vec<_> = out.iter().map(|t| t.text.as_str()).collect();
//!
//! assert_eq!(texts, vec!["a", "foo", "b", "c"]);
//! assert_eq!(out[1].position_increment, 0);
//! assert_eq!(out[1].position_length, 2);
//! ```

use std::sync::Arc;

use fst::Map;
use fst::raw::{Fst, Node, Output};

use crate::analysis::synonym::map::{SynonymMap, WORD_SEPARATOR};
use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::lowercase::lowercase_char;
use crate::error::{Result, SynfilterError};

type SynonymFst = Map<Arc<[u8]>>;

/// Token filter that expands synonyms from a compiled [`SynonymMap`].
///
/// The filter itself is immutable and shareable; every call to
/// [`filter`](Filter::filter) creates an independent [`SynonymTokenStream`].
#[derive(Clone, Debug)]
pub struct SynonymFilter {
    map: SynonymMap,
    fst: Arc<SynonymFst>,
    ignore_case: bool,
}

impl SynonymFilter {
    /// Create a filter over `map`.
    ///
    /// When `ignore_case` is set, input characters are lowercased before they
    /// are looked up, so the dictionary must hold lowercased phrases. Fails
    /// when the map holds no rules.
    pub fn new(map: SynonymMap, ignore_case: bool) -> Result<Self> {
        let fst = match map.fst() {
            Some(fst) => Arc::clone(fst),
            None => return Err(SynfilterError::invalid_argument("fst must be non-null")),
        };
        Ok(SynonymFilter {
            map,
            fst,
            ignore_case,
        })
    }

    /// The dictionary this filter matches against.
    pub fn map(&self) -> &SynonymMap {
        &self.map
    }

    /// Whether matching is case-insensitive.
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Wrap `tokens` in a concrete synonym stream.
    pub fn wrap(&self, tokens: TokenStream) -> SynonymTokenStream {
        SynonymTokenStream::new(self, tokens)
    }
}

impl Filter for SynonymFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(self.wrap(tokens)))
    }

    fn name(&self) -> &'static str {
        "synonym"
    }
}

/// One look-ahead slot of the input ring.
#[derive(Debug)]
struct PendingInput {
    /// Snapshot of the captured token; `None` for a token that was never
    /// captured or has been emitted.
    state: Option<Token>,
    keep_original: bool,
    matched: bool,
    consumed: bool,
    start_offset: usize,
    end_offset: usize,
}

impl PendingInput {
    fn new() -> Self {
        PendingInput {
            state: None,
            keep_original: false,
            matched: false,
            consumed: true,
            start_offset: 0,
            end_offset: 0,
        }
    }

    fn reset(&mut self) {
        self.state = None;
        self.consumed = true;
        self.keep_original = false;
        self.matched = false;
    }
}

#[derive(Debug)]
struct PendingOutput {
    text: String,
    /// `None` inherits the end offset of the input token at the same slot.
    end_offset: Option<usize>,
    position_length: usize,
}

/// Outputs waiting to be emitted at one slot.
#[derive(Debug)]
struct PendingOutputs {
    outputs: Vec<PendingOutput>,
    upto: usize,
    position_increment: usize,
}

impl PendingOutputs {
    fn new() -> Self {
        PendingOutputs {
            outputs: Vec::new(),
            upto: 0,
            position_increment: 1,
        }
    }

    fn reset(&mut self) {
        self.outputs.clear();
        self.upto = 0;
        self.position_increment = 1;
    }

    fn has_pending(&self) -> bool {
        self.upto < self.outputs.len()
    }

    fn add(&mut self, text: &str, end_offset: Option<usize>, position_length: usize) {
        self.outputs.push(PendingOutput {
            text: text.to_string(),
            end_offset,
            position_length,
        });
    }

    fn pull_next(&mut self) -> PendingOutput {
        debug_assert!(self.has_pending());
        let slot = &mut self.outputs[self.upto];
        let output = PendingOutput {
            text: std::mem::take(&mut slot.text),
            end_offset: slot.end_offset,
            position_length: slot.position_length,
        };
        self.upto += 1;
        self.position_increment = 0;
        if self.upto == self.outputs.len() {
            self.reset();
        }
        output
    }
}

/// Lazily evaluated token stream produced by a [`SynonymFilter`].
pub struct SynonymTokenStream {
    input: TokenStream,
    map: SynonymMap,
    fst: Arc<SynonymFst>,
    ignore_case: bool,

    roll_buffer_size: usize,
    future_inputs: Vec<PendingInput>,
    future_outputs: Vec<PendingOutputs>,

    next_read: usize,
    next_write: usize,
    input_skip_count: usize,
    finished: bool,

    /// Token pulled from upstream that did not need to be captured.
    current: Option<Token>,
    last_start_offset: usize,
    last_end_offset: usize,
    last_position: Option<usize>,
    capture_count: usize,
}

impl SynonymTokenStream {
    fn new(filter: &SynonymFilter, input: TokenStream) -> Self {
        let roll_buffer_size = filter.map.max_horizontal_context() + 1;
        SynonymTokenStream {
            input,
            map: filter.map.clone(),
            fst: Arc::clone(&filter.fst),
            ignore_case: filter.ignore_case,
            roll_buffer_size,
            future_inputs: (0..roll_buffer_size).map(|_| PendingInput::new()).collect(),
            future_outputs: (0..roll_buffer_size)
                .map(|_| PendingOutputs::new())
                .collect(),
            next_read: 0,
            next_write: 0,
            input_skip_count: 0,
            finished: false,
            current: None,
            last_start_offset: 0,
            last_end_offset: 0,
            last_position: None,
            capture_count: 0,
        }
    }

    /// Restart on a new upstream stream, reusing the ring buffers.
    pub fn reset(&mut self, input: TokenStream) {
        self.input = input;
        self.capture_count = 0;
        self.finished = false;
        self.input_skip_count = 0;
        self.next_read = 0;
        self.next_write = 0;
        self.current = None;
        self.last_start_offset = 0;
        self.last_end_offset = 0;
        self.last_position = None;
        for input in &mut self.future_inputs {
            input.reset();
        }
        for outputs in &mut self.future_outputs {
            outputs.reset();
        }
    }

    /// Number of tokens snapshotted for look-ahead since the last reset.
    pub fn capture_count(&self) -> usize {
        self.capture_count
    }

    /// Fixed number of slots in each ring buffer.
    pub fn buffer_len(&self) -> usize {
        self.roll_buffer_size
    }

    /// Number of input slots currently holding look-ahead.
    pub fn buffered(&self) -> usize {
        (self.next_write + self.roll_buffer_size - self.next_read) % self.roll_buffer_size
    }

    fn roll(&self, slot: usize) -> usize {
        roll(slot, self.roll_buffer_size)
    }

    fn capture(&mut self, token: Token) {
        self.capture_count += 1;
        let slot = &mut self.future_inputs[self.next_write];
        slot.state = Some(token);
        slot.consumed = false;

        self.next_write = self.roll(self.next_write);
        assert_ne!(
            self.next_write, self.next_read,
            "look-ahead overran the synonym ring buffer"
        );
    }

    /// Find the longest match starting at `next_read`, pulling and capturing
    /// upstream tokens as far as the dictionary allows, and queue its outputs.
    ///
    /// A freshly pulled token that needs no look-ahead is left in `current`
    /// instead of being captured.
    fn parse(&mut self) {
        debug_assert_eq!(self.input_skip_count, 0);

        let map = Arc::clone(&self.fst);
        let fst = map.as_fst();
        let mut cur_next_read = self.next_read;

        let mut match_output: Option<u64> = None;
        let mut match_input_length = 0;
        let mut match_end_offset = 0;

        let mut pending_output = Output::zero();
        let mut node = fst.root();
        let mut token_count = 0;

        loop {
            let input_end_offset;
            let walked = if cur_next_read == self.next_write {
                if self.finished {
                    break;
                }
                debug_assert!(self.future_inputs[self.next_write].consumed);
                let Some(token) = self.input.next() else {
                    self.finished = true;
                    break;
                };

                let slot = &mut self.future_inputs[self.next_write];
                slot.start_offset = token.start_offset;
                slot.end_offset = token.end_offset;
                self.last_start_offset = token.start_offset;
                self.last_end_offset = token.end_offset;
                input_end_offset = token.end_offset;

                let walked = walk(fst, node, &token.text, self.ignore_case, &mut pending_output);
                if self.next_read != self.next_write {
                    self.capture(token);
                } else {
                    self.future_inputs[self.next_write].consumed = false;
                    self.current = Some(token);
                }
                walked
            } else {
                let slot = &self.future_inputs[cur_next_read];
                input_end_offset = slot.end_offset;
                let text = match &slot.state {
                    Some(token) => token.text.as_str(),
                    None => unreachable!("buffered input at slot {cur_next_read} was not captured"),
                };
                walk(fst, node, text, self.ignore_case, &mut pending_output)
            };

            token_count += 1;

            let Some(next) = walked else {
                break;
            };
            node = next;

            if node.is_final() {
                match_output = Some(pending_output.cat(node.final_output()).value());
                match_input_length = token_count;
                match_end_offset = input_end_offset;
            }

            let Some(next) = step(fst, &node, WORD_SEPARATOR as u8, &mut pending_output) else {
                break;
            };
            node = next;
            if self.next_read == self.next_write {
                match self.current.take() {
                    Some(token) => self.capture(token),
                    None => unreachable!("no pending token to capture at slot {}", self.next_write),
                }
            }

            cur_next_read = self.roll(cur_next_read);
        }

        if self.next_read == self.next_write && !self.finished {
            // The freshly pulled token was not captured; claim its slot.
            self.next_write = self.roll(self.next_write);
        }

        if let Some(offset) = match_output {
            self.input_skip_count = match_input_length;
            self.add_output(offset, match_input_length, match_end_offset);
        } else if self.next_read != self.next_write {
            self.input_skip_count = 1;
        } else {
            debug_assert!(self.finished);
        }
    }

    /// Fan the outputs of the entry at `offset` out over successive slots,
    /// starting at `next_read`, and mark the matched input slots.
    fn add_output(&mut self, offset: u64, match_input_length: usize, match_end_offset: usize) {
        let entry = self.map.entry_at(offset);
        log::trace!(
            "synonym match at slot {}: {} input tokens, {} outputs, keep_original={}",
            self.next_read,
            match_input_length,
            entry.ords.len(),
            entry.keep_original
        );

        for &ord in &entry.ords {
            let Some(phrase) = self.map.word(ord) else {
                panic!("synonym output ordinal {ord} is out of range");
            };
            let single_word = !phrase.contains(WORD_SEPARATOR);

            let mut output_upto = self.next_read;
            for word in phrase.split(WORD_SEPARATOR) {
                debug_assert!(!word.is_empty(), "output contains an empty word: {phrase:?}");
                let (end_offset, position_length) = if single_word {
                    let length = if entry.keep_original {
                        match_input_length
                    } else {
                        1
                    };
                    (Some(match_end_offset), length)
                } else {
                    (None, 1)
                };
                self.future_outputs[output_upto].add(word, end_offset, position_length);
                output_upto = roll(output_upto, self.roll_buffer_size);
                debug_assert_eq!(self.future_outputs[output_upto].position_increment, 1);
            }
        }

        let mut upto = self.next_read;
        for _ in 0..match_input_length {
            let input = &mut self.future_inputs[upto];
            input.keep_original |= entry.keep_original;
            input.matched = true;
            upto = self.roll(upto);
        }
    }

    fn advance_read(&mut self) {
        self.next_read = self.roll(self.next_read);
        self.input_skip_count -= 1;
    }

    /// Stamp the absolute position onto an outgoing token.
    fn emit(&mut self, mut token: Token) -> Token {
        let position = match self.last_position {
            Some(last) => last + token.position_increment,
            None => token.position_increment.saturating_sub(1),
        };
        token.position = position;
        self.last_position = Some(position);
        token
    }
}

impl Iterator for SynonymTokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            // Replay buffered inputs and outputs first.
            while self.input_skip_count != 0 {
                let read = self.next_read;
                let input = &mut self.future_inputs[read];
                let outputs = &mut self.future_outputs[read];

                if !input.consumed && (input.keep_original || !input.matched) {
                    let token = match input.state.take() {
                        Some(token) => token,
                        None => {
                            debug_assert_eq!(self.input_skip_count, 1);
                            match self.current.take() {
                                Some(token) => token,
                                None => unreachable!("no token to replay at slot {read}"),
                            }
                        }
                    };
                    input.reset();
                    if outputs.has_pending() {
                        outputs.position_increment = 0;
                    } else {
                        self.advance_read();
                    }
                    return Some(self.emit(token));
                } else if outputs.has_pending() {
                    input.reset();
                    self.current = None;

                    let position_increment = outputs.position_increment;
                    let output = outputs.pull_next();
                    let token = Token {
                        text: output.text,
                        position: 0,
                        start_offset: input.start_offset,
                        end_offset: output.end_offset.unwrap_or(input.end_offset),
                        position_increment,
                        position_length: output.position_length,
                        token_type: TokenType::Synonym,
                    };
                    if !outputs.has_pending() {
                        self.advance_read();
                    }
                    return Some(self.emit(token));
                } else {
                    input.reset();
                    self.current = None;
                    self.advance_read();
                }
            }

            // Upstream is exhausted: flush outputs that hang off the end.
            if self.finished && self.next_read == self.next_write {
                let read = self.next_read;
                let outputs = &mut self.future_outputs[read];
                if !outputs.has_pending() {
                    return None;
                }

                let position_increment = outputs.position_increment;
                let output = outputs.pull_next();
                let exhausted = !outputs.has_pending();
                self.future_inputs[read].reset();
                if exhausted {
                    let next = self.roll(read);
                    self.next_read = next;
                    self.next_write = next;
                }

                let token = Token {
                    text: output.text,
                    position: 0,
                    start_offset: self.last_start_offset,
                    end_offset: self.last_end_offset,
                    position_increment,
                    position_length: 1,
                    token_type: TokenType::Synonym,
                };
                return Some(self.emit(token));
            }

            self.parse();
        }
    }
}

fn roll(slot: usize, size: usize) -> usize {
    let next = slot + 1;
    if next == size { 0 } else { next }
}

/// Walk the UTF-8 bytes of `text` from `node`, accumulating transition
/// outputs. Characters are folded before they are encoded. Returns `None` at
/// the first missing transition.
fn walk<'f>(
    fst: &'f Fst<Arc<[u8]>>,
    mut node: Node<'f>,
    text: &str,
    ignore_case: bool,
    pending_output: &mut Output,
) -> Option<Node<'f>> {
    let mut buf = [0u8; 4];
    for c in text.chars() {
        let c = if ignore_case { lowercase_char(c) } else { c };
        for &byte in c.encode_utf8(&mut buf).as_bytes() {
            node = step(fst, &node, byte, pending_output)?;
        }
    }
    Some(node)
}

/// Follow the transition for `byte` out of `node`.
fn step<'f>(
    fst: &'f Fst<Arc<[u8]>>,
    node: &Node<'f>,
    byte: u8,
    pending_output: &mut Output,
) -> Option<Node<'f>> {
    let transition = node.transition(node.find_input(byte)?);
    *pending_output = pending_output.cat(transition.out);
    Some(fst.node(transition.addr))
}
