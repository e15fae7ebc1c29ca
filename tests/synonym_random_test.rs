//! Randomized checks of the synonym filter against a brute-force matcher.

use std::collections::HashMap;

use rand::prelude::*;
use rand::rngs::StdRng;

use synfilter::analysis::synonym::map::SynonymMapBuilder;
use synfilter::analysis::token::Token;
use synfilter::analysis::token_filter::SynonymFilter;
use synfilter::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};

const MAX_OUTPUT_LENGTH: usize = 5;

/// All outputs of one input phrase. Phrases are single characters separated
/// by spaces, so word `i` of the document sits at byte `2 * i`.
struct OneSyn {
    input: String,
    outputs: Vec<String>,
    keep_original: bool,
}

/// `len` characters drawn from `alphabet` letters starting at `start`, each
/// followed by a space.
fn random_phrase(rng: &mut StdRng, start: u8, alphabet: u8, len: usize) -> String {
    let mut s = String::with_capacity(len * 2);
    for _ in 0..len {
        s.push((start + rng.random_range(0..alphabet)) as char);
        s.push(' ');
    }
    s
}

fn words(phrase: &str) -> Vec<&str> {
    phrase.split(' ').filter(|w| !w.is_empty()).collect()
}

/// Number of words in a trimmed phrase.
fn word_count(phrase: &str) -> usize {
    (phrase.len() + 1) / 2
}

/// Keep only the first occurrence of every output.
fn prune_dups(syns: &mut [OneSyn]) {
    for syn in syns {
        let mut seen = Vec::new();
        syn.outputs.retain(|output| {
            if seen.contains(output) {
                false
            } else {
                seen.push(output.clone());
                true
            }
        });
    }
}

/// Compute the expected filter output for `doc` by brute force, in the
/// notation understood by [`verify`].
fn slow_matcher(doc: &str, syns: &[OneSyn]) -> String {
    assert_eq!(doc.len() % 2, 0);
    let num_inputs = doc.len() / 2;
    let mut keep_origs = vec![false; num_inputs];
    let mut has_match = vec![false; num_inputs];
    let mut outputs: Vec<Option<String>> = vec![None; num_inputs + MAX_OUTPUT_LENGTH];
    let mut matches: Vec<Option<&OneSyn>> = vec![None; num_inputs];

    for syn in syns {
        let mut from = 0;
        while let Some(found) = doc[from..].find(&syn.input) {
            let idx = from + found;
            from = idx + 1;
            assert_eq!(idx % 2, 0);
            let match_idx = idx / 2;
            match matches[match_idx] {
                Some(current) if current.input.len() >= syn.input.len() => {
                    assert!(syn.input.len() < current.input.len());
                }
                // Longer match wins.
                _ => matches[match_idx] = Some(syn),
            }
        }
    }

    // A match hides every match starting inside its range.
    for input_idx in 0..num_inputs {
        if let Some(syn) = matches[input_idx] {
            let end = (input_idx + word_count(&syn.input)).min(num_inputs);
            for hidden in matches.iter_mut().take(end).skip(input_idx + 1) {
                *hidden = None;
            }
        }
    }

    for input_idx in 0..num_inputs {
        let Some(syn) = matches[input_idx] else {
            continue;
        };
        let input_len = word_count(&syn.input);
        for idx in 0..input_len {
            has_match[input_idx + idx] = true;
            keep_origs[input_idx + idx] |= syn.keep_original;
        }
        for output in &syn.outputs {
            let pieces = words(output);
            for (offset, piece) in pieces.iter().enumerate() {
                let match_idx = input_idx + offset;
                let slot = outputs[match_idx].get_or_insert_with(String::new);
                if !slot.is_empty() {
                    slot.push('/');
                }
                slot.push_str(piece);
                if match_idx < num_inputs {
                    let (end_offset, position_length) = if pieces.len() == 1 {
                        let len = if syn.keep_original { input_len } else { 1 };
                        (input_idx * 2 + syn.input.len(), len)
                    } else {
                        (match_idx * 2 + 1, 1)
                    };
                    slot.push_str(&format!(":{end_offset}_{position_length}"));
                }
            }
        }
    }

    let mut expected = String::new();
    let limit = num_inputs + MAX_OUTPUT_LENGTH;
    for input_idx in 0..limit {
        if input_idx >= num_inputs && outputs[input_idx].is_none() {
            break;
        }
        let mut has_output = false;
        if input_idx < num_inputs && (!has_match[input_idx] || keep_origs[input_idx]) {
            expected.push_str(&doc[input_idx * 2..input_idx * 2 + 1]);
            has_output = true;
        }
        match &outputs[input_idx] {
            Some(output) => {
                if has_output {
                    expected.push('/');
                }
                expected.push_str(output);
            }
            None if !has_output => continue,
            None => {}
        }
        expected.push(' ');
    }
    expected
}

/// Check the filtered tokens against the notation of [`slow_matcher`]:
/// positions separated by spaces, stacked tokens by `/`, and `:END_LEN`
/// overriding the end offset and position length of a token.
fn verify(out: &[Token], expected: &str) {
    let mut upto = 0;
    for group in expected.split(' ').filter(|g| !g.is_empty()) {
        let start_offset = out[upto].start_offset;
        let end_offset = out[upto].end_offset;
        for (at_pos, spec) in group.split('/').enumerate() {
            let token = &out[upto];
            upto += 1;
            let (text, end, len) = match spec.split_once(':') {
                Some((text, rest)) => match rest.split_once('_') {
                    Some((end, len)) => (text, end.parse().unwrap(), len.parse().unwrap()),
                    None => (text, rest.parse().unwrap(), 1),
                },
                None => (spec, end_offset, 1),
            };
            assert_eq!(token.text, text, "token {upto}");
            assert_eq!(token.position_increment, usize::from(at_pos == 0), "token {upto}");
            assert_eq!(token.start_offset, start_offset, "token {upto}");
            assert_eq!(token.end_offset, end, "token {upto}");
            assert_eq!(token.position_length, len, "token {upto}");
        }
    }
    assert_eq!(upto, out.len());
}

fn run_random(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let alphabet = rng.random_range(2..=7u8);
    let doc = random_phrase(&mut rng, b'a', alphabet, 3000);

    let num_syn = rng.random_range(5..=20);
    let mut syns: Vec<OneSyn> = Vec::new();
    let mut by_input: HashMap<String, usize> = HashMap::new();
    let dedup = rng.random_bool(0.5);
    let mut builder = SynonymMapBuilder::new(dedup);

    for _ in 0..num_syn {
        let len = rng.random_range(1..=5);
        let input = random_phrase(&mut rng, b'a', alphabet, len).trim().to_string();
        let idx = *by_input.entry(input.clone()).or_insert_with(|| {
            syns.push(OneSyn {
                input: input.clone(),
                outputs: Vec::new(),
                keep_original: rng.random_bool(0.5),
            });
            syns.len() - 1
        });
        let len = rng.random_range(1..=MAX_OUTPUT_LENGTH);
        let output = random_phrase(&mut rng, b'0', 10, len).trim().to_string();
        let syn = &mut syns[idx];
        builder
            .add_phrase(&words(&syn.input), &words(&output), syn.keep_original)
            .unwrap();
        syn.outputs.push(output);
    }
    if dedup {
        prune_dups(&mut syns);
    }

    let filter = SynonymFilter::new(builder.build().unwrap(), true).unwrap();
    let tokens = WhitespaceTokenizer::new().tokenize(&doc).unwrap();
    let out: Vec<Token> = filter.wrap(tokens).collect();

    verify(&out, &slow_matcher(&doc, &syns));
}

#[test]
fn test_random_against_slow_matcher() {
    for seed in 0..20 {
        run_random(seed);
    }
}

#[test]
fn test_random_rules_stay_bounded() {
    let mut rng = StdRng::seed_from_u64(42);
    let alphabet: Vec<char> = "aAbBçÇ日本ß".chars().collect();
    let random_text = |rng: &mut StdRng, words: usize| -> String {
        (0..words)
            .map(|_| {
                let len = rng.random_range(1..=3);
                (0..len)
                    .map(|_| alphabet[rng.random_range(0..alphabet.len())])
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join(" ")
    };

    for _ in 0..10 {
        let mut builder = SynonymMapBuilder::new(rng.random_bool(0.5));
        for _ in 0..rng.random_range(1..=30) {
            let input_len = rng.random_range(1..=4);
            let output_len = rng.random_range(1..=4);
            let input = random_text(&mut rng, input_len);
            let output = random_text(&mut rng, output_len);
            builder
                .add_phrase(&words(&input), &words(&output), rng.random_bool(0.5))
                .unwrap();
        }
        let map = builder.build().unwrap();
        let max_context = map.max_horizontal_context();
        let filter = SynonymFilter::new(map, rng.random_bool(0.5)).unwrap();

        let text = random_text(&mut rng, 500);
        let mut stream = filter.wrap(WhitespaceTokenizer::new().tokenize(&text).unwrap());
        assert_eq!(stream.buffer_len(), max_context + 1);

        let mut last_position = 0;
        let mut emitted = 0;
        while let Some(token) = stream.next() {
            assert!(stream.buffered() < stream.buffer_len());
            assert!(!token.text.is_empty());
            assert!(token.start_offset <= token.end_offset);
            assert!(token.end_offset <= text.len());
            if emitted > 0 {
                assert_eq!(token.position, last_position + token.position_increment);
            }
            last_position = token.position;
            emitted += 1;
        }
        assert!(emitted > 0);
    }
}
