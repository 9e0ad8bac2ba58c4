//! Base-2048 text encoding.
//!
//! Every symbol carries 11 bits. A final group of at most 3 bits is written
//! with one of 8 tail symbols that sit outside the main alphabet, which tells
//! the decoder how many bits the last symbol holds.

use std::sync::OnceLock;

use crate::error::DecodeError;

const ALPHABET_SRC: &str = include_str!("alphabet.txt");

pub const ALPHABET_LEN: usize = 2048;

/// Highest codepoint any valid symbol can have.
pub const MAX_CODEPOINT: u32 = 4339;

pub const TAIL: [char; 8] = ['།', '༎', '༏', '༐', '༑', '༆', '༈', '༒'];

const UNUSED: u16 = u16::MAX;

fn alphabet() -> &'static [char] {
    static ALPHABET: OnceLock<Vec<char>> = OnceLock::new();
    ALPHABET.get_or_init(|| ALPHABET_SRC.chars().collect())
}

/// Codepoint → symbol value, `UNUSED` for codepoints outside the alphabet.
fn decode_table() -> &'static [u16] {
    static TABLE: OnceLock<Vec<u16>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = vec![UNUSED; MAX_CODEPOINT as usize + 1];
        for (value, &c) in alphabet().iter().enumerate() {
            table[c as usize] = value as u16;
        }
        table
    })
}

pub fn encode(bytes: &[u8]) -> String {
    let alphabet = alphabet();
    let mut out = String::with_capacity(bytes.len() * 8 / 11 * 3 + 3);
    let mut stage: u32 = 0;
    let mut remaining: u32 = 0;

    for &byte in bytes {
        let byte = u32::from(byte);
        let need = 11 - remaining;
        if need < 8 {
            remaining = 8 - need;
            let index = (stage << need) | (byte >> remaining);
            out.push(alphabet[index as usize]);
            stage = byte & ((1 << remaining) - 1);
        } else {
            stage = (stage << 8) | byte;
            remaining += 8;
        }
    }

    if remaining > 0 {
        let symbol = if remaining <= 3 {
            TAIL[stage as usize]
        } else {
            alphabet[stage as usize]
        };
        out.push(symbol);
    }
    out
}

pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    let table = decode_table();
    let mut out = Vec::with_capacity(text.len());
    let mut stage: u32 = 0;
    let mut remaining: u32 = 0;
    // bit offset of the next symbol within its byte
    let mut residue: u32 = 0;
    let mut chars = text.chars().enumerate().peekable();

    while let Some((index, c)) = chars.next() {
        residue = (residue + 11) % 8;
        let codepoint = u32::from(c);
        if codepoint > MAX_CODEPOINT {
            return Err(DecodeError::InvalidCharacter { index, codepoint });
        }

        let (n_bits, bits) = match table[codepoint as usize] {
            UNUSED => {
                if let Some(&(next_index, next)) = chars.peek() {
                    return Err(DecodeError::AfterTermination {
                        index: next_index,
                        found: next,
                        tail_index: index,
                        tail: c,
                    });
                }
                let tail = TAIL
                    .iter()
                    .position(|&t| t == c)
                    .ok_or(DecodeError::InvalidTermination { index, found: c })?
                    as u32;
                let need = 8 - remaining;
                if tail >= (1 << need) {
                    return Err(DecodeError::InvalidTail { index, found: c });
                }
                (need, tail)
            }
            value => {
                let n_bits = if chars.peek().is_some() { 11 } else { 11 - residue };
                (n_bits, u32::from(value))
            }
        };

        remaining += n_bits;
        stage = (stage << n_bits) | bits;
        while remaining > 8 {
            remaining -= 8;
            out.push((stage >> remaining) as u8);
            stage &= (1 << remaining) - 1;
        }
    }

    if remaining > 0 {
        out.push((stage >> (8 - remaining)) as u8);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn alphabet_is_well_formed() {
        let alphabet = alphabet();
        assert_eq!(alphabet.len(), ALPHABET_LEN);
        assert_eq!(alphabet.iter().collect::<HashSet<_>>().len(), ALPHABET_LEN);
        assert!(alphabet.iter().all(|&c| u32::from(c) <= MAX_CODEPOINT));
        assert!(TAIL.iter().all(|t| !alphabet.contains(t)));
    }

    #[test]
    fn round_trips_short_inputs() {
        for len in 0..100usize {
            let bytes: Vec<u8> = (0..len).map(|i| (i * 37 + len) as u8).collect();
            let text = encode(&bytes);
            assert_eq!(text.chars().count(), (len * 8).div_ceil(11));
            assert_eq!(decode(&text).unwrap(), bytes, "length {len}");
        }
    }

    #[test]
    fn empty_input_is_empty_text() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn one_byte_uses_a_full_symbol() {
        // 8 bits left over: too many for a tail symbol
        let text = encode(&[0xff]);
        assert_eq!(text.chars().count(), 1);
        assert!(!TAIL.contains(&text.chars().next().unwrap()));
    }

    #[test]
    fn rejects_out_of_range_codepoints() {
        let err = decode("AB\u{1F600}").unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidCharacter {
                index: 2,
                codepoint: 0x1F600
            }
        );
        assert_eq!(err.to_string(), "Invalid character 2: [128512]");
    }

    #[test]
    fn rejects_symbols_after_tail() {
        let mut text = encode(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
        // 88 bits end on a symbol boundary, so append a tail by hand
        text.push(TAIL[0]);
        text.push('A');
        let err = decode(&text).unwrap_err();
        assert!(matches!(err, DecodeError::AfterTermination { index: 9, found: 'A', .. }));
    }

    #[test]
    fn rejects_unknown_terminators_and_tails() {
        // ASCII punctuation is neither in the alphabet nor a tail symbol
        let err = decode("A!").unwrap_err();
        assert_eq!(err, DecodeError::InvalidTermination { index: 1, found: '!' });

        // tail values are bounded by the bits still missing from the last byte
        let err = decode(&format!("AAAAAAAA{}", TAIL[7])).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidTail { index: 8, .. }));
    }
}
