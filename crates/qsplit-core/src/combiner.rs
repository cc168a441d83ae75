//! Domain-separated SHA-256 mixing of per-source hex outputs.
//!
//! **All** mixing of source outputs lives here. Adapters return raw hex; the
//! aggregator hands the successful subset to [`combine`] in registration
//! order.
//!
//! # Preimage layout
//!
//! ```text
//! hex_1 ":" hex_2 ":" … ":" hex_n ":" hex(now_millis) ":" decimal(n)
//! ```
//!
//! The timestamp and input count are folded in so two rounds with identical
//! source outputs still produce different combined values. This is a mixing
//! step, not a randomness extractor.

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::hex_string;

/// Separator between preimage fields.
pub const SEPARATOR: char = ':';

/// Length of a mixed output in hex characters.
pub const COMBINED_HEX_LEN: usize = 64;

/// Mix `hex_results` into one value.
///
/// A single input is returned unchanged. Two or more are validated, joined,
/// suffixed with the timestamp and count, and hashed to 64 lowercase hex
/// characters. Pure: identical inputs and timestamp give identical output.
pub fn combine<S: AsRef<str>>(hex_results: &[S], now_millis: u64) -> Result<String> {
    match hex_results {
        [] => Err(Error::NothingToCombine),
        [single] => Ok(single.as_ref().to_string()),
        many => {
            for h in many {
                let h = h.as_ref();
                if hex_string::check(h).is_err() {
                    return Err(Error::InvalidHex {
                        prefix: h.chars().take(16).collect(),
                    });
                }
            }
            Ok(hex_string::encode(&Sha256::digest(preimage(many, now_millis))))
        }
    }
}

fn preimage<S: AsRef<str>>(inputs: &[S], now_millis: u64) -> Vec<u8> {
    let total: usize = inputs.iter().map(|h| h.as_ref().len() + 1).sum();
    let mut buf = String::with_capacity(total + 24);
    for (i, h) in inputs.iter().enumerate() {
        if i > 0 {
            buf.push(SEPARATOR);
        }
        buf.push_str(h.as_ref());
    }
    buf.push(SEPARATOR);
    buf.push_str(&format!("{now_millis:x}"));
    buf.push(SEPARATOR);
    buf.push_str(&inputs.len().to_string());
    buf.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: u64 = 1_700_000_000_000;

    #[test]
    fn single_input_passes_through() {
        assert_eq!(combine(&["00ff"], T).unwrap(), "00ff");
        let long = "ab".repeat(128);
        assert_eq!(combine(&[long.as_str()], T).unwrap(), long);
    }

    #[test]
    fn empty_input_is_rejected() {
        let none: [&str; 0] = [];
        assert!(matches!(combine(&none, T), Err(Error::NothingToCombine)));
    }

    #[test]
    fn known_vector() {
        // sha256("00ff:abcd:18bcfe56800:2")
        assert_eq!(
            combine(&["00ff", "abcd"], T).unwrap(),
            "324b6642225abefb4e429edffa0f141fe614388988167e215eba569c41289ef9"
        );
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let a = combine(&["00ff", "abcd", "1234"], T).unwrap();
        let b = combine(&["00ff", "abcd", "1234"], T).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn order_sensitive() {
        assert_eq!(
            combine(&["abcd", "00ff"], T).unwrap(),
            "1c3165936626e8e104a9a860a453f9214950865ae127b3cc13efbf4f3117a3de"
        );
        assert_ne!(
            combine(&["00ff", "abcd"], T).unwrap(),
            combine(&["abcd", "00ff"], T).unwrap()
        );
    }

    #[test]
    fn timestamp_sensitive() {
        assert_eq!(
            combine(&["00ff", "abcd"], T + 1).unwrap(),
            "f5181bcc2a725cff5cc78a9e5c1958ea136a08d1b85f9bb8eaf16a63d78013f3"
        );
    }

    #[test]
    fn output_is_64_lowercase_hex_for_any_input_lengths() {
        let inputs = ["00".to_string(), "ab".repeat(512), "0123456789abcdef".to_string()];
        let out = combine(&inputs, T).unwrap();
        assert_eq!(out.len(), COMBINED_HEX_LEN);
        assert!(out.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn malformed_input_reports_prefix() {
        let bad = "zz".repeat(20);
        match combine(&["00ff", bad.as_str()], T) {
            Err(Error::InvalidHex { prefix }) => assert_eq!(prefix, "z".repeat(16)),
            other => panic!("expected InvalidHex, got {other:?}"),
        }
    }

    #[test]
    fn odd_length_input_rejected() {
        assert!(matches!(
            combine(&["00ff", "abc"], T),
            Err(Error::InvalidHex { .. })
        ));
    }
}
