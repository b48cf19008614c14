//! Client transaction identifiers (`clTRID`).
//!
//! The target server's recorded transcripts were captured against a specific
//! alphabet; reproducing it bit-for-bit (rather than, say, using the full
//! `A-Z0-9` range) keeps freshly generated traffic indistinguishable from
//! traffic the server has already seen in the field.

use rand::Rng;

/// `W` appears, `U` does not — preserved exactly as the upstream source has
/// it, not "fixed".
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVXYZW0123456789";

const LENGTH: usize = 5;

/// Draws a fresh 5-character transaction id from [`ALPHABET`].
///
/// Seeded from the process RNG once per call; callers needing one id per
/// command (the common case) can call this directly without maintaining
/// their own generator state.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    (0..LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawn_from_alphabet_and_right_length() {
        for _ in 0..200 {
            let id = generate();
            assert_eq!(id.len(), LENGTH);
            assert!(id.chars().all(|c| ALPHABET.contains(&(c as u8))));
        }
    }

    #[test]
    fn alphabet_omits_u_includes_w() {
        assert!(!ALPHABET.contains(&b'U'));
        assert_eq!(ALPHABET.iter().filter(|&&b| b == b'W').count(), 1);
    }
}
