//! Text to bit-vector codec and demo vector generation.
//!
//! Untyped user text is expanded byte-by-byte, most significant bit first,
//! into a fixed-width vector, zero-padded or truncated to the memory's
//! address size. Decoding reverses the expansion and drops NUL bytes left
//! by the padding.

use rand::Rng;
use sdm_bitvec::BitVector;

/// Encode text as a fixed-width bit vector.
pub fn encode_text(text: &str, width: usize) -> BitVector {
    let mut v = BitVector::zeros(width);
    let mut index = 0;
    'outer: for byte in text.bytes() {
        for shift in (0..8).rev() {
            if index >= width {
                break 'outer;
            }
            v.set(index, byte & (1 << shift) != 0);
            index += 1;
        }
    }
    v
}

/// Decode a bit vector back to text, skipping NUL padding bytes.
///
/// Trailing bits that do not fill a whole byte are ignored.
pub fn decode_text(vector: &BitVector) -> String {
    let mut bytes = Vec::with_capacity(vector.len() / 8);
    for chunk_start in (0..vector.len() / 8 * 8).step_by(8) {
        let mut byte = 0u8;
        for offset in 0..8 {
            if vector.get(chunk_start + offset) {
                byte |= 1 << (7 - offset);
            }
        }
        if byte != 0 {
            bytes.push(byte);
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Generate a random printable ASCII string (`'!'` through `'~'`).
pub fn random_ascii_string<R: Rng>(len: usize, rng: &mut R) -> String {
    (0..len).map(|_| rng.gen_range(b'!'..=b'~') as char).collect()
}
