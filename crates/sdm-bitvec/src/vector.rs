//! Binary vector implementation.
//!
//! Runtime-sized bit vectors packed into u64 words.

use crate::BitVecError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A fixed-length binary vector stored as packed u64 words.
///
/// The length is chosen at construction and every operation that combines
/// two vectors requires equal lengths. Unused high bits of the last word
/// are kept at zero, so derived equality and hashing are exact.
///
/// # Example
/// ```
/// use sdm_bitvec::BitVector;
///
/// let a = BitVector::from_bit_str("10101010")?;
/// let b = BitVector::from_bit_str("11110000")?;
/// assert_eq!(a.distance(&b)?, 4);
/// # Ok::<(), sdm_bitvec::BitVecError>(())
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct BitVector {
    /// Number of valid bits.
    len: usize,
    /// Packed storage, least-significant bit first within each word.
    words: Vec<u64>,
}

impl BitVector {
    /// Create an all-zero vector of the given bit length.
    pub fn zeros(len: usize) -> Self {
        Self {
            len,
            words: vec![0u64; Self::words_for(len)],
        }
    }

    /// Create a uniformly random vector using the given RNG.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        let mut words = vec![0u64; Self::words_for(len)];
        for word in words.iter_mut() {
            *word = rng.gen();
        }
        let mut v = Self { len, words };
        v.mask_tail();
        v
    }

    /// Parse a vector from a string of `'0'` and `'1'` characters.
    ///
    /// Bit 0 of the vector is the first character of the string.
    pub fn from_bit_str(s: &str) -> Result<Self, BitVecError> {
        let mut v = Self::zeros(s.len());
        for (i, c) in s.chars().enumerate() {
            match c {
                '0' => {}
                '1' => v.set(i, true),
                _ => return Err(BitVecError::InvalidBit { position: i, found: c }),
            }
        }
        Ok(v)
    }

    /// Render the vector as a string of `'0'` and `'1'` characters.
    pub fn to_bit_string(&self) -> String {
        (0..self.len)
            .map(|i| if self.get(i) { '1' } else { '0' })
            .collect()
    }

    /// Number of bits in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the vector has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the bit at `index`. Out-of-range reads return `false`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        (self.words[index / 64] >> (index % 64)) & 1 == 1
    }

    /// Set the bit at `index`. Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        if index >= self.len {
            return;
        }
        let word = index / 64;
        let bit = index % 64;
        if value {
            self.words[word] |= 1u64 << bit;
        } else {
            self.words[word] &= !(1u64 << bit);
        }
    }

    /// Count the set bits.
    #[inline]
    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Hamming distance to another vector of the same length.
    ///
    /// Computed word-wise as XOR + POPCNT.
    #[inline]
    pub fn distance(&self, other: &Self) -> Result<u32, BitVecError> {
        if self.len != other.len {
            return Err(BitVecError::LengthMismatch {
                expected: self.len,
                actual: other.len,
            });
        }
        Ok(self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum())
    }

    fn words_for(len: usize) -> usize {
        len / 64 + usize::from(len % 64 != 0)
    }

    /// Zero the unused high bits of the last word.
    fn mask_tail(&mut self) {
        let tail_bits = self.len % 64;
        if tail_bits > 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << tail_bits) - 1;
            }
        }
    }
}

impl std::fmt::Display for BitVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

impl std::fmt::Debug for BitVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.len <= 64 {
            write!(f, "BitVector({})", self.to_bit_string())
        } else {
            write!(f, "BitVector(len={}, ones={})", self.len, self.count_ones())
        }
    }
}

impl Serialize for BitVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_bit_string())
    }
}

impl<'de> Deserialize<'de> for BitVector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_bit_str(&s).map_err(serde::de::Error::custom)
    }
}
