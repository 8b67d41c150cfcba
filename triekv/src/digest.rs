//! 64-bit FNV-1a.
//!
//! Used to reduce variable-length keys to the fixed 8 bytes the trie walks.
//! Not collision resistant; distinct inputs may share a digest.

use std::hash::Hasher;

/// Initial state.
pub const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
/// Multiplier applied after each byte.
pub const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Streaming FNV-1a state.
///
/// Bytes may be fed in any number of pieces; the digest only depends on the
/// concatenation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fnv1a64 {
    state: u64,
}

impl Fnv1a64 {
    /// Fresh state, equal to the digest of no bytes.
    #[inline]
    pub const fn new() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }

    /// State after ingesting `bytes`.
    pub fn with_bytes(bytes: &[u8]) -> Self {
        let mut h = Self::new();
        h.ingest(bytes);
        h
    }

    /// Mix `bytes` into the state.
    #[inline]
    pub fn ingest(&mut self, bytes: &[u8]) -> &mut Self {
        for &b in bytes {
            self.state ^= u64::from(b);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
        self
    }

    /// By-value form of [`ingest`](Self::ingest) for chaining.
    #[inline]
    pub fn chain(mut self, bytes: &[u8]) -> Self {
        self.ingest(bytes);
        self
    }

    /// Current digest. Ingesting more bytes afterwards is allowed.
    #[inline]
    pub fn digest(&self) -> u64 {
        self.state
    }
}

/// Digest of `bytes` in one call.
#[inline]
pub fn hash_bytes(bytes: &[u8]) -> u64 {
    Fnv1a64::with_bytes(bytes).digest()
}

impl Default for Fnv1a64 {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv1a64 {
    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.ingest(bytes);
    }
}

impl From<Fnv1a64> for u64 {
    fn from(h: Fnv1a64) -> u64 {
        h.digest()
    }
}
