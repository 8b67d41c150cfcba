//! Fixed-width keys for variable-length data.

use std::fmt;
use std::hash::Hash;

use byte_trie::ByteKey;

use crate::digest::{hash_bytes, Fnv1a64};

/// An 8-byte key holding the FNV-1a digest of some content.
///
/// Strings and byte slices compare by content this way: two keys with the
/// same bytes always produce the same digest. Distinct contents can collide,
/// in which case they address the same stored value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DigestKey(u64);

impl DigestKey {
    /// Digest of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(hash_bytes(bytes))
    }

    /// Digest of any hashable value, fed through [`Hash`].
    ///
    /// Note that `Hash` for `str` appends a terminator byte, so
    /// `DigestKey::of("a")` differs from `DigestKey::from("a")`.
    pub fn of<T: Hash + ?Sized>(value: &T) -> Self {
        let mut h = Fnv1a64::new();
        value.hash(&mut h);
        Self(h.digest())
    }

    /// Wrap a digest computed elsewhere.
    pub const fn from_digest(digest: u64) -> Self {
        Self(digest)
    }

    /// The wrapped digest.
    pub const fn digest(self) -> u64 {
        self.0
    }
}

impl ByteKey for DigestKey {
    const WIDTH: usize = 8;

    #[inline]
    fn byte_at(&self, level: usize) -> u8 {
        self.0.to_le_bytes()[level]
    }
}

impl From<&str> for DigestKey {
    fn from(s: &str) -> Self {
        Self::from_bytes(s.as_bytes())
    }
}

impl From<&String> for DigestKey {
    fn from(s: &String) -> Self {
        Self::from_bytes(s.as_bytes())
    }
}

impl From<&[u8]> for DigestKey {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl<const N: usize> From<&[u8; N]> for DigestKey {
    fn from(bytes: &[u8; N]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Debug for DigestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DigestKey({:#018x})", self.0)
    }
}
