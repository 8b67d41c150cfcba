//! Key contract: fixed-width byte views and pluggable equality.

/// A key with a fixed, statically known number of bytes.
///
/// The trie consumes one byte per level, so `byte_at` is only called with
/// `level < WIDTH`. `WIDTH` must be non-zero.
///
/// Primitive integers expose their native-endian in-memory representation,
/// which matches comparing the raw bytes of the value. Types that should
/// compare by referenced content (strings, structures holding pointers) need
/// an adapter that reduces them to a fixed-size digest first.
pub trait ByteKey {
    /// Number of bytes, and therefore the maximum trie depth.
    const WIDTH: usize;

    /// Byte of the key consumed at trie depth `level`.
    fn byte_at(&self, level: usize) -> u8;
}

macro_rules! impl_byte_key_for_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl ByteKey for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                #[inline]
                fn byte_at(&self, level: usize) -> u8 {
                    self.to_ne_bytes()[level]
                }
            }
        )*
    };
}

impl_byte_key_for_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl ByteKey for char {
    const WIDTH: usize = 4;

    #[inline]
    fn byte_at(&self, level: usize) -> u8 {
        u32::from(*self).to_ne_bytes()[level]
    }
}

impl ByteKey for bool {
    const WIDTH: usize = 1;

    #[inline]
    fn byte_at(&self, level: usize) -> u8 {
        debug_assert_eq!(level, 0);
        u8::from(*self)
    }
}

impl<const N: usize> ByteKey for [u8; N] {
    const WIDTH: usize = N;

    #[inline]
    fn byte_at(&self, level: usize) -> u8 {
        self[level]
    }
}

/// Equality policy used to confirm a trie hit.
///
/// The trie only narrows candidates by byte path; the policy decides whether
/// the stored key really is the probed key. A policy must never call two keys
/// with identical bytes unequal, otherwise their collision cannot be resolved
/// within `WIDTH` levels.
///
/// Any `Fn(&K, &K) -> bool` closure is a policy.
pub trait KeyEq<K: ?Sized> {
    fn key_eq(&self, a: &K, b: &K) -> bool;
}

/// Default policy: all `WIDTH` bytes must match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bytewise;

impl<K: ByteKey> KeyEq<K> for Bytewise {
    #[inline]
    fn key_eq(&self, a: &K, b: &K) -> bool {
        (0..K::WIDTH).all(|level| a.byte_at(level) == b.byte_at(level))
    }
}

impl<K: ?Sized, F> KeyEq<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn key_eq(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

/// Index of the first byte at which `a` and `b` differ, if any.
pub fn first_difference<K: ByteKey>(a: &K, b: &K) -> Option<usize> {
    (0..K::WIDTH).find(|&level| a.byte_at(level) != b.byte_at(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widths() {
        assert_eq!(<u8 as ByteKey>::WIDTH, 1);
        assert_eq!(<u16 as ByteKey>::WIDTH, 2);
        assert_eq!(<u64 as ByteKey>::WIDTH, 8);
        assert_eq!(<i128 as ByteKey>::WIDTH, 16);
        assert_eq!(<char as ByteKey>::WIDTH, 4);
        assert_eq!(<[u8; 5] as ByteKey>::WIDTH, 5);
    }

    #[test]
    fn test_integer_bytes_follow_memory_layout() {
        let key = 0x0102_0304u32;
        let expected = key.to_ne_bytes();
        for level in 0..4 {
            assert_eq!(key.byte_at(level), expected[level]);
        }
    }

    #[test]
    fn test_array_and_bool_bytes() {
        let key = [9u8, 8, 7];
        assert_eq!(key.byte_at(0), 9);
        assert_eq!(key.byte_at(2), 7);
        assert_eq!(true.byte_at(0), 1);
        assert_eq!(false.byte_at(0), 0);
    }

    #[test]
    fn test_bytewise_eq() {
        assert!(Bytewise.key_eq(&42u64, &42u64));
        assert!(!Bytewise.key_eq(&42u64, &43u64));
        assert!(Bytewise.key_eq(&[1u8, 2], &[1u8, 2]));
        assert!(!Bytewise.key_eq(&'a', &'b'));
    }

    #[test]
    fn test_closure_policy() {
        let low_nibble = |a: &u8, b: &u8| a & 0x0f == b & 0x0f;
        assert!(low_nibble.key_eq(&0x13, &0x23));
        assert!(!low_nibble.key_eq(&0x13, &0x14));
    }

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference(&[1u8, 2, 3, 4], &[1u8, 2, 3, 5]), Some(3));
        assert_eq!(first_difference(&[0u8, 2], &[1u8, 2]), Some(0));
        assert_eq!(first_difference(&7u32, &7u32), None);
    }
}
