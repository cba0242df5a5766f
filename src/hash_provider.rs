use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::ptr::NonNull;

use crate::error::ConfigurationError;

/// Maps keys to home slots.
///
/// Implementations must be pure: the same key and range always produce the
/// same index. The map calls [`home`](HashProvider::home) on every lookup, on
/// every insertion and once per entry on every resize, always with the
/// table's current capacity as `range`.
pub trait HashProvider<K: ?Sized> {
    /// Returns the home slot of `key` in a table of `range` slots. The result
    /// must be smaller than `range`.
    fn home(&self, key: &K, range: usize) -> usize;

    /// Checks that the provider can hash keys of type `K`. Called once when
    /// the map is built.
    fn validate(&self) -> Result<(), ConfigurationError> {
        Ok(())
    }
}

/// Exposes the raw byte representation of a key to [`PolynomialHash`].
///
/// Implemented for primitives, raw pointers and fixed-size arrays of such
/// (all `CONTIGUOUS`), and for a few heap-backed types that are *not*
/// contiguous, so that selecting the default hash for them fails at
/// construction with [`ConfigurationError::InvalidKeyType`].
pub trait RawBytes {
    /// Whether the value's bytes fully describe it.
    const CONTIGUOUS: bool = true;

    /// Feeds the value's bytes, in memory order, to `visit`.
    fn visit_bytes(&self, visit: &mut impl FnMut(u8));
}

macro_rules! impl_raw_bytes_for_numbers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RawBytes for $ty {
                #[inline]
                fn visit_bytes(&self, visit: &mut impl FnMut(u8)) {
                    self.to_ne_bytes().into_iter().for_each(visit);
                }
            }
        )*
    };
}

impl_raw_bytes_for_numbers!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
);

impl RawBytes for bool {
    #[inline]
    fn visit_bytes(&self, visit: &mut impl FnMut(u8)) {
        visit(u8::from(*self));
    }
}

impl RawBytes for char {
    #[inline]
    fn visit_bytes(&self, visit: &mut impl FnMut(u8)) {
        u32::from(*self).visit_bytes(visit);
    }
}

impl RawBytes for () {
    #[inline]
    fn visit_bytes(&self, _visit: &mut impl FnMut(u8)) {}
}

impl<T: ?Sized> RawBytes for *const T {
    #[inline]
    fn visit_bytes(&self, visit: &mut impl FnMut(u8)) {
        self.addr().visit_bytes(visit);
    }
}

impl<T: ?Sized> RawBytes for *mut T {
    #[inline]
    fn visit_bytes(&self, visit: &mut impl FnMut(u8)) {
        self.addr().visit_bytes(visit);
    }
}

impl<T: ?Sized> RawBytes for NonNull<T> {
    #[inline]
    fn visit_bytes(&self, visit: &mut impl FnMut(u8)) {
        self.as_ptr().visit_bytes(visit);
    }
}

impl<T: RawBytes, const N: usize> RawBytes for [T; N] {
    const CONTIGUOUS: bool = T::CONTIGUOUS;

    #[inline]
    fn visit_bytes(&self, visit: &mut impl FnMut(u8)) {
        for item in self {
            item.visit_bytes(visit);
        }
    }
}

// Heap-backed values: their inline bytes are a pointer and a length, which say
// nothing about equality.
macro_rules! impl_raw_bytes_for_heap_backed {
    ($([$($generics:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($generics)*> RawBytes for $ty {
                const CONTIGUOUS: bool = false;

                fn visit_bytes(&self, _visit: &mut impl FnMut(u8)) {}
            }
        )*
    };
}

impl_raw_bytes_for_heap_backed!(
    [] String,
    [T] Vec<T>,
    [T: ?Sized] Box<T>,
);

/// Prime just above the number of distinct byte values.
const POLYNOMIAL_BASE: u128 = u8::MAX as u128 + 2;

/// The default hash: a polynomial rolling hash over the key's bytes.
///
/// For bytes `b[0..n]` and range `m` this computes
/// `Σ (b[i] + 1) · 257^(i + 1) mod m`, reducing by the requested range at every
/// step, so the value is re-derived for each capacity rather than cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolynomialHash;

impl<K: RawBytes> HashProvider<K> for PolynomialHash {
    fn home(&self, key: &K, range: usize) -> usize {
        let range = range as u128;
        let mut hash = 0u128;
        let mut power = POLYNOMIAL_BASE % range;

        key.visit_bytes(&mut |byte| {
            hash = (hash + (u128::from(byte) + 1) * power) % range;
            power = (power * POLYNOMIAL_BASE) % range;
        });

        hash as usize
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if K::CONTIGUOUS {
            Ok(())
        } else {
            Err(ConfigurationError::InvalidKeyType)
        }
    }
}

/// A user supplied hash function; its result is reduced modulo the range.
#[derive(Clone, Copy)]
pub struct FnHash<F>(pub F);

impl<F> Debug for FnHash<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnHash").finish_non_exhaustive()
    }
}

impl<K: ?Sized, F> HashProvider<K> for FnHash<F>
where
    F: Fn(&K) -> usize,
{
    #[inline]
    fn home(&self, key: &K, range: usize) -> usize {
        (self.0)(key) % range
    }
}

/// Adapts any [`BuildHasher`] into a [`HashProvider`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildHasherProvider<S>(pub S);

impl<K: Hash + ?Sized, S: BuildHasher> HashProvider<K> for BuildHasherProvider<S> {
    #[inline]
    fn home(&self, key: &K, range: usize) -> usize {
        (u128::from(self.0.hash_one(key)) % range as u128) as usize
    }
}

/// Foldhash with a fixed seed.
#[cfg(feature = "foldhash")]
pub type FoldHash = BuildHasherProvider<foldhash::fast::FixedState>;

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;
    use core::hash::Hasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    fn bytes_of<K: RawBytes>(key: &K) -> Vec<u8> {
        let mut bytes = Vec::new();
        key.visit_bytes(&mut |b| bytes.push(b));
        bytes
    }

    #[derive(Clone)]
    struct SipHashBuilder {
        k0: u64,
        k1: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k0, self.k1)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k0: rng.try_next_u64().unwrap_or(0),
                k1: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    #[test]
    fn polynomial_hash_matches_hand_computed_values() {
        // (0 + 1) * 257
        assert_eq!(PolynomialHash.home(&0u8, 1000), 257);
        // (1 + 1) * 257 + (0 + 1) * 257^2 = 514 + 66049
        assert_eq!(PolynomialHash.home(&[1u8, 0u8], 1000), 66563 % 1000);
        // Nothing to hash.
        assert_eq!(PolynomialHash.home(&(), 1000), 0);
    }

    #[test]
    fn polynomial_hash_stays_in_range() {
        for range in [1usize, 2, 3, 31, 32, 64, 97, 1 << 20, usize::MAX] {
            for key in [0u64, 1, 42, 0xDEAD_BEEF, u64::MAX] {
                assert!(PolynomialHash.home(&key, range) < range);
            }
        }
    }

    #[test]
    fn polynomial_hash_depends_on_range() {
        let key = 0x0102_0304_u32;
        let small = PolynomialHash.home(&key, 32);
        let large = PolynomialHash.home(&key, 1 << 20);
        assert_eq!(large % 32, small);
    }

    #[test]
    fn raw_bytes_of_arrays_concatenate_elements() {
        assert_eq!(bytes_of(&[1u8, 2, 3]), vec![1, 2, 3]);
        assert_eq!(bytes_of(&[[1u8, 2], [3, 4]]), vec![1, 2, 3, 4]);
        assert_eq!(bytes_of(&true), vec![1]);
        assert_eq!(bytes_of(&'a'), bytes_of(&('a' as u32)));
        assert_eq!(bytes_of(&7u16), 7u16.to_ne_bytes().to_vec());
    }

    #[test]
    fn pointers_hash_by_address() {
        let values = [1u32, 2u32];
        let first: *const u32 = &values[0];
        let second: *const u32 = &values[1];
        assert_eq!(bytes_of(&first), first.addr().to_ne_bytes().to_vec());
        assert_ne!(bytes_of(&first), bytes_of(&second));
    }

    #[test]
    fn default_hash_rejects_heap_backed_keys() {
        assert_eq!(
            HashProvider::<String>::validate(&PolynomialHash),
            Err(ConfigurationError::InvalidKeyType)
        );
        assert_eq!(
            HashProvider::<Vec<u8>>::validate(&PolynomialHash),
            Err(ConfigurationError::InvalidKeyType)
        );
        assert_eq!(
            HashProvider::<[String; 2]>::validate(&PolynomialHash),
            Err(ConfigurationError::InvalidKeyType)
        );
        assert_eq!(HashProvider::<u64>::validate(&PolynomialHash), Ok(()));
        assert_eq!(HashProvider::<[i16; 4]>::validate(&PolynomialHash), Ok(()));
    }

    #[test]
    fn fn_hash_reduces_modulo_range() {
        let provider = FnHash(|key: &usize| *key);
        assert_eq!(provider.home(&5, 32), 5);
        assert_eq!(provider.home(&37, 32), 5);
        assert_eq!(HashProvider::<usize>::validate(&provider), Ok(()));
    }

    #[test]
    fn build_hasher_provider_is_deterministic() {
        let provider = BuildHasherProvider(SipHashBuilder::default());
        let key = "hopscotch".to_string();

        let mut hasher = provider.0.build_hasher();
        key.hash(&mut hasher);
        let expected = (hasher.finish() % 97) as usize;

        assert_eq!(provider.home(&key, 97), expected);
        assert_eq!(provider.home(&key, 97), provider.home(&key, 97));
        assert_eq!(HashProvider::<String>::validate(&provider), Ok(()));
    }

    #[cfg(feature = "foldhash")]
    #[test]
    fn foldhash_provider_stays_in_range() {
        let provider = FoldHash::default();
        for key in 0..1000u64 {
            assert!(provider.home(&key, 48) < 48);
        }
    }
}
