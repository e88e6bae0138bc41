use core::hash::BuildHasher;
use core::hash::Hash;

/// The hash builder used by [`NaturalStrategy`] when none is supplied.
pub type DefaultHashBuilder = foldhash::fast::RandomState;

/// Hash and equality semantics for map keys.
///
/// A strategy decides how two keys are compared and how a key is reduced to
/// a 64-bit hash code. The map consults its strategy on every slot-index and
/// equality decision, so a strategy can impose an identity that differs from
/// the key type's intrinsic `Hash`/`Eq` — for example comparing strings
/// case-insensitively — without a parallel map implementation.
///
/// Implementations must be coherent: keys that compare equal under
/// [`eq_keys`] must produce the same value from [`hash_key`]. A map must be
/// used with one strategy value for its whole lifetime; feeding a table
/// entries hashed under two different strategies corrupts the slot layout.
///
/// [`eq_keys`]: HashingStrategy::eq_keys
/// [`hash_key`]: HashingStrategy::hash_key
///
/// # Examples
///
/// ```rust
/// use packed_map::HashingStrategy;
/// use packed_map::PackedMap;
///
/// struct AsciiCaseInsensitive;
///
/// impl HashingStrategy<String> for AsciiCaseInsensitive {
///     fn hash_key(&self, key: &String) -> u64 {
///         key.bytes()
///             .map(|b| b.to_ascii_lowercase() as u64)
///             .fold(0xcbf2_9ce4_8422_2325, |h, b| {
///                 (h ^ b).wrapping_mul(0x0000_0100_0000_01b3)
///             })
///     }
///
///     fn eq_keys(&self, a: &String, b: &String) -> bool {
///         a.eq_ignore_ascii_case(b)
///     }
/// }
///
/// let mut map = PackedMap::with_strategy(AsciiCaseInsensitive);
/// map.insert("Key".to_string(), 1);
/// assert_eq!(map.get(&"KEY".to_string()), Some(&1));
/// ```
pub trait HashingStrategy<K: ?Sized> {
    /// Returns the hash code of `key` under this strategy.
    fn hash_key(&self, key: &K) -> u64;

    /// Returns `true` if `a` and `b` identify the same key under this
    /// strategy.
    fn eq_keys(&self, a: &K, b: &K) -> bool;
}

/// The natural strategy: a key's own `Hash` and `Eq` implementations,
/// hashed through a configurable [`BuildHasher`].
///
/// This is the default strategy of [`PackedMap`](crate::PackedMap). The
/// hash builder defaults to [`DefaultHashBuilder`]; use [`with_hasher`] to
/// supply another one (for example a keyed SipHash builder).
///
/// [`with_hasher`]: NaturalStrategy::with_hasher
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalStrategy<S = DefaultHashBuilder> {
    hash_builder: S,
}

impl<S> NaturalStrategy<S> {
    /// Creates a natural strategy that hashes through `hash_builder`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use packed_map::NaturalStrategy;
    /// use packed_map::PackedMap;
    /// use siphasher::sip::SipHasher13;
    ///
    /// #[derive(Default)]
    /// struct Sip;
    ///
    /// impl core::hash::BuildHasher for Sip {
    ///     type Hasher = SipHasher13;
    ///
    ///     fn build_hasher(&self) -> Self::Hasher {
    ///         SipHasher13::new()
    ///     }
    /// }
    ///
    /// let mut map = PackedMap::with_strategy(NaturalStrategy::with_hasher(Sip));
    /// map.insert(1, "one");
    /// assert_eq!(map.get(&1), Some(&"one"));
    /// ```
    pub const fn with_hasher(hash_builder: S) -> Self {
        NaturalStrategy { hash_builder }
    }

    /// Returns a reference to the underlying hash builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }
}

impl<K, S> HashingStrategy<K> for NaturalStrategy<S>
where
    K: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    fn hash_key(&self, key: &K) -> u64 {
        self.hash_builder.hash_one(key)
    }

    fn eq_keys(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_strategy_matches_key_semantics() {
        let strategy: NaturalStrategy = NaturalStrategy::default();

        let a = "alpha".to_string();
        let b = "alpha".to_string();
        let c = "beta".to_string();

        assert!(strategy.eq_keys(&a, &b));
        assert!(!strategy.eq_keys(&a, &c));
        assert_eq!(strategy.hash_key(&a), strategy.hash_key(&b));
    }

    #[test]
    fn test_custom_strategy_overrides_equality() {
        struct Modulo(u64);

        impl HashingStrategy<u64> for Modulo {
            fn hash_key(&self, key: &u64) -> u64 {
                key % self.0
            }

            fn eq_keys(&self, a: &u64, b: &u64) -> bool {
                a % self.0 == b % self.0
            }
        }

        let strategy = Modulo(10);
        assert!(strategy.eq_keys(&3, &13));
        assert_eq!(strategy.hash_key(&3), strategy.hash_key(&13));
        assert!(!strategy.eq_keys(&3, &4));
    }
}
