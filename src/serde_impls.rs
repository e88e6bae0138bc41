//! Serialization codec for [`PackedMap`].
//!
//! The wire layout is the entry count, the load factor, and every live pair
//! in physical slot order (primary slots in index order, each chain
//! exhausted at its anchor). The physical order is a storage artifact, not
//! a cross-version contract: deserialization sizes an empty map from the
//! declared count and load factor and reinserts every pair through the
//! normal insert path, so the rebuilt chain state is consistent regardless
//! of the original layout.
//!
//! The hashing strategy travels in the type parameter: deserializing
//! requires `H: Default`, which reconstructs the strategy the map was
//! declared with.

use core::fmt;
use core::marker::PhantomData;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;
use serde::de::DeserializeSeed;
use serde::de::SeqAccess;
use serde::de::Visitor;
use serde::ser::SerializeSeq;
use serde::ser::SerializeTupleStruct;

use crate::map::PackedMap;
use crate::strategy::HashingStrategy;

impl<K, V, H> Serialize for PackedMap<K, V, H>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_tuple_struct("PackedMap", 3)?;
        state.serialize_field(&(self.len() as u64))?;
        state.serialize_field(&self.load_factor())?;
        state.serialize_field(&Entries(self))?;
        state.end()
    }
}

/// The pairs of a map, serialized as a sequence in physical slot order.
struct Entries<'a, K, V, H>(&'a PackedMap<K, V, H>);

impl<K, V, H> Serialize for Entries<'_, K, V, H>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for pair in self.0.iter() {
            seq.serialize_element(&pair)?;
        }
        seq.end()
    }
}

impl<'de, K, V, H> Deserialize<'de> for PackedMap<K, V, H>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    H: HashingStrategy<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_tuple_struct(
            "PackedMap",
            3,
            MapVisitor {
                marker: PhantomData,
            },
        )
    }
}

struct MapVisitor<K, V, H> {
    marker: PhantomData<(K, V, H)>,
}

impl<'de, K, V, H> Visitor<'de> for MapVisitor<K, V, H>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    H: HashingStrategy<K> + Default,
{
    type Value = PackedMap<K, V, H>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an entry count, a load factor, and a sequence of key-value pairs")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let len: u64 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let load_factor: f64 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        if !(load_factor > 0.0 && load_factor <= 1.0) {
            return Err(de::Error::custom("load factor must be in (0, 1]"));
        }
        let map = seq
            .next_element_seed(EntriesSeed {
                load_factor,
                len: len as usize,
                marker: PhantomData,
            })?
            .ok_or_else(|| de::Error::invalid_length(2, &self))?;
        Ok(map)
    }
}

/// Rebuilds a map from the serialized pair sequence, sized up front from
/// the declared count and load factor.
struct EntriesSeed<K, V, H> {
    load_factor: f64,
    len: usize,
    marker: PhantomData<(K, V, H)>,
}

impl<'de, K, V, H> DeserializeSeed<'de> for EntriesSeed<K, V, H>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    H: HashingStrategy<K> + Default,
{
    type Value = PackedMap<K, V, H>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, K, V, H> Visitor<'de> for EntriesSeed<K, V, H>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    H: HashingStrategy<K> + Default,
{
    type Value = PackedMap<K, V, H>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of key-value pairs")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut map = PackedMap::with_capacity_load_factor_and_strategy(
            self.len,
            self.load_factor,
            H::default(),
        );
        while let Some((key, value)) = seq.next_element::<(K, V)>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use crate::PackedMap;
    use crate::strategy::HashingStrategy;

    #[test]
    fn test_round_trip_reproduces_pairs() {
        let mut map = PackedMap::new();
        for i in 0..100 {
            map.insert(i, format!("value_{i}"));
        }

        let encoded = serde_json::to_string(&map).unwrap();
        let decoded: PackedMap<i32, String> = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, map);
        assert_eq!(decoded.load_factor(), map.load_factor());
    }

    #[test]
    fn test_round_trip_is_layout_independent() {
        let mut forward = PackedMap::new();
        let mut backward = PackedMap::new();
        for i in 0..50 {
            forward.insert(i, i * 2);
        }
        for i in (0..50).rev() {
            backward.insert(i, i * 2);
        }

        let decoded_forward: PackedMap<i32, i32> =
            serde_json::from_str(&serde_json::to_string(&forward).unwrap()).unwrap();
        let decoded_backward: PackedMap<i32, i32> =
            serde_json::from_str(&serde_json::to_string(&backward).unwrap()).unwrap();

        assert_eq!(decoded_forward, decoded_backward);
    }

    #[test]
    fn test_round_trip_preserves_load_factor_and_sizing() {
        let mut map = PackedMap::with_capacity_and_load_factor(0, 0.5);
        for i in 0..20 {
            map.insert(i, i);
        }

        let decoded: PackedMap<i32, i32> =
            serde_json::from_str(&serde_json::to_string(&map).unwrap()).unwrap();

        assert_eq!(decoded.load_factor(), 0.5);
        assert_eq!(decoded.len(), 20);
        // Sized from the declared count, so no rehash happened on rebuild.
        assert!(decoded.capacity() >= 40);
    }

    #[test]
    fn test_round_trip_under_pluggable_strategy() {
        #[derive(Default)]
        struct FirstByte;

        impl HashingStrategy<String> for FirstByte {
            fn hash_key(&self, key: &String) -> u64 {
                key.bytes().next().unwrap_or(0) as u64
            }

            fn eq_keys(&self, a: &String, b: &String) -> bool {
                a == b
            }
        }

        let mut map: PackedMap<String, i32, FirstByte> = PackedMap::default();
        // Shared first byte, so everything collides into one chain.
        for i in 0..10 {
            map.insert(format!("k{i}"), i);
        }

        let decoded: PackedMap<String, i32, FirstByte> =
            serde_json::from_str(&serde_json::to_string(&map).unwrap()).unwrap();
        assert_eq!(decoded, map);
    }

    #[test]
    fn test_empty_map_round_trip() {
        let map: PackedMap<i32, i32> = PackedMap::new();
        let decoded: PackedMap<i32, i32> =
            serde_json::from_str(&serde_json::to_string(&map).unwrap()).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_invalid_load_factor_rejected() {
        let result: Result<PackedMap<i32, i32>, _> = serde_json::from_str("[0,1.5,[]]");
        assert!(result.is_err());
    }
}
