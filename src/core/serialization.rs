use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::hash::Hash;

// HashMaps with non-string keys don't serialize to JSON maps; ship them as
// sequences of pairs instead.

pub fn serialize<K, V, S>(map: &HashMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    K: Serialize,
    V: Serialize,
    S: Serializer,
{
    serializer.collect_seq(map.iter())
}

pub fn deserialize<'de, K, V, D>(deserializer: D) -> Result<HashMap<K, V>, D::Error>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de>,
    D: Deserializer<'de>,
{
    let pairs: Vec<(K, V)> = Vec::deserialize(deserializer)?;
    Ok(pairs.into_iter().collect())
}

use crate::core::piece::PieceKind;
use crate::core::PlayerId;

pub fn serialize_reserves<S>(
    reserves: &HashMap<PlayerId, HashMap<PieceKind, usize>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let pairs: Vec<(PlayerId, Vec<(PieceKind, usize)>)> = reserves
        .iter()
        .map(|(player, reserve)| (*player, reserve.iter().map(|(k, c)| (*k, *c)).collect()))
        .collect();
    pairs.serialize(serializer)
}

pub fn deserialize_reserves<'de, D>(
    deserializer: D,
) -> Result<HashMap<PlayerId, HashMap<PieceKind, usize>>, D::Error>
where
    D: Deserializer<'de>,
{
    let pairs: Vec<(PlayerId, Vec<(PieceKind, usize)>)> = Vec::deserialize(deserializer)?;
    Ok(pairs
        .into_iter()
        .map(|(player, reserve)| (player, reserve.into_iter().collect()))
        .collect())
}
