use std::collections::HashSet;

use crate::error::RankingPayloadError;
use serde_json::Value;

/// Rank domain: positive smallint.
pub const MIN_RANK: i64 = 1;
pub const MAX_RANK: i64 = i16::MAX as i64;

fn to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/**
 * Validate a batch ranking-update body and produce the write set.
 *
 * Checks, in order, each failing the whole batch: well-formed JSON, a
 * `rankings` array, per-entry `user_id` presence and integer-ness, rank
 * integer-ness and range, and batch-wide uniqueness of non-null ranks
 * (uniqueness is judged on the submitted entries only, before
 * deduplication, and independently of rows not named in the batch).
 *
 * # Arguments
 * @param body: &[u8] - The raw request body
 *
 * # Returns
 * @return Result<Vec<(i32, Option<i16>)>, RankingPayloadError> - (user_id, rank)
 *         pairs deduplicated by user_id, last occurrence winning
 */
pub fn parse_rankings_payload(body: &[u8]) -> Result<Vec<(i32, Option<i16>)>, RankingPayloadError> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|_| RankingPayloadError::BadJson)?;
    let rankings = payload
        .get("rankings")
        .and_then(Value::as_array)
        .ok_or(RankingPayloadError::RankingsArrayRequired)?;

    let mut rank_values: Vec<i16> = Vec::new();
    let mut write_set: Vec<(i32, Option<i16>)> = Vec::with_capacity(rankings.len());
    for entry in rankings {
        let user_id_value = entry
            .as_object()
            .and_then(|map| map.get("user_id"))
            .ok_or(RankingPayloadError::EntryMissingUserId)?;
        let user_id = to_integer(user_id_value)
            .and_then(|id| i32::try_from(id).ok())
            .ok_or(RankingPayloadError::InvalidUserId)?;

        let rank = match entry.get("rank") {
            None | Some(Value::Null) => None,
            Some(raw) => {
                let rank = to_integer(raw).ok_or(RankingPayloadError::InvalidRankValue)?;
                if !(MIN_RANK..=MAX_RANK).contains(&rank) {
                    return Err(RankingPayloadError::RankOutOfRange);
                }
                let rank = rank as i16;
                rank_values.push(rank);
                Some(rank)
            }
        };

        // Last occurrence of a user_id wins, keeping its first position.
        if let Some(existing) = write_set.iter_mut().find(|(id, _)| *id == user_id) {
            existing.1 = rank;
        } else {
            write_set.push((user_id, rank));
        }
    }

    let mut seen = HashSet::new();
    for rank in &rank_values {
        if !seen.insert(*rank) {
            return Err(RankingPayloadError::DuplicateRanks);
        }
    }

    Ok(write_set)
}
