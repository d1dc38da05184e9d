//! Minimum-candidate backfill from the original pool.

use crate::config::Limits;
use crate::lookup::ProductRecord;

/// Tops up a short ranked list from the pool, in pool order, until
/// `min_candidates` entries are reached or the pool is exhausted.
///
/// Never truncates a list that already meets the minimum and never grows
/// past `max_candidates`. Only meaningful in the pool-backed path; direct
/// estimation has no backfill source.
pub(crate) fn backfill(
    mut ranked: Vec<ProductRecord>,
    pool: &[ProductRecord],
    limits: Limits,
) -> Vec<ProductRecord> {
    if ranked.len() >= limits.min_candidates {
        return ranked;
    }

    for record in pool {
        if ranked.len() >= limits.min_candidates || ranked.len() >= limits.max_candidates {
            break;
        }

        if !ranked.iter().any(|r| r.code_number == record.code_number) {
            ranked.push(record.clone());
        }
    }

    ranked
}
