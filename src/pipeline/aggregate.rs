//! Keyword fan-out and candidate pool construction.

use futures_util::future;
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

use crate::lookup::{ProductLookup, ProductRecord, SearchPage};

/// Deduplicated candidate pool plus per-keyword bookkeeping.
#[derive(Debug, Default)]
pub(crate) struct Aggregation {
    /// Unique-by-code records in first-seen order (keyword order, then
    /// within-keyword result order).
    pub pool: Vec<ProductRecord>,

    /// Provider hit count per keyword; failed or timed-out searches count 0.
    pub keyword_hits: HashMap<String, u64>,
}

/// Fans out one search per keyword, concurrently, then merges results back
/// in keyword order so the pool is deterministic regardless of which call
/// finishes first.
///
/// A failed or timed-out keyword contributes zero records; it never aborts
/// the aggregation.
pub(crate) async fn collect_candidates<L: ProductLookup>(
    lookup: &L,
    keywords: &[String],
    search_timeout: Duration,
) -> Aggregation {
    let searches = keywords.iter().map(|keyword| async move {
        match tokio::time::timeout(search_timeout, lookup.search_by_keyword(keyword)).await {
            Ok(Ok(page)) => Some(page),
            Ok(Err(e)) => {
                warn!(keyword, error = %e, "keyword search failed, skipping");
                None
            }
            Err(_) => {
                warn!(keyword, "keyword search timed out, skipping");
                None
            }
        }
    });

    // join_all yields results in input order, independent of completion order.
    let pages = future::join_all(searches).await;

    let mut aggregation = Aggregation::default();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (keyword, page) in keywords.iter().zip(pages) {
        let page = page.unwrap_or_else(SearchPage::default);
        aggregation
            .keyword_hits
            .insert(keyword.clone(), page.count);

        for mut record in page.products {
            match positions.get(&record.code_number) {
                // Dedup by exact code string; first-seen wins, later
                // keywords only extend the searchKeyword annotation.
                Some(&pos) => {
                    annotate_keyword(&mut aggregation.pool[pos], keyword);
                }
                None => {
                    record.search_keyword = Some(keyword.clone());
                    positions.insert(record.code_number.clone(), aggregation.pool.len());
                    aggregation.pool.push(record);
                }
            }
        }
    }

    aggregation
}

/// Appends `keyword` to the record's comma-joined keyword annotation,
/// unless already listed.
fn annotate_keyword(record: &mut ProductRecord, keyword: &str) {
    match &mut record.search_keyword {
        Some(existing) => {
            if !existing.split(", ").any(|k| k == keyword) {
                existing.push_str(", ");
                existing.push_str(keyword);
            }
        }
        None => record.search_keyword = Some(keyword.to_string()),
    }
}
