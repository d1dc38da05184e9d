use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::lookup::ProductRecord;

/// Inbound estimation request, one per HTTP call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationRequest {
    pub product_name: String,
    pub product_image_url: String,
}

/// Final estimation response.
///
/// Invariants: `candidates` carries no duplicate code numbers, at most 5
/// entries, and at least 3 whenever the candidate sources yielded 3 distinct
/// codes; `jancode` mirrors `candidates[0]` when any candidate exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimationResult {
    /// Top-ranked candidate's code number, absent when no candidate exists.
    pub jancode: Option<String>,

    pub candidates: Vec<ProductRecord>,

    /// Confidence of the primary pick, in [0, 1].
    pub confidence: f64,

    /// Item name of the primary candidate when known, otherwise the
    /// requested product name.
    pub product_name: Option<String>,

    /// Human-readable status line from a fixed template set.
    pub message: String,

    /// Keywords actually used for the fan-out search.
    #[serde(default, rename = "usedKeywords")]
    pub used_keywords: Vec<String>,

    /// Provider-reported hit count per keyword (0 for failed searches).
    #[serde(default, rename = "keywordHits")]
    pub keyword_hits: HashMap<String, u64>,
}
