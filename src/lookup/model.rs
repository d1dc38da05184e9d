//! Wire model for product records.

use serde::{Deserialize, Serialize};

/// A single product entry as returned by the lookup provider.
///
/// Field names follow the provider's JSON verbatim. `code_number` is the
/// identity key for deduplication (exact string match, no normalization);
/// everything else is optional metadata passed through to the response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub code_number: String,
    #[serde(default)]
    pub code_type: Option<String>,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub item_model: Option<String>,
    #[serde(default)]
    pub item_url: Option<String>,
    #[serde(default)]
    pub item_image_url: Option<String>,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub maker_name: Option<String>,
    #[serde(default)]
    pub maker_name_kana: Option<String>,
    /// Opaque provider payload, passed through unmodified. The provider
    /// spells this field with a leading capital.
    #[serde(default, rename = "ProductDetails")]
    pub product_details: Option<serde_json::Value>,
    /// Comma-joined list of the search keywords that surfaced this record.
    /// Populated during aggregation, never by the provider.
    #[serde(default)]
    pub search_keyword: Option<String>,
}

impl ProductRecord {
    /// A record carrying only a code number, used for direct-estimation
    /// guesses that have no lookup grounding.
    pub fn synthetic(code_number: impl Into<String>) -> Self {
        Self {
            code_number: code_number.into(),
            code_type: None,
            item_name: None,
            item_model: None,
            item_url: None,
            item_image_url: None,
            brand_name: None,
            maker_name: None,
            maker_name_kana: None,
            product_details: None,
            search_keyword: None,
        }
    }
}

/// One page of keyword-search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    /// Provider-reported total hit count for the query (may exceed
    /// `products.len()`).
    pub count: u64,

    /// The returned records, capped by the adapter.
    pub products: Vec<ProductRecord>,
}
