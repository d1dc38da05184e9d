use serde::Deserialize;
use std::time::Duration;

use super::error::LookupError;
use super::model::{ProductRecord, SearchPage};
use super::MIN_CODE_QUERY_LEN;

/// Product-lookup capability.
///
/// One production implementation ([`JancodeLookupClient`]) and one mock
/// (`MockProductLookup`, behind the `mock` feature).
pub trait ProductLookup: Send + Sync {
    /// Searches products by free-text keyword. The adapter caps the number
    /// of returned records regardless of provider-side limits.
    fn search_by_keyword(
        &self,
        keyword: &str,
    ) -> impl std::future::Future<Output = Result<SearchPage, LookupError>> + Send;

    /// Looks up a single product by its (partial or full) code number.
    fn search_by_code(
        &self,
        code: &str,
    ) -> impl std::future::Future<Output = Result<Option<ProductRecord>, LookupError>> + Send;
}

/// Raw provider response envelope.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    info: LookupInfo,
    #[serde(default)]
    product: Vec<RawProduct>,
}

#[derive(Debug, Default, Deserialize)]
struct LookupInfo {
    #[serde(default)]
    count: u64,
}

/// Like [`ProductRecord`] but tolerating entries without a code number,
/// which the provider occasionally emits and we drop.
#[derive(Debug, Deserialize)]
struct RawProduct {
    #[serde(default, rename = "codeNumber")]
    code_number: Option<String>,
    #[serde(flatten)]
    rest: serde_json::Value,
}

/// HTTP client for the JANCODE LOOKUP API.
#[derive(Clone)]
pub struct JancodeLookupClient {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
    max_results: usize,
}

impl JancodeLookupClient {
    /// Creates a client for `base_url` with a per-request `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        app_id: impl Into<String>,
        max_results: usize,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Unavailable {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            app_id: app_id.into(),
            max_results,
        })
    }

    async fn query(&self, query: &str, query_type: &str) -> Result<LookupResponse, LookupError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("appId", self.app_id.as_str()),
                ("query", query),
                ("hits", &self.max_results.to_string()),
                ("page", "1"),
                ("type", query_type),
            ])
            .send()
            .await
            .map_err(|e| LookupError::Unavailable {
                message: e.to_string(),
            })?
            .error_for_status()
            .map_err(|e| LookupError::Unavailable {
                message: e.to_string(),
            })?;

        response
            .json::<LookupResponse>()
            .await
            .map_err(|e| LookupError::MalformedResponse {
                message: e.to_string(),
            })
    }

    fn into_records(&self, raw: Vec<RawProduct>) -> Vec<ProductRecord> {
        raw.into_iter()
            .filter_map(|p| {
                let code_number = p.code_number.filter(|c| !c.is_empty())?;
                let mut value = p.rest;

                if let Some(map) = value.as_object_mut() {
                    map.insert("codeNumber".to_string(), code_number.into());
                }

                match serde_json::from_value::<ProductRecord>(value) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!(error = %e, "dropping unparseable product entry");
                        None
                    }
                }
            })
            .take(self.max_results)
            .collect()
    }
}

impl ProductLookup for JancodeLookupClient {
    async fn search_by_keyword(&self, keyword: &str) -> Result<SearchPage, LookupError> {
        let raw = self.query(keyword, "keyword").await?;
        let count = raw.info.count;
        let products = self.into_records(raw.product);

        tracing::debug!(keyword, count, returned = products.len(), "keyword search");

        Ok(SearchPage { count, products })
    }

    async fn search_by_code(&self, code: &str) -> Result<Option<ProductRecord>, LookupError> {
        if code.len() < MIN_CODE_QUERY_LEN {
            return Err(LookupError::InvalidQuery {
                query: code.to_string(),
                reason: "code queries need at least 7 digits",
            });
        }

        let raw = self.query(code, "code").await?;
        Ok(self.into_records(raw.product).into_iter().next())
    }
}
