use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::client::ProductLookup;
use super::error::LookupError;
use super::model::{ProductRecord, SearchPage};

/// Deterministic in-memory lookup for tests.
///
/// Keyword results are returned in insertion order and capped at
/// `max_results` like the real adapter. Individual keywords can be marked
/// as failing or slow to exercise the aggregator's degraded paths.
pub struct MockProductLookup {
    by_keyword: HashMap<String, Vec<ProductRecord>>,
    by_code: HashMap<String, ProductRecord>,
    failing_keywords: Vec<String>,
    delay: Option<Duration>,
    max_results: usize,
    calls: Mutex<Vec<String>>,
}

impl Default for MockProductLookup {
    fn default() -> Self {
        Self {
            by_keyword: HashMap::new(),
            by_code: HashMap::new(),
            failing_keywords: Vec::new(),
            delay: None,
            max_results: 3,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockProductLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers keyword results (also indexed by code for `search_by_code`).
    pub fn with_keyword(mut self, keyword: &str, records: Vec<ProductRecord>) -> Self {
        for record in &records {
            self.by_code
                .entry(record.code_number.clone())
                .or_insert_with(|| record.clone());
        }
        self.by_keyword.insert(keyword.to_string(), records);
        self
    }

    /// Makes `search_by_keyword(keyword)` return `Unavailable`.
    pub fn with_failing_keyword(mut self, keyword: &str) -> Self {
        self.failing_keywords.push(keyword.to_string());
        self
    }

    /// Adds an artificial delay before every answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Keywords queried so far, in call order.
    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().expect("mock lock").clone()
    }
}

// Arc delegation lets tests keep a handle for call-order assertions after
// handing the mock to an estimator.
impl ProductLookup for std::sync::Arc<MockProductLookup> {
    async fn search_by_keyword(&self, keyword: &str) -> Result<SearchPage, LookupError> {
        self.as_ref().search_by_keyword(keyword).await
    }

    async fn search_by_code(&self, code: &str) -> Result<Option<ProductRecord>, LookupError> {
        self.as_ref().search_by_code(code).await
    }
}

impl ProductLookup for MockProductLookup {
    async fn search_by_keyword(&self, keyword: &str) -> Result<SearchPage, LookupError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.calls
            .lock()
            .expect("mock lock")
            .push(keyword.to_string());

        if self.failing_keywords.iter().any(|k| k == keyword) {
            return Err(LookupError::Unavailable {
                message: format!("mock failure for keyword '{keyword}'"),
            });
        }

        let mut products = self.by_keyword.get(keyword).cloned().unwrap_or_default();
        let count = products.len() as u64;
        products.truncate(self.max_results);

        Ok(SearchPage { count, products })
    }

    async fn search_by_code(&self, code: &str) -> Result<Option<ProductRecord>, LookupError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        Ok(self.by_code.get(code).cloned())
    }
}
