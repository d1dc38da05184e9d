//! JANCODE LOOKUP product-search integration.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use client::{JancodeLookupClient, ProductLookup};
pub use error::LookupError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockProductLookup;
pub use model::{ProductRecord, SearchPage};

/// Minimum digits the lookup provider accepts for a code query.
pub const MIN_CODE_QUERY_LEN: usize = 7;
