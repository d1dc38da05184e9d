//! Janlens library crate (used by the server and integration tests).
//!
//! Estimates a product's GTIN-13 ("JAN") code from a product name and a
//! product image URL by combining a generative vision model with a
//! product-lookup search API.
//!
//! # Public API Surface
//!
//! - [`Config`], [`Limits`], [`ConfigError`] - Server configuration
//! - [`jancode`] - GTIN-13 validation/normalization (pure functions)
//! - [`VisionModel`], [`OpenAiVisionModel`] - Generative-model adapter
//! - [`ProductLookup`], [`JancodeLookupClient`], [`ProductRecord`] - Lookup adapter
//! - [`Estimator`], [`EstimationRequest`], [`EstimationResult`] - Pipeline
//! - [`gateway`] - Axum router and handlers
//!
//! Mock adapters are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod gateway;
pub mod jancode;
pub mod lookup;
pub mod pipeline;
pub mod vision;

pub use config::{Config, ConfigError, Limits};
pub use gateway::{AppState, ESTIMATE_PATH, GatewayError, create_router_with_state};
pub use jancode::JanCodeError;
pub use lookup::{JancodeLookupClient, LookupError, ProductLookup, ProductRecord, SearchPage};
#[cfg(any(test, feature = "mock"))]
pub use lookup::MockProductLookup;
pub use pipeline::{
    ESTIMATED_CONFIDENCE, EstimationRequest, EstimationResult, Estimator, UNFILTERED_CONFIDENCE,
};
#[cfg(any(test, feature = "mock"))]
pub use vision::MockVisionModel;
pub use vision::{FilterVerdict, OpenAiVisionModel, VisionError, VisionModel};
