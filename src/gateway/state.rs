use std::sync::Arc;

use crate::lookup::ProductLookup;
use crate::pipeline::Estimator;
use crate::vision::VisionModel;

/// Shared handler state: the estimator behind an `Arc`, generic over the
/// two capability adapters so tests can swap in mocks.
pub struct AppState<V: VisionModel, L: ProductLookup> {
    pub estimator: Arc<Estimator<V, L>>,
}

impl<V: VisionModel, L: ProductLookup> AppState<V, L> {
    pub fn new(estimator: Estimator<V, L>) -> Self {
        Self {
            estimator: Arc::new(estimator),
        }
    }
}

// Manual impl: cloning the state must not require V/L to be Clone.
impl<V: VisionModel, L: ProductLookup> Clone for AppState<V, L> {
    fn clone(&self) -> Self {
        Self {
            estimator: Arc::clone(&self.estimator),
        }
    }
}
