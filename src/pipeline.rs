//! Request-to-prediction pipeline
//!
//! Encoder -> Aligner -> Scaling -> Invoker over one shared, immutable
//! [`ModelBundle`]. Each run is independent; nothing is carried between
//! requests.

use crate::error::PipelineResult;
use crate::feature_aligner::FeatureAligner;
use crate::feature_encoder::FeatureEncoder;
use crate::models::inference::invoke;
use crate::models::loader::ModelBundle;
use crate::models::scaler;
use crate::types::input::RawInput;
use crate::types::prediction::PredictionResult;
use std::sync::Arc;
use tracing::debug;

pub struct PredictionPipeline {
    bundle: Arc<ModelBundle>,
    encoder: FeatureEncoder,
    aligner: FeatureAligner,
}

impl PredictionPipeline {
    pub fn new(bundle: Arc<ModelBundle>) -> Self {
        Self {
            bundle,
            encoder: FeatureEncoder::new(),
            aligner: FeatureAligner::new(),
        }
    }

    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }

    /// Run one record through the whole pipeline
    pub fn predict(&self, input: &RawInput) -> PipelineResult<PredictionResult> {
        let encoded = self.encoder.encode(input);
        let features = self
            .aligner
            .align(&encoded, &self.bundle.metadata().feature_names);

        let row = scaler::apply(self.bundle.scaler(), &features)?;
        let prediction = invoke(self.bundle.predictor(), &row, self.bundle.kind())?;

        debug!(
            prediction = %prediction.display(),
            features = features.len(),
            "Pipeline run complete"
        );

        Ok(PredictionResult {
            prediction,
            features,
        })
    }
}
