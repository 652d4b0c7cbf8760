//! Response envelopes written back to the form collaborator

use crate::error::PredictorError;
use crate::types::prediction::{ModelKind, Prediction, PredictionResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One named, processed feature value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureValue {
    pub name: String,
    pub value: f32,
}

/// Successful prediction response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Unique response identifier
    pub request_id: String,

    /// Response generation timestamp
    pub timestamp: DateTime<Utc>,

    pub kind: ModelKind,

    pub prediction: Prediction,

    /// Human-readable rendering of the prediction
    pub display: String,

    /// Processed input, in model column order
    pub features: Vec<FeatureValue>,
}

impl PredictionResponse {
    pub fn new(result: &PredictionResult) -> Self {
        let features = result
            .features
            .named()
            .map(|(name, value)| FeatureValue {
                name: name.to_string(),
                value,
            })
            .collect();

        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            kind: result.prediction.kind(),
            prediction: result.prediction.clone(),
            display: result.prediction.display(),
            features,
        }
    }
}

/// Failed request response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    /// Error kind (`invalid_input`, `feature_shape`, ...)
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(err: &PredictorError) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            error: err.kind().to_string(),
            message: err.user_message(),
        }
    }
}
