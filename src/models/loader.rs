//! Model artifact loading

use crate::config::ModelsConfig;
use crate::error::{Artifact, PipelineResult, PredictorError};
use crate::models::inference::{OnnxPredictor, Predictor};
use crate::models::metadata::ModelMetadata;
use crate::models::scaler::Scaler;
use crate::types::prediction::ModelKind;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

/// Everything a prediction needs from training: the predictor, the optional
/// scaler and the feature schema.
///
/// Loaded once at startup and never mutated afterwards.
pub struct ModelBundle {
    predictor: Box<dyn Predictor>,
    scaler: Option<Scaler>,
    metadata: ModelMetadata,
}

impl ModelBundle {
    /// Assemble a bundle from already loaded parts
    pub fn new(
        predictor: Box<dyn Predictor>,
        scaler: Option<Scaler>,
        metadata: ModelMetadata,
    ) -> Self {
        if let Some(scaler) = &scaler {
            if scaler.n_features() != metadata.feature_count() {
                warn!(
                    scaler_features = scaler.n_features(),
                    schema_features = metadata.feature_count(),
                    "Scaler and metadata disagree on feature count; predictions will fail"
                );
            }
        }

        info!(
            model = %predictor.name(),
            kind = ?metadata.kind(),
            features = metadata.feature_count(),
            scaled = scaler.is_some(),
            "Model bundle ready"
        );

        Self {
            predictor,
            scaler,
            metadata,
        }
    }

    /// Load the three artifacts from the configured models directory.
    ///
    /// The model and metadata are required. A missing scaler file means the
    /// model was trained on unscaled features; a corrupt one is an error.
    pub fn load(config: &ModelsConfig) -> PipelineResult<Self> {
        let metadata = load_metadata(&config.metadata_path())?;
        let scaler = load_scaler(&config.scaler_path())?;

        let model_path = config.model_path();
        if !model_path.exists() {
            return Err(PredictorError::artifact_load(
                Artifact::Model,
                &model_path,
                "model file not found",
            ));
        }
        let predictor = OnnxPredictor::load(
            &model_path,
            config.onnx_threads,
            config.output_name.as_deref(),
        )
        .map_err(|e| PredictorError::artifact_load(Artifact::Model, &model_path, e))?;

        Ok(Self::new(Box::new(predictor), scaler, metadata))
    }

    pub fn predictor(&self) -> &dyn Predictor {
        self.predictor.as_ref()
    }

    pub fn scaler(&self) -> Option<&Scaler> {
        self.scaler.as_ref()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn kind(&self) -> ModelKind {
        self.metadata.kind()
    }

    /// Model descriptor for display
    pub fn model_info(&self) -> serde_json::Value {
        self.metadata.to_json()
    }
}

fn load_metadata(path: &Path) -> PipelineResult<ModelMetadata> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| PredictorError::artifact_load(Artifact::Metadata, path, e))?;

    let metadata = ModelMetadata::from_json(&json)
        .map_err(|e| PredictorError::artifact_load(Artifact::Metadata, path, e))?;

    info!(
        path = %path.display(),
        features = metadata.feature_count(),
        "Metadata loaded"
    );
    Ok(metadata)
}

fn load_scaler(path: &Path) -> PipelineResult<Option<Scaler>> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "No scaler found, using unscaled features");
            return Ok(None);
        }
        Err(e) => return Err(PredictorError::artifact_load(Artifact::Scaler, path, e)),
    };

    let scaler = Scaler::from_json(&json)
        .map_err(|e| PredictorError::artifact_load(Artifact::Scaler, path, e))?;

    info!(path = %path.display(), features = scaler.n_features(), "Scaler loaded");
    Ok(Some(scaler))
}
