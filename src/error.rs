//! Error taxonomy for the prediction pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Boxed underlying cause attached to pipeline errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used across the library.
pub type PipelineResult<T> = Result<T, PredictorError>;

/// Which of the three model artifacts failed to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Model,
    Scaler,
    Metadata,
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Artifact::Model => "model",
            Artifact::Scaler => "scaler",
            Artifact::Metadata => "metadata",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by the prediction front-end.
///
/// Artifact errors are fatal to the session; the others are fatal only to
/// the request that raised them. Nothing here is retried.
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("failed to load {artifact} artifact from {}", .path.display())]
    ArtifactLoad {
        artifact: Artifact,
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("feature shape mismatch: scaler expects {expected} features, got {actual}")]
    FeatureShape { expected: usize, actual: usize },

    #[error("predictor rejected the feature vector")]
    PredictorInvocation {
        #[source]
        source: BoxError,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl PredictorError {
    pub fn artifact_load(
        artifact: Artifact,
        path: impl Into<PathBuf>,
        source: impl Into<BoxError>,
    ) -> Self {
        PredictorError::ArtifactLoad {
            artifact,
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn predictor_invocation(source: impl Into<BoxError>) -> Self {
        PredictorError::PredictorInvocation {
            source: source.into(),
        }
    }

    /// Short machine-readable kind, used for metrics and error envelopes
    pub fn kind(&self) -> &'static str {
        match self {
            PredictorError::ArtifactLoad { .. } => "artifact_load",
            PredictorError::FeatureShape { .. } => "feature_shape",
            PredictorError::PredictorInvocation { .. } => "predictor_invocation",
            PredictorError::InvalidInput(_) => "invalid_input",
        }
    }

    /// Message shown to the user, including the full cause chain.
    pub fn user_message(&self) -> String {
        let mut message = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            message.push_str(": ");
            message.push_str(&err.to_string());
            cause = std::error::Error::source(err);
        }

        if let PredictorError::ArtifactLoad { path, .. } = self {
            let dir = path
                .parent()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ".".to_string());
            message.push_str(&format!(
                ". Make sure the model files are present in the '{}' directory",
                dir
            ));
        }

        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_includes_cause_and_guidance() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = PredictorError::artifact_load(Artifact::Metadata, "models/info.json", io);

        let message = err.user_message();
        assert!(message.contains("metadata artifact"));
        assert!(message.contains("no such file"));
        assert!(message.contains("'models' directory"));
        assert_eq!(err.kind(), "artifact_load");
    }

    #[test]
    fn test_feature_shape_message() {
        let err = PredictorError::FeatureShape {
            expected: 10,
            actual: 8,
        };
        assert_eq!(
            err.user_message(),
            "feature shape mismatch: scaler expects 10 features, got 8"
        );
    }

    #[test]
    fn test_predictor_invocation_keeps_source() {
        let err = PredictorError::predictor_invocation(anyhow::anyhow!("expected 4 columns"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.user_message().ends_with("expected 4 columns"));
    }
}
