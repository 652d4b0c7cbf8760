//! Fitted feature scalers and the scaling stage

use crate::error::{PipelineResult, PredictorError};
use crate::feature_aligner::AlignedVector;
use serde::{Deserialize, Serialize};

/// A deterministic numeric transform fitted at training time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scaler {
    /// `(x - mean) / scale`
    Standard {
        #[serde(alias = "mean_")]
        mean: Vec<f64>,
        #[serde(alias = "scale_")]
        scale: Vec<f64>,
    },
    /// `x * scale + min`
    MinMax {
        #[serde(alias = "min_")]
        min: Vec<f64>,
        #[serde(alias = "scale_")]
        scale: Vec<f64>,
    },
}

impl Scaler {
    /// Parse and validate a scaler document
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let scaler: Scaler = serde_json::from_str(json)?;
        scaler.validate()?;
        Ok(scaler)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let (offsets, scale) = match self {
            Scaler::Standard { mean, scale } => (mean, scale),
            Scaler::MinMax { min, scale } => (min, scale),
        };

        if offsets.is_empty() {
            anyhow::bail!("scaler has no fitted parameters");
        }
        if offsets.len() != scale.len() {
            anyhow::bail!(
                "scaler parameter lengths disagree ({} offsets, {} scales)",
                offsets.len(),
                scale.len()
            );
        }
        Ok(())
    }

    /// Number of features the scaler was fitted on
    pub fn n_features(&self) -> usize {
        match self {
            Scaler::Standard { scale, .. } | Scaler::MinMax { scale, .. } => scale.len(),
        }
    }

    /// Transform one row; fails if its width differs from the fitted width.
    pub fn transform(&self, row: &[f32]) -> PipelineResult<Vec<f32>> {
        if row.len() != self.n_features() {
            return Err(PredictorError::FeatureShape {
                expected: self.n_features(),
                actual: row.len(),
            });
        }

        let scaled = match self {
            Scaler::Standard { mean, scale } => row
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(&x, (&m, &s))| {
                    let s = if s == 0.0 { 1.0 } else { s };
                    ((x as f64 - m) / s) as f32
                })
                .collect(),
            Scaler::MinMax { min, scale } => row
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(&x, (&m, &s))| (x as f64 * s + m) as f32)
                .collect(),
        };

        Ok(scaled)
    }
}

/// Scaling stage: apply the scaler if one was loaded, otherwise pass the
/// aligned values through unchanged.
pub fn apply(scaler: Option<&Scaler>, aligned: &AlignedVector) -> PipelineResult<Vec<f32>> {
    match scaler {
        Some(scaler) => scaler.transform(aligned.values()),
        None => Ok(aligned.values().to_vec()),
    }
}
