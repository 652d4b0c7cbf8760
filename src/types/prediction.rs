//! Prediction values and results

use crate::feature_aligner::AlignedVector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a model's output should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Regression,
    Classification,
}

/// A single raw value produced by a predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl OutputValue {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OutputValue::Int(v) => Some(*v as f64),
            OutputValue::Float(v) => Some(*v),
            OutputValue::Text(_) => None,
        }
    }
}

impl fmt::Display for OutputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputValue::Int(v) => write!(f, "{}", v),
            // keeps the fractional part of whole floats: 1.0 prints as "1.0"
            OutputValue::Float(v) => write!(f, "{:?}", v),
            OutputValue::Text(v) => f.write_str(v),
        }
    }
}

/// Interpreted model output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Prediction {
    /// Continuous value from a regression model
    Regression(f64),
    /// Class label from a classifier, kept exactly as produced
    Classification(OutputValue),
}

impl Prediction {
    pub fn kind(&self) -> ModelKind {
        match self {
            Prediction::Regression(_) => ModelKind::Regression,
            Prediction::Classification(_) => ModelKind::Classification,
        }
    }

    /// Render for display: labels as-is, regression values to two decimals
    pub fn display(&self) -> String {
        match self {
            Prediction::Regression(value) => format!("{:.2}", value),
            Prediction::Classification(label) => label.to_string(),
        }
    }
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub prediction: Prediction,
    /// Aligned (pre-scaling) feature vector that produced the prediction
    pub features: AlignedVector,
}
