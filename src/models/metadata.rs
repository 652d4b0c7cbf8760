//! Training-time model descriptor

use crate::types::prediction::ModelKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Metric whose presence marks a classification model
pub const CLASSIFICATION_METRIC: &str = "accuracy";

/// Metadata written next to the trained model.
///
/// `feature_names` is the authoritative column set and order. Any other
/// top-level keys are kept verbatim for the model-info display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    #[serde(deserialize_with = "deserialize_names", serialize_with = "serialize_names")]
    pub feature_names: Arc<[String]>,

    /// Evaluation metrics (name -> value)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<BTreeMap<String, Value>>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn deserialize_names<'de, D>(deserializer: D) -> Result<Arc<[String]>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    if names.is_empty() {
        return Err(serde::de::Error::custom("feature_names must not be empty"));
    }
    Ok(names.into())
}

fn serialize_names<S>(names: &Arc<[String]>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(names.iter())
}

impl ModelMetadata {
    pub fn new(feature_names: Vec<String>) -> Self {
        Self {
            feature_names: feature_names.into(),
            metrics: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_metric(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.metrics
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_string(), value.into());
        self
    }

    /// Parse a metadata document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Classification iff the metrics record an accuracy score
    pub fn kind(&self) -> ModelKind {
        match &self.metrics {
            Some(metrics) if metrics.contains_key(CLASSIFICATION_METRIC) => {
                ModelKind::Classification
            }
            _ => ModelKind::Regression,
        }
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    /// Whole descriptor as JSON, for display
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regression_metadata() {
        let json = r#"{
            "model_name": "GradientBoostingRegressor",
            "feature_names": ["tenure", "gender_Male"],
            "metrics": {"r2": 0.81, "rmse": 12.4}
        }"#;

        let metadata = ModelMetadata::from_json(json).unwrap();
        assert_eq!(metadata.kind(), ModelKind::Regression);
        assert_eq!(metadata.feature_count(), 2);
        assert_eq!(metadata.extra["model_name"], "GradientBoostingRegressor");
    }

    #[test]
    fn test_classification_metadata() {
        let json = r#"{"feature_names": ["tenure"], "metrics": {"accuracy": 0.79}}"#;
        let metadata = ModelMetadata::from_json(json).unwrap();
        assert_eq!(metadata.kind(), ModelKind::Classification);
    }

    #[test]
    fn test_metrics_are_optional() {
        let metadata = ModelMetadata::from_json(r#"{"feature_names": ["tenure"]}"#).unwrap();
        assert!(metadata.metrics.is_none());
        assert_eq!(metadata.kind(), ModelKind::Regression);
    }

    #[test]
    fn test_malformed_metadata_is_rejected() {
        assert!(ModelMetadata::from_json(r#"{"metrics": {"accuracy": 0.9}}"#).is_err());
        assert!(ModelMetadata::from_json(r#"{"feature_names": []}"#).is_err());
        assert!(ModelMetadata::from_json(r#"{"feature_names": "tenure"}"#).is_err());
        assert!(ModelMetadata::from_json("not json").is_err());
    }

    #[test]
    fn test_display_round_trip_keeps_extra_keys() {
        let metadata = ModelMetadata::new(vec!["tenure".to_string()])
            .with_metric("accuracy", 0.8);
        let json = metadata.to_json();

        assert_eq!(json["feature_names"][0], "tenure");
        assert_eq!(json["metrics"]["accuracy"], 0.8);
    }
}
