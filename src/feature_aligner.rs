//! Alignment of encoded records against the training-time feature schema.
//!
//! The predictor only sees positions, never names, so the aligned vector
//! must follow `feature_names` exactly: same length, same order.

use crate::feature_encoder::EncodedVector;
use std::sync::Arc;
use tracing::debug;

/// Dense feature vector in model column order.
///
/// Invariant: `values.len() == names.len()` and `values[i]` belongs to
/// `names[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedVector {
    names: Arc<[String]>,
    values: Vec<f32>,
}

impl AlignedVector {
    pub(crate) fn new(names: Arc<[String]>, values: Vec<f32>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// `(column, value)` pairs in model order
    pub fn named(&self) -> impl Iterator<Item = (&str, f32)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<f32> {
        self.values
    }
}

/// Reconciles encoded columns with the model's expected feature names.
pub struct FeatureAligner;

impl FeatureAligner {
    pub fn new() -> Self {
        Self
    }

    /// Align an encoded record to `feature_names`.
    ///
    /// Expected columns missing from the encoding are zero-filled; encoded
    /// columns the model does not know are dropped. Never fails.
    pub fn align(&self, encoded: &EncodedVector, feature_names: &Arc<[String]>) -> AlignedVector {
        let mut zero_filled = Vec::new();

        let values: Vec<f32> = feature_names
            .iter()
            .map(|name| {
                encoded.get(name).unwrap_or_else(|| {
                    zero_filled.push(name.as_str());
                    0.0
                })
            })
            .collect();

        let dropped: Vec<&str> = encoded
            .names()
            .filter(|name| !feature_names.iter().any(|expected| expected == name))
            .collect();

        if !dropped.is_empty() {
            debug!(
                dropped = ?dropped,
                "Encoded columns not present in model schema were dropped"
            );
        }
        debug!(
            expected = feature_names.len(),
            zero_filled = ?zero_filled,
            "Features aligned to model schema"
        );

        AlignedVector::new(Arc::clone(feature_names), values)
    }
}

impl Default for FeatureAligner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_encoder::FeatureEncoder;
    use crate::types::input::{Contract, Gender, RawInput};

    fn schema(names: &[&str]) -> Arc<[String]> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_zero_fill_and_order() {
        let feature_names = schema(&["tenure", "gender_Male", "gender_Female", "Contract_One year"]);
        let input = RawInput {
            gender: Gender::Female,
            contract: Contract::MonthToMonth,
            tenure: 12,
            ..RawInput::default()
        };

        let encoded = FeatureEncoder::new().encode(&input);
        let aligned = FeatureAligner::new().align(&encoded, &feature_names);

        assert_eq!(aligned.values(), &[12.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_length_and_names_follow_schema() {
        let feature_names = schema(&[
            "StreamingTV_Yes",
            "Partner_No",
            "tenure",
            "PaymentMethod_Mailed check",
            "SeniorCitizen",
            "gender_Male",
        ]);
        let encoded = FeatureEncoder::new().encode(&RawInput::default());
        let aligned = FeatureAligner::new().align(&encoded, &feature_names);

        assert_eq!(aligned.len(), feature_names.len());
        for (i, (name, _)) in aligned.named().enumerate() {
            assert_eq!(name, feature_names[i]);
        }
        assert_eq!(aligned.values(), &[1.0, 0.0, 12.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unknown_columns_are_dropped() {
        // Contract_Month-to-month was the reference category at training time
        let feature_names = schema(&["tenure", "Contract_One year", "Contract_Two year"]);
        let encoded = FeatureEncoder::new().encode(&RawInput::default());
        let aligned = FeatureAligner::new().align(&encoded, &feature_names);

        assert_eq!(aligned.values(), &[12.0, 0.0, 0.0]);
        assert!(aligned.names().iter().all(|n| n != "Contract_Month-to-month"));
    }

    #[test]
    fn test_empty_schema_yields_empty_vector() {
        let encoded = FeatureEncoder::new().encode(&RawInput::default());
        let aligned = FeatureAligner::new().align(&encoded, &schema(&[]));
        assert!(aligned.is_empty());
    }
}
