//! One-hot feature encoding for model inference.
//!
//! Reproduces the dummy-column expansion applied to the training frame:
//! every categorical field becomes a `{column}_{label}` indicator and
//! `tenure` passes through untouched.

use crate::types::input::{Category, RawInput};

/// Name of the single numeric column
pub const TENURE_COLUMN: &str = "tenure";

/// Sparse encoding of one record: only the observed categories are present.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedVector {
    columns: Vec<(String, f32)>,
}

impl EncodedVector {
    /// Value of a column, if it was emitted
    pub fn get(&self, name: &str) -> Option<f32> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Column names in emission order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Column name of a one-hot indicator
pub fn dummy_column<C: Category>(value: C) -> String {
    format!("{}_{}", C::COLUMN, value.label())
}

/// Feature encoder that turns form records into one-hot columns.
pub struct FeatureEncoder;

impl FeatureEncoder {
    /// Create a new feature encoder.
    pub fn new() -> Self {
        Self
    }

    /// Encode a record.
    ///
    /// Emits `tenure` followed by one hot column per categorical field, in
    /// form order. Unobserved categories are left out; the aligner fills
    /// them with zero.
    pub fn encode(&self, input: &RawInput) -> EncodedVector {
        let mut columns = Vec::with_capacity(self.column_count());

        columns.push((TENURE_COLUMN.to_string(), input.tenure as f32));
        columns.push((dummy_column(input.gender), 1.0));
        columns.push((dummy_column(input.contract), 1.0));
        columns.push((dummy_column(input.partner), 1.0));
        columns.push((dummy_column(input.payment_method), 1.0));
        columns.push((dummy_column(input.multiple_lines), 1.0));
        columns.push((dummy_column(input.streaming_tv), 1.0));

        EncodedVector { columns }
    }

    /// Number of columns emitted per record.
    pub fn column_count(&self) -> usize {
        7
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new()
    }
}
