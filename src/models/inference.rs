//! Predictor abstraction, ONNX Runtime adapter and the invocation stage

use crate::error::{PipelineResult, PredictorError};
use crate::types::prediction::{ModelKind, OutputValue, Prediction};
use anyhow::{Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// A trained model that maps one feature row to its raw output values.
pub trait Predictor: Send + Sync {
    /// Run the model on a single row.
    fn predict(&self, row: &[f32]) -> Result<Vec<OutputValue>>;

    /// Name used in logs
    fn name(&self) -> &str;
}

/// ONNX model served through ONNX Runtime
pub struct OnnxPredictor {
    name: String,
    /// `Session::run` needs exclusive access
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
}

impl OnnxPredictor {
    /// Load an ONNX model from file.
    ///
    /// `output_name` selects which model output holds the prediction; the
    /// first output is used when it is not given.
    pub fn load<P: AsRef<Path>>(
        path: P,
        onnx_threads: usize,
        output_name: Option<&str>,
    ) -> Result<Self> {
        let path = path.as_ref();

        info!(path = %path.display(), threads = onnx_threads, "Loading ONNX model");

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(onnx_threads)?
            .commit_from_file(path)
            .with_context(|| format!("Failed to load model from {}", path.display()))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .context("Model declares no inputs")?;

        let output_name = match output_name {
            Some(wanted) => session
                .outputs
                .iter()
                .find(|o| o.name == wanted)
                .map(|o| o.name.clone())
                .with_context(|| format!("Model has no output named '{}'", wanted))?,
            None => session
                .outputs
                .first()
                .map(|o| o.name.clone())
                .context("Model declares no outputs")?,
        };

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());

        info!(
            model = %name,
            input = %input_name,
            output = %output_name,
            "Model loaded successfully"
        );

        Ok(Self {
            name,
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }
}

impl Predictor for OnnxPredictor {
    fn predict(&self, row: &[f32]) -> Result<Vec<OutputValue>> {
        // Input tensor shape [1, num_features]
        let shape = vec![1_i64, row.len() as i64];
        let input_tensor =
            Tensor::from_array((shape, row.to_vec())).context("Failed to create input tensor")?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;

        let outputs = session.run(ort::inputs![self.input_name.as_str() => input_tensor])?;

        let output = outputs
            .get(self.output_name.as_str())
            .with_context(|| format!("Output '{}' missing from model run", self.output_name))?;

        if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
            return Ok(data.iter().map(|&v| OutputValue::Float(v as f64)).collect());
        }
        if let Ok((_, data)) = output.try_extract_tensor::<f64>() {
            return Ok(data.iter().map(|&v| OutputValue::Float(v)).collect());
        }
        if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
            return Ok(data.iter().map(|&v| OutputValue::Int(v)).collect());
        }
        // string class labels, e.g. a classifier trained on "Yes"/"No"
        if let Ok((_, labels)) = output.try_extract_strings() {
            return Ok(labels.into_iter().map(OutputValue::Text).collect());
        }

        anyhow::bail!(
            "Unsupported output type for '{}': {:?}",
            self.output_name,
            output.dtype()
        )
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Invocation stage: run the predictor on exactly one row and interpret its
/// single output according to the model kind.
pub fn invoke(predictor: &dyn Predictor, row: &[f32], kind: ModelKind) -> PipelineResult<Prediction> {
    let mut values = predictor
        .predict(row)
        .map_err(|e| PredictorError::predictor_invocation(e))?;

    if values.len() != 1 {
        return Err(PredictorError::predictor_invocation(format!(
            "expected exactly one output value for one input row, got {}",
            values.len()
        )));
    }
    let value = values.remove(0);

    debug!(model = %predictor.name(), kind = ?kind, value = %value, "Predictor invoked");

    match kind {
        ModelKind::Classification => Ok(Prediction::Classification(value)),
        ModelKind::Regression => value
            .as_f64()
            .map(Prediction::Regression)
            .ok_or_else(|| {
                PredictorError::predictor_invocation(format!(
                    "regression model produced a non-numeric value '{}'",
                    value
                ))
            }),
    }
}
