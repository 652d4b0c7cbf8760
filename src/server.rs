//! JSON-lines request loop
//!
//! One `RawInput` document per input line, one response document per output
//! line. A bad request produces an error envelope and the loop moves on; only
//! I/O failures on the streams themselves end it.

use crate::error::PredictorError;
use crate::metrics::PipelineMetrics;
use crate::pipeline::PredictionPipeline;
use crate::types::{ErrorResponse, PredictionResponse, RawInput};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::{debug, warn};

/// Serve requests from `reader` until end of input.
pub fn serve<R: BufRead, W: Write>(
    pipeline: &PredictionPipeline,
    metrics: &PipelineMetrics,
    mut reader: R,
    mut writer: W,
) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }

        let request = match std::str::from_utf8(&buf) {
            Ok(text) if text.trim().is_empty() => continue,
            Ok(text) => RawInput::from_json(text.trim()),
            Err(e) => Err(PredictorError::InvalidInput(format!(
                "request is not valid UTF-8: {}",
                e
            ))),
        };

        let start_time = Instant::now();
        let payload = match request.and_then(|input| pipeline.predict(&input)) {
            Ok(result) => {
                let processing_time = start_time.elapsed();
                metrics.record_prediction(processing_time);

                let response = PredictionResponse::new(&result);
                debug!(
                    request_id = %response.request_id,
                    prediction = %response.display,
                    processing_time_us = processing_time.as_micros(),
                    "Prediction served"
                );
                serde_json::to_string(&response)?
            }
            Err(e) => {
                metrics.record_failure(e.kind());

                let response = ErrorResponse::new(&e);
                warn!(
                    request_id = %response.request_id,
                    kind = e.kind(),
                    error = %response.message,
                    "Prediction failed"
                );
                serde_json::to_string(&response)?
            }
        };

        writeln!(writer, "{}", payload)?;
        writer.flush()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inference::Predictor;
    use crate::models::loader::ModelBundle;
    use crate::models::metadata::ModelMetadata;
    use crate::types::prediction::OutputValue;
    use serde_json::Value;
    use std::sync::Arc;

    /// Returns the tenure column as the prediction
    struct TenurePredictor;

    impl Predictor for TenurePredictor {
        fn predict(&self, row: &[f32]) -> anyhow::Result<Vec<OutputValue>> {
            Ok(vec![OutputValue::Float(row[0] as f64)])
        }

        fn name(&self) -> &str {
            "tenure"
        }
    }

    fn pipeline() -> PredictionPipeline {
        let metadata = ModelMetadata::new(vec!["tenure".to_string(), "gender_Male".to_string()]);
        let bundle = ModelBundle::new(Box::new(TenurePredictor), None, metadata);
        PredictionPipeline::new(Arc::new(bundle))
    }

    const REQUEST: &str = r#"{"gender":"Male","contract":"Two year","tenure":30,"partner":"No","payment_method":"Mailed check","multiple_lines":"No","streaming_tv":"No"}"#;

    fn run(input: &[u8]) -> (Vec<Value>, PipelineMetrics) {
        let metrics = PipelineMetrics::new();
        let mut output = Vec::new();
        serve(&pipeline(), &metrics, input, &mut output).unwrap();

        let lines = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (lines, metrics)
    }

    #[test]
    fn test_invalid_utf8_line_does_not_end_session() {
        let mut input = b"\xff\xfe\n".to_vec();
        input.extend_from_slice(REQUEST.as_bytes());
        input.push(b'\n');

        let (responses, metrics) = run(&input);

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["error"], "invalid_input");
        assert!(responses[0]["message"].as_str().unwrap().contains("UTF-8"));
        assert_eq!(responses[1]["display"], "30.00");
        assert_eq!(metrics.get_failures_by_kind()["invalid_input"], 1);
    }

    #[test]
    fn test_bad_requests_get_error_envelopes() {
        let input = format!("not json\n\n{}\n{{\"tenure\": 5}}\n{}", REQUEST, REQUEST);

        let (responses, _) = run(input.as_bytes());

        // blank line skipped, last line served without a trailing newline
        assert_eq!(responses.len(), 4);
        assert_eq!(responses[0]["error"], "invalid_input");
        assert_eq!(responses[1]["kind"], "regression");
        assert_eq!(responses[2]["error"], "invalid_input");
        assert_eq!(responses[3]["features"][0]["name"], "tenure");
        assert_eq!(responses[3]["features"][1]["value"], 1.0);
    }
}
