//! Type definitions for the prediction front-end

pub mod input;
pub mod prediction;
pub mod response;

pub use input::{Category, RawInput};
pub use prediction::{ModelKind, OutputValue, Prediction, PredictionResult};
pub use response::{ErrorResponse, PredictionResponse};
