//! Model artifacts, scaling and inference

pub mod inference;
pub mod loader;
pub mod metadata;
pub mod scaler;

pub use inference::{OnnxPredictor, Predictor};
pub use loader::ModelBundle;
pub use metadata::ModelMetadata;
pub use scaler::Scaler;
