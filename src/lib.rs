//! Telco Predictor Library
//!
//! Front-end core for a pre-trained telco customer model: turns a form
//! record into the exact feature vector the model was trained on, scales it
//! and runs the model.

pub mod config;
pub mod error;
pub mod feature_aligner;
pub mod feature_encoder;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::PredictorError;
pub use feature_aligner::{AlignedVector, FeatureAligner};
pub use feature_encoder::{EncodedVector, FeatureEncoder};
pub use models::{ModelBundle, ModelMetadata, OnnxPredictor, Predictor, Scaler};
pub use pipeline::PredictionPipeline;
pub use types::{prediction::PredictionResult, RawInput};
