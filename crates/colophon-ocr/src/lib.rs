mod backends;
mod config;
mod engine;
mod error;
mod region;
mod request;
mod response;

#[cfg(feature = "engine-onnx")]
pub use backends::onnx::OnnxOcrEngine;
pub use config::{
    DEFAULT_BOX_THRESH, DEFAULT_CLS_THRESH, DEFAULT_DET_LIMIT_SIDE_LEN, DEFAULT_DET_THRESH,
    DEFAULT_DROP_SCORE, DEFAULT_UNCLIP_RATIO, OnnxOcrConfig,
};
pub use engine::{NoopOcrEngine, OcrEngine, UnavailableOcrEngine};
pub use error::OcrError;
pub use region::TextBounds;
pub use request::OcrRequest;
pub use response::{OcrResponse, OcrText};

/// Names of the engines compiled into this build.
pub fn available_engines() -> &'static [&'static str] {
    #[cfg(feature = "engine-onnx")]
    {
        &["onnx", "noop"]
    }
    #[cfg(not(feature = "engine-onnx"))]
    {
        &["noop"]
    }
}
