#[cfg(feature = "engine-onnx")]
pub mod onnx;
