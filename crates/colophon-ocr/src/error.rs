use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("failed to load image {path}: {message}", path = .path.display())]
    ImageLoad { path: PathBuf, message: String },
    #[error("failed to load model {path}: {message}", path = .path.display())]
    Model { path: PathBuf, message: String },
    #[error("backend error: {message}")]
    Backend { message: String },
    #[error("OCR engine unavailable: {message}")]
    Unavailable { message: String },
}

impl OcrError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub fn image_load(path: &Path, message: impl ToString) -> Self {
        Self::ImageLoad {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    pub fn model(path: &Path, message: impl ToString) -> Self {
        Self::Model {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}
