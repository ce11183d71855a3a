use std::sync::Arc;

use colophon_ocr::{NoopOcrEngine, OcrEngine, OcrError, UnavailableOcrEngine};
use tracing::{info, warn};

use crate::cli::OcrBackend;
use crate::settings::OcrSettings;

/// Builds the configured engine. A failure is logged and yields an engine
/// whose every recognition reports that failure.
pub fn build_engine(settings: &OcrSettings) -> Arc<dyn OcrEngine> {
    match try_build_engine(settings) {
        Ok(engine) => {
            info!(engine = engine.name(), "OCR engine initialised");
            engine
        }
        Err(err) => {
            warn!(error = %err, "OCR engine unavailable");
            Arc::new(UnavailableOcrEngine::new(err.to_string()))
        }
    }
}

pub fn try_build_engine(settings: &OcrSettings) -> Result<Arc<dyn OcrEngine>, OcrError> {
    let engine: Arc<dyn OcrEngine> = match settings.backend {
        OcrBackend::Noop => Arc::new(NoopOcrEngine),
        OcrBackend::Auto | OcrBackend::Onnx => onnx_engine(settings)?,
    };
    engine.warm_up()?;
    Ok(engine)
}

#[cfg(feature = "ocr-onnx")]
fn onnx_engine(settings: &OcrSettings) -> Result<Arc<dyn OcrEngine>, OcrError> {
    let engine = colophon_ocr::OnnxOcrEngine::new(settings.onnx_config())?;
    Ok(Arc::new(engine))
}

#[cfg(not(feature = "ocr-onnx"))]
fn onnx_engine(_: &OcrSettings) -> Result<Arc<dyn OcrEngine>, OcrError> {
    Err(OcrError::Unavailable {
        message: "this build does not include the onnx engine (enable the \"ocr-onnx\" feature)"
            .to_string(),
    })
}
