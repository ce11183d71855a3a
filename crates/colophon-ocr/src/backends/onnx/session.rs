use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ndarray::{Array4, CowArray, IxDyn};
use once_cell::sync::OnceCell;
use ort::environment::Environment;
use ort::error::OrtError;
use ort::session::{Session, SessionBuilder};
use ort::value::Value;

use crate::OcrError;

#[derive(Debug)]
pub(super) struct ModelHandle {
    path: PathBuf,
    _environment: Arc<Environment>,
    session: Session,
}

/// Flattened first output of a model run.
pub(super) struct ModelOutput {
    pub data: Vec<f32>,
    pub shape: Vec<usize>,
}

impl ModelHandle {
    pub(super) fn path(&self) -> &Path {
        &self.path
    }

    pub(super) fn run(&self, input: &Array4<f32>) -> Result<ModelOutput, OcrError> {
        let allocator = self.session.allocator();
        let input_dyn: CowArray<'_, f32, IxDyn> = CowArray::from(input.view().into_dyn());
        let tensor = Value::from_array(allocator, &input_dyn).map_err(map_input_error)?;
        let outputs = self
            .session
            .run(vec![tensor])
            .map_err(|err| map_inference_error(&self.path, err))?;
        let tensor = outputs
            .into_iter()
            .next()
            .ok_or_else(|| {
                OcrError::backend(format!(
                    "onnx model {} produced no output",
                    self.path.display()
                ))
            })?
            .try_extract::<f32>()
            .map_err(|err| map_inference_error(&self.path, err))?;
        let view = tensor.view();
        let shape = view.shape().to_vec();
        let data = view.iter().copied().collect::<Vec<f32>>();
        Ok(ModelOutput { data, shape })
    }
}

pub(super) struct ModelRegistry {
    environment: Arc<Environment>,
    handles: Mutex<HashMap<PathBuf, Arc<ModelHandle>>>,
}

impl ModelRegistry {
    fn new() -> Result<Self, OcrError> {
        let environment = Environment::builder()
            .with_name("colophon-ocr")
            .build()
            .map_err(map_environment_error)?;
        Ok(Self {
            environment: Arc::new(environment),
            handles: Mutex::new(HashMap::new()),
        })
    }

    pub(super) fn get(&self, path: &Path) -> Result<Arc<ModelHandle>, OcrError> {
        let mut guard = self
            .handles
            .lock()
            .map_err(|_| OcrError::backend("onnx model registry poisoned"))?;
        if let Some(handle) = guard.get(path) {
            return Ok(Arc::clone(handle));
        }

        let session = SessionBuilder::new(&self.environment)
            .map_err(|err| map_session_error(path, err))?
            .with_model_from_file(path)
            .map_err(|err| map_session_error(path, err))?;

        tracing::debug!(model = %path.display(), "loaded onnx model");
        let handle = Arc::new(ModelHandle {
            path: path.to_path_buf(),
            _environment: Arc::clone(&self.environment),
            session,
        });
        guard.insert(path.to_path_buf(), Arc::clone(&handle));
        Ok(handle)
    }
}

static MODEL_REGISTRY: OnceCell<ModelRegistry> = OnceCell::new();

pub(super) fn registry() -> Result<&'static ModelRegistry, OcrError> {
    MODEL_REGISTRY.get_or_try_init(ModelRegistry::new)
}

fn map_environment_error(err: OrtError) -> OcrError {
    OcrError::backend(format!(
        "failed to initialise ONNX runtime environment: {err}"
    ))
}

fn map_session_error(path: &Path, err: OrtError) -> OcrError {
    let message = err.to_string();
    if message.contains("Trying to register schema with name") {
        OcrError::model(
            path,
            format!("detected ONNX Runtime schema registration conflict ({message})"),
        )
    } else {
        OcrError::model(path, message)
    }
}

fn map_input_error(err: OrtError) -> OcrError {
    OcrError::backend(format!("failed to prepare ONNX input: {err}"))
}

fn map_inference_error(path: &Path, err: OrtError) -> OcrError {
    OcrError::backend(format!(
        "ONNX inference failed for {}: {err}",
        path.display()
    ))
}
