use std::path::Path;
use std::sync::Mutex;

use colophon_ocr::{
    NoopOcrEngine, OcrEngine, OcrError, OcrRequest, OcrResponse, UnavailableOcrEngine,
    available_engines,
};

struct ScriptedEngine {
    replies: Mutex<Vec<Result<OcrResponse, OcrError>>>,
}

impl OcrEngine for ScriptedEngine {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn recognize(&self, _: &OcrRequest<'_>) -> Result<OcrResponse, OcrError> {
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Ok(OcrResponse::empty()))
    }
}

#[test]
fn noop_engine_finds_nothing() {
    let engine = NoopOcrEngine;
    engine.warm_up().unwrap();
    let response = engine
        .recognize(&OcrRequest::new(Path::new("page.png")))
        .unwrap();
    assert!(response.is_empty());
    assert_eq!(engine.name(), "noop");
}

#[test]
fn unavailable_engine_reports_its_reason() {
    let engine = UnavailableOcrEngine::new("models missing");
    assert_eq!(engine.reason(), "models missing");
    let err = engine
        .recognize(&OcrRequest::new(Path::new("page.png")))
        .unwrap_err();
    assert!(matches!(err, OcrError::Unavailable { .. }));
    assert!(err.to_string().contains("models missing"));
    assert!(engine.warm_up().is_err());
}

#[test]
fn engines_are_usable_as_trait_objects() {
    let engine: Box<dyn OcrEngine> = Box::new(ScriptedEngine {
        replies: Mutex::new(vec![
            Err(OcrError::backend("inference failed")),
            Ok(OcrResponse::from_lines(["ISBN 978-7-115-12345-6", "定价：39.80元"])),
        ]),
    });
    let request = OcrRequest::new(Path::new("page.jpg"));

    let first = engine.recognize(&request).unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first.lines(), vec!["ISBN 978-7-115-12345-6", "定价：39.80元"]);

    let second = engine.recognize(&request).unwrap_err();
    assert_eq!(second.to_string(), "backend error: inference failed");
}

#[test]
fn noop_is_always_compiled_in() {
    assert!(available_engines().contains(&"noop"));
}

#[cfg(feature = "engine-onnx")]
#[test]
fn onnx_engine_reports_missing_models() {
    use colophon_ocr::{OnnxOcrConfig, OnnxOcrEngine};

    let dir = tempfile::tempdir().unwrap();
    let config = OnnxOcrConfig::new(
        dir.path().join("det.onnx"),
        dir.path().join("rec.onnx"),
        dir.path().join("keys.txt"),
    );
    match OnnxOcrEngine::new(config) {
        Err(OcrError::Model { path, .. }) => assert_eq!(path, dir.path().join("det.onnx")),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("engine should not start without models"),
    }
}
