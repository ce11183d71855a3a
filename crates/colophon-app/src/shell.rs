//! Window-independent state machine behind the main window. Every command
//! takes the current state and returns the next one plus the effects the
//! view has to carry out.

use std::path::{Path, PathBuf};

use colophon_extract::{extract, render};
use colophon_ocr::{OcrEngine, OcrError, OcrRequest};
use tracing::{debug, info, warn};

pub const WINDOW_TITLE: &str = "图书版权页识别系统";
pub const UPLOAD_LABEL: &str = "上传图片";
pub const RECOGNIZE_LABEL: &str = "识别版权页";
pub const RESULT_LABEL: &str = "识别结果：";
pub const WARNING_TITLE: &str = "警告";
pub const ERROR_TITLE: &str = "错误";
pub const NO_TEXT_MESSAGE: &str = "未能识别到文字信息！";
pub const UNSUPPORTED_IMAGE_MESSAGE: &str = "请选择图片文件（*.png *.jpg *.jpeg *.bmp）！";
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogLevel {
    Warning,
    Error,
}

/// Blocking message box shown by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub level: DialogLevel,
    pub title: &'static str,
    pub message: String,
}

impl Dialog {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: DialogLevel::Warning,
            title: WARNING_TITLE,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: DialogLevel::Error,
            title: ERROR_TITLE,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ShowImage(PathBuf),
    ShowResult(String),
    Dialog(Dialog),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellState {
    pub image: Option<PathBuf>,
    pub result: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ShellState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: ShellState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(state: ShellState, effect: Effect) -> Self {
        Self {
            state,
            effects: vec![effect],
        }
    }
}

/// Handles the file picker result. `None` means the picker was cancelled.
pub fn load_image(state: ShellState, picked: Option<PathBuf>) -> Transition {
    let Some(path) = picked else {
        return Transition::unchanged(state);
    };
    if !is_supported_image(&path) {
        warn!(path = %path.display(), "rejected non-image file");
        return Transition::with(state, Effect::Dialog(Dialog::warning(UNSUPPORTED_IMAGE_MESSAGE)));
    }

    info!(path = %path.display(), "image loaded");
    let next = ShellState {
        image: Some(path.clone()),
        result: None,
    };
    Transition::with(next, Effect::ShowImage(path))
}

/// Runs OCR on the loaded image and, when text was found, extracts and
/// renders the copyright fields. Failures leave the state untouched.
pub fn recognize(state: ShellState, engine: &dyn OcrEngine) -> Transition {
    let Some(image) = state.image.clone() else {
        return Transition::unchanged(state);
    };

    let response = match engine.recognize(&OcrRequest::new(&image)) {
        Ok(response) => response,
        Err(err) => {
            warn!(engine = engine.name(), error = %err, "recognition failed");
            return Transition::with(state, Effect::Dialog(Dialog::error(error_message(&err))));
        }
    };
    if response.is_empty() {
        info!(path = %image.display(), "no text recognised");
        return Transition::with(state, Effect::Dialog(Dialog::warning(NO_TEXT_MESSAGE)));
    }

    let lines = response.lines();
    debug!(?lines, "recognised lines");
    let fields = extract(&lines);
    let text = render(&fields);
    info!(lines = lines.len(), "copyright fields extracted");

    let next = ShellState {
        image: Some(image),
        result: Some(text.clone()),
    };
    Transition::with(next, Effect::ShowResult(text))
}

pub fn can_recognize(state: &ShellState) -> bool {
    state.image.is_some()
}

pub fn error_message(err: &OcrError) -> String {
    format!("识别过程中出现错误：{err}")
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}
