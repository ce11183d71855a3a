use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use colophon_ocr::{
    DEFAULT_BOX_THRESH, DEFAULT_DET_LIMIT_SIDE_LEN, DEFAULT_DET_THRESH, DEFAULT_DROP_SCORE,
    DEFAULT_UNCLIP_RATIO, OnnxOcrConfig,
};
use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;
use thiserror::Error;

use crate::cli::{CliArgs, CliSources, OcrBackend};

pub const PROJECT_CONFIG_FILE: &str = "colophon.toml";
pub const DEFAULT_DET_MODEL: &str = "ch_PP-OCRv4_det_infer.onnx";
pub const DEFAULT_REC_MODEL: &str = "ch_PP-OCRv4_rec_infer.onnx";
pub const DEFAULT_CLS_MODEL: &str = "ch_ppocr_mobile_v2.0_cls_infer.onnx";
pub const DEFAULT_DICT: &str = "ppocr_keys_v1.txt";
const DEFAULT_MODELS_DIR: &str = "models";
const MIN_DET_SIDE_LEN: u32 = 32;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    log_level: Option<String>,
    ocr: Option<OcrFileConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OcrFileConfig {
    backend: Option<String>,
    models_dir: Option<String>,
    det_model: Option<String>,
    rec_model: Option<String>,
    cls_model: Option<String>,
    dict: Option<String>,
    use_angle_cls: Option<bool>,
    det_limit_side_len: Option<u32>,
    det_thresh: Option<f32>,
    box_thresh: Option<f32>,
    unclip_ratio: Option<f32>,
    drop_score: Option<f32>,
}

#[derive(Debug)]
pub struct EffectiveSettings {
    pub log_level: String,
    pub ocr: OcrSettings,
    pub image: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OcrSettings {
    pub backend: OcrBackend,
    pub models_dir: PathBuf,
    pub det_model: PathBuf,
    pub rec_model: PathBuf,
    /// `None` when the angle classifier is disabled.
    pub cls_model: Option<PathBuf>,
    pub dict: PathBuf,
    pub det_limit_side_len: u32,
    pub det_thresh: f32,
    pub box_thresh: f32,
    pub unclip_ratio: f32,
    pub drop_score: f32,
}

impl OcrSettings {
    pub fn onnx_config(&self) -> OnnxOcrConfig {
        let mut config = OnnxOcrConfig::new(
            self.det_model.clone(),
            self.rec_model.clone(),
            self.dict.clone(),
        );
        if let Some(cls_model) = &self.cls_model {
            config = config.with_angle_classifier(cls_model.clone());
        }
        config.det_limit_side_len = self.det_limit_side_len;
        config.det_thresh = self.det_thresh;
        config.box_thresh = self.box_thresh;
        config.unclip_ratio = self.unclip_ratio;
        config.drop_score = self.drop_score;
        config
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}", path = .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for '{field}'{}", location(.path))]
    InvalidValue {
        path: Option<PathBuf>,
        field: &'static str,
        value: String,
    },
    #[error("config file {path} does not exist", path = .path.display())]
    NotFound { path: PathBuf },
}

fn location(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" in {}", path.display()),
        None => String::new(),
    }
}

pub fn resolve_settings(
    cli: &CliArgs,
    sources: &CliSources,
) -> Result<EffectiveSettings, ConfigError> {
    let (file, config_path) = load_config(cli.config.as_deref())?;
    merge(cli, sources, file, config_path)
}

fn load_config(path_override: Option<&Path>) -> Result<(FileConfig, Option<PathBuf>), ConfigError> {
    if let Some(path) = path_override {
        let path = expand_pathbuf(path.to_path_buf());
        if !path.exists() {
            return Err(ConfigError::NotFound { path });
        }
        return read_config(path);
    }

    for candidate in [project_config_path(), default_config_path()]
        .into_iter()
        .flatten()
    {
        if candidate.exists() {
            return read_config(candidate);
        }
    }
    Ok((FileConfig::default(), None))
}

fn read_config(path: PathBuf) -> Result<(FileConfig, Option<PathBuf>), ConfigError> {
    let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    Ok((config, Some(path)))
}

fn merge(
    cli: &CliArgs,
    sources: &CliSources,
    file: FileConfig,
    config_path: Option<PathBuf>,
) -> Result<EffectiveSettings, ConfigError> {
    let config_dir = config_path
        .as_ref()
        .and_then(|path| path.parent().map(|dir| dir.to_path_buf()));

    let FileConfig {
        log_level: file_log_level,
        ocr: file_ocr,
    } = file;
    let OcrFileConfig {
        backend: file_backend,
        models_dir: file_models_dir,
        det_model,
        rec_model,
        cls_model,
        dict,
        use_angle_cls,
        det_limit_side_len,
        det_thresh,
        box_thresh,
        unclip_ratio,
        drop_score,
    } = file_ocr.unwrap_or_default();

    let mut log_level = cli.log_level.clone();
    if !sources.log_level_from_cli {
        if let Some(value) = normalize_string(file_log_level) {
            log_level = value;
        }
    }

    let mut backend = cli.ocr_backend;
    if !sources.ocr_backend_from_cli {
        if let Some(value) = normalize_string(file_backend) {
            backend = parse_backend(&value, config_path.as_ref())?;
        }
    }

    let models_dir = if let Some(dir) = cli.models_dir.clone() {
        expand_pathbuf(dir)
    } else if let Some(dir) = normalize_string(file_models_dir)
        .and_then(|dir| resolve_path_from_config(dir, config_dir.as_deref()))
    {
        dir
    } else {
        default_models_dir()
    };

    let model_path = |value: Option<String>, default: &str| {
        let name = normalize_string(value).unwrap_or_else(|| default.to_string());
        let expanded = expand_home_path(&name);
        if expanded.is_absolute() {
            expanded
        } else {
            models_dir.join(expanded)
        }
    };
    let det_model = model_path(det_model, DEFAULT_DET_MODEL);
    let rec_model = model_path(rec_model, DEFAULT_REC_MODEL);
    let cls_model = use_angle_cls
        .unwrap_or(true)
        .then(|| model_path(cls_model, DEFAULT_CLS_MODEL));
    let dict = model_path(dict, DEFAULT_DICT);

    let ocr = OcrSettings {
        backend,
        det_model,
        rec_model,
        cls_model,
        dict,
        models_dir,
        det_limit_side_len: det_limit_side_len.unwrap_or(DEFAULT_DET_LIMIT_SIDE_LEN),
        det_thresh: det_thresh.unwrap_or(DEFAULT_DET_THRESH),
        box_thresh: box_thresh.unwrap_or(DEFAULT_BOX_THRESH),
        unclip_ratio: unclip_ratio.unwrap_or(DEFAULT_UNCLIP_RATIO),
        drop_score: drop_score.unwrap_or(DEFAULT_DROP_SCORE),
    };
    validate(&ocr, config_path.as_ref())?;

    Ok(EffectiveSettings {
        log_level,
        ocr,
        image: cli.image.clone().map(expand_pathbuf),
        config_path,
    })
}

fn validate(ocr: &OcrSettings, path: Option<&PathBuf>) -> Result<(), ConfigError> {
    let invalid = |field: &'static str, value: String| ConfigError::InvalidValue {
        path: path.cloned(),
        field,
        value,
    };

    if ocr.det_limit_side_len < MIN_DET_SIDE_LEN {
        return Err(invalid(
            "det_limit_side_len",
            ocr.det_limit_side_len.to_string(),
        ));
    }
    for (field, value) in [
        ("det_thresh", ocr.det_thresh),
        ("box_thresh", ocr.box_thresh),
        ("drop_score", ocr.drop_score),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(invalid(field, value.to_string()));
        }
    }
    if !(ocr.unclip_ratio.is_finite() && ocr.unclip_ratio > 0.0) {
        return Err(invalid("unclip_ratio", ocr.unclip_ratio.to_string()));
    }
    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("rs", "colophon", "colophon").map(|dirs| dirs.config_dir().join("config.toml"))
}

fn project_config_path() -> Option<PathBuf> {
    env::current_dir()
        .ok()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
}

fn default_models_dir() -> PathBuf {
    ProjectDirs::from("rs", "colophon", "colophon")
        .map(|dirs| dirs.data_dir().join(DEFAULT_MODELS_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODELS_DIR))
}

fn normalize_string(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn expand_pathbuf(path: PathBuf) -> PathBuf {
    match path.to_str() {
        Some(s) => expand_home_path(s),
        None => path,
    }
}

fn resolve_path_from_config(value: String, base: Option<&Path>) -> Option<PathBuf> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let expanded = expand_home_path(trimmed);
    match base {
        Some(base) if !expanded.is_absolute() => Some(base.join(expanded)),
        _ => Some(expanded),
    }
}

fn expand_home_path(value: &str) -> PathBuf {
    if value == "~" {
        if let Some(base) = BaseDirs::new() {
            return base.home_dir().to_path_buf();
        }
    } else if let Some(stripped) = value.strip_prefix("~/") {
        if let Some(base) = BaseDirs::new() {
            return base.home_dir().join(stripped);
        }
    }
    PathBuf::from(value)
}

fn parse_backend(value: &str, path: Option<&PathBuf>) -> Result<OcrBackend, ConfigError> {
    OcrBackend::from_str(value, true).map_err(|_| ConfigError::InvalidValue {
        path: path.cloned(),
        field: "ocr.backend",
        value: value.to_string(),
    })
}
