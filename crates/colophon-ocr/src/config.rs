use std::path::PathBuf;

pub const DEFAULT_DET_LIMIT_SIDE_LEN: u32 = 960;
pub const DEFAULT_DET_THRESH: f32 = 0.3;
pub const DEFAULT_BOX_THRESH: f32 = 0.6;
pub const DEFAULT_UNCLIP_RATIO: f32 = 1.5;
pub const DEFAULT_CLS_THRESH: f32 = 0.9;
pub const DEFAULT_DROP_SCORE: f32 = 0.5;

/// Model files and thresholds for the ONNX detection + recognition pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct OnnxOcrConfig {
    pub det_model: PathBuf,
    pub rec_model: PathBuf,
    /// Text-angle classifier; `None` skips orientation correction.
    pub cls_model: Option<PathBuf>,
    /// Character dictionary, one entry per line.
    pub dict: PathBuf,
    pub det_limit_side_len: u32,
    pub det_thresh: f32,
    pub box_thresh: f32,
    pub unclip_ratio: f32,
    pub cls_thresh: f32,
    pub drop_score: f32,
}

impl OnnxOcrConfig {
    pub fn new(det_model: PathBuf, rec_model: PathBuf, dict: PathBuf) -> Self {
        Self {
            det_model,
            rec_model,
            cls_model: None,
            dict,
            det_limit_side_len: DEFAULT_DET_LIMIT_SIDE_LEN,
            det_thresh: DEFAULT_DET_THRESH,
            box_thresh: DEFAULT_BOX_THRESH,
            unclip_ratio: DEFAULT_UNCLIP_RATIO,
            cls_thresh: DEFAULT_CLS_THRESH,
            drop_score: DEFAULT_DROP_SCORE,
        }
    }

    pub fn with_angle_classifier(mut self, cls_model: PathBuf) -> Self {
        self.cls_model = Some(cls_model);
        self
    }
}
