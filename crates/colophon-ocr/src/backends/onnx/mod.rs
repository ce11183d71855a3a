//! ONNX Runtime pipeline: DB text detection, optional angle classification,
//! CTC line recognition.

mod classify;
mod detect;
mod dict;
mod preprocess;
mod recognize;
mod session;

use std::sync::Arc;

use image::RgbImage;
use image::imageops;
use tracing::{debug, info};

use self::detect::DetectionParams;
use self::session::ModelHandle;
use crate::{OcrEngine, OcrError, OcrRequest, OcrResponse, OcrText, OnnxOcrConfig, TextBounds};

const VERTICAL_ASPECT: f32 = 1.5;

#[derive(Debug)]
pub struct OnnxOcrEngine {
    config: OnnxOcrConfig,
    detector: Arc<ModelHandle>,
    recognizer: Arc<ModelHandle>,
    classifier: Option<Arc<ModelHandle>>,
    dictionary: Vec<String>,
}

impl OnnxOcrEngine {
    pub fn new(config: OnnxOcrConfig) -> Result<Self, OcrError> {
        let models = [Some(&config.det_model), Some(&config.rec_model), config.cls_model.as_ref()];
        for path in models.into_iter().flatten() {
            if !path.is_file() {
                return Err(OcrError::model(path, "file does not exist"));
            }
        }

        let registry = session::registry()?;
        let detector = registry.get(&config.det_model)?;
        let recognizer = registry.get(&config.rec_model)?;
        let classifier = config
            .cls_model
            .as_deref()
            .map(|path| registry.get(path))
            .transpose()?;
        let dictionary = dict::load_dictionary(&config.dict)?;

        info!(
            detector = %detector.path().display(),
            recognizer = %recognizer.path().display(),
            angle_classifier = classifier.is_some(),
            dictionary_entries = dictionary.len(),
            "onnx OCR engine ready"
        );
        Ok(Self {
            config,
            detector,
            recognizer,
            classifier,
            dictionary,
        })
    }

    pub fn config(&self) -> &OnnxOcrConfig {
        &self.config
    }

    fn detect(&self, image: &RgbImage) -> Result<Vec<TextBounds>, OcrError> {
        let input = detect::detection_tensor(image, self.config.det_limit_side_len)?;
        let output = self.detector.run(&input)?;
        let (map_h, map_w) = detect::map_dims(&output.shape, output.data.len())?;
        let params = DetectionParams {
            thresh: self.config.det_thresh,
            box_thresh: self.config.box_thresh,
            unclip_ratio: self.config.unclip_ratio,
        };
        Ok(detect::boxes_from_map(
            &output.data,
            map_w,
            map_h,
            image.dimensions(),
            params,
        ))
    }

    fn upright(&self, crop: RgbImage) -> Result<RgbImage, OcrError> {
        let Some(classifier) = &self.classifier else {
            return Ok(crop);
        };
        let input = preprocess::line_tensor(&crop, classify::CLS_HEIGHT, classify::CLS_WIDTH)?;
        let output = classifier.run(&input)?;
        if classify::is_rotated(&output.data, self.config.cls_thresh)? {
            Ok(imageops::rotate180(&crop))
        } else {
            Ok(crop)
        }
    }

    fn read_line(&self, crop: &RgbImage) -> Result<(String, f32), OcrError> {
        let width = recognize::recognition_width(crop.width(), crop.height());
        let input = preprocess::line_tensor(crop, recognize::REC_HEIGHT, width)?;
        let output = self.recognizer.run(&input)?;
        recognize::ctc_greedy_decode(&output.data, &output.shape, &self.dictionary)
    }
}

impl OcrEngine for OnnxOcrEngine {
    fn name(&self) -> &'static str {
        "onnx"
    }

    fn warm_up(&self) -> Result<(), OcrError> {
        let blank = RgbImage::from_pixel(64, 64, image::Rgb([255, 255, 255]));
        self.detect(&blank).map(|_| ())
    }

    fn recognize(&self, request: &OcrRequest<'_>) -> Result<OcrResponse, OcrError> {
        let path = request.image();
        let image = image::open(path)
            .map_err(|err| OcrError::image_load(path, err))?
            .to_rgb8();

        let regions = self.detect(&image)?;
        debug!(regions = regions.len(), image = %path.display(), "text detection finished");

        let mut texts = Vec::with_capacity(regions.len());
        for bounds in regions {
            let Some((x, y, width, height)) = bounds.pixel_rect(image.width(), image.height())
            else {
                continue;
            };
            let mut crop = imageops::crop_imm(&image, x, y, width, height).to_image();
            if height as f32 >= width as f32 * VERTICAL_ASPECT {
                crop = imageops::rotate270(&crop);
            }
            let crop = self.upright(crop)?;
            let (text, confidence) = self.read_line(&crop)?;
            if text.trim().is_empty() || confidence < self.config.drop_score {
                debug!(confidence, "dropped low-confidence line");
                continue;
            }
            texts.push(OcrText::new(bounds, text).with_confidence(confidence));
        }

        debug!(lines = texts.len(), "text recognition finished");
        Ok(OcrResponse::new(texts))
    }
}
