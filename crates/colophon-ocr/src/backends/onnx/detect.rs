//! Differentiable-binarisation post-processing for the text detector.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, RgbImage};
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;
use ndarray::Array4;

use crate::{OcrError, TextBounds};

const DET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const DET_STD: [f32; 3] = [0.229, 0.224, 0.225];
const SIZE_MULTIPLE: f32 = 32.0;
const MAX_CANDIDATES: usize = 1000;
const MIN_BOX_SIDE: f32 = 3.0;
const ROW_TOLERANCE: f32 = 10.0;

#[derive(Debug, Clone, Copy)]
pub(super) struct DetectionParams {
    pub thresh: f32,
    pub box_thresh: f32,
    pub unclip_ratio: f32,
}

/// Detector input size: the longest side capped at `limit_side_len`, both
/// sides rounded to a multiple of 32.
pub(super) fn detection_size(width: u32, height: u32, limit_side_len: u32) -> (u32, u32) {
    let longest = width.max(height).max(1) as f32;
    let limit = limit_side_len as f32;
    let ratio = if longest > limit { limit / longest } else { 1.0 };
    let round = |side: u32| {
        let scaled = side as f32 * ratio;
        (((scaled / SIZE_MULTIPLE).round() * SIZE_MULTIPLE) as u32).max(SIZE_MULTIPLE as u32)
    };
    (round(width), round(height))
}

pub(super) fn detection_tensor(
    image: &RgbImage,
    limit_side_len: u32,
) -> Result<Array4<f32>, OcrError> {
    let (width, height) = detection_size(image.width(), image.height(), limit_side_len);
    let resized = imageops::resize(image, width, height, FilterType::Triangle);

    let plane = (width * height) as usize;
    let mut data = vec![0.0f32; plane * 3];
    for (x, y, pixel) in resized.enumerate_pixels() {
        let offset = y as usize * width as usize + x as usize;
        for channel in 0..3 {
            let value = pixel[2 - channel] as f32 / 255.0;
            data[channel * plane + offset] = (value - DET_MEAN[channel]) / DET_STD[channel];
        }
    }

    Array4::from_shape_vec((1, 3, height as usize, width as usize), data)
        .map_err(|err| OcrError::backend(format!("failed to build detector tensor: {err}")))
}

/// Height and width of a probability map shaped `[.., H, W]`.
pub(super) fn map_dims(shape: &[usize], len: usize) -> Result<(usize, usize), OcrError> {
    let [.., height, width] = shape else {
        return Err(OcrError::backend(format!(
            "unexpected detector output shape {shape:?}"
        )));
    };
    if *height == 0 || *width == 0 || height * width > len {
        return Err(OcrError::backend(format!(
            "detector output shape {shape:?} does not match {len} values"
        )));
    }
    Ok((*height, *width))
}

/// Turns a probability map into axis-aligned regions in source image pixels,
/// sorted in reading order.
pub(super) fn boxes_from_map(
    probabilities: &[f32],
    map_w: usize,
    map_h: usize,
    source: (u32, u32),
    params: DetectionParams,
) -> Vec<TextBounds> {
    let mut bitmap = GrayImage::new(map_w as u32, map_h as u32);
    for (index, value) in probabilities.iter().take(map_w * map_h).enumerate() {
        if *value > params.thresh {
            bitmap.put_pixel((index % map_w) as u32, (index / map_w) as u32, Luma([255]));
        }
    }

    let (src_w, src_h) = (source.0 as f32, source.1 as f32);
    let scale_x = src_w / map_w as f32;
    let scale_y = src_h / map_h as f32;

    let mut regions = Vec::new();
    let contours = find_contours::<u32>(&bitmap)
        .into_iter()
        .filter(|contour| matches!(contour.border_type, BorderType::Outer))
        .take(MAX_CANDIDATES);
    for contour in contours {
        let Some((min_x, min_y, max_x, max_y)) = extent(&contour.points) else {
            continue;
        };
        let width = (max_x - min_x + 1) as f32;
        let height = (max_y - min_y + 1) as f32;
        if width.min(height) < MIN_BOX_SIDE {
            continue;
        }
        let score = mean_score(probabilities, map_w, (min_x, min_y, max_x, max_y));
        if score < params.box_thresh {
            continue;
        }

        let distance = width * height * params.unclip_ratio / (2.0 * (width + height));
        let left = (min_x as f32 - distance) * scale_x;
        let top = (min_y as f32 - distance) * scale_y;
        let right = (max_x as f32 + 1.0 + distance) * scale_x;
        let bottom = (max_y as f32 + 1.0 + distance) * scale_y;
        let (left, right) = (left.clamp(0.0, src_w), right.clamp(0.0, src_w));
        let (top, bottom) = (top.clamp(0.0, src_h), bottom.clamp(0.0, src_h));
        if right - left < MIN_BOX_SIDE || bottom - top < MIN_BOX_SIDE {
            continue;
        }
        regions.push(TextBounds::new(left, top, right - left, bottom - top));
    }

    sort_regions(&mut regions);
    regions
}

/// Top to bottom, then left to right among boxes whose tops lie within
/// the row tolerance of each other.
pub(super) fn sort_regions(regions: &mut [TextBounds]) {
    regions.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
    for i in 0..regions.len().saturating_sub(1) {
        for j in (0..=i).rev() {
            let same_row = (regions[j + 1].y - regions[j].y).abs() < ROW_TOLERANCE;
            if same_row && regions[j + 1].x < regions[j].x {
                regions.swap(j, j + 1);
            } else {
                break;
            }
        }
    }
}

fn extent(points: &[Point<u32>]) -> Option<(u32, u32, u32, u32)> {
    let first = points.first()?;
    Some(points.iter().fold(
        (first.x, first.y, first.x, first.y),
        |(min_x, min_y, max_x, max_y), point| {
            (
                min_x.min(point.x),
                min_y.min(point.y),
                max_x.max(point.x),
                max_y.max(point.y),
            )
        },
    ))
}

fn mean_score(probabilities: &[f32], map_w: usize, bounds: (u32, u32, u32, u32)) -> f32 {
    let (min_x, min_y, max_x, max_y) = bounds;
    let mut sum = 0.0f32;
    let mut count = 0usize;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if let Some(value) = probabilities.get(y as usize * map_w + x as usize) {
                sum += value;
                count += 1;
            }
        }
    }
    if count == 0 { 0.0 } else { sum / count as f32 }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: DetectionParams = DetectionParams {
        thresh: 0.3,
        box_thresh: 0.6,
        unclip_ratio: 1.5,
    };

    fn map_with_blocks(map_w: usize, map_h: usize, blocks: &[(usize, usize, usize, usize)]) -> Vec<f32> {
        let mut map = vec![0.0f32; map_w * map_h];
        for &(x0, y0, x1, y1) in blocks {
            for y in y0..y1 {
                for x in x0..x1 {
                    map[y * map_w + x] = 0.9;
                }
            }
        }
        map
    }

    #[test]
    fn detection_size_rounds_to_multiples_of_32() {
        assert_eq!(detection_size(1000, 500, 960), (960, 480));
        assert_eq!(detection_size(100, 50, 960), (96, 64));
        assert_eq!(detection_size(10, 10, 960), (32, 32));
    }

    #[test]
    fn detection_tensor_matches_rounded_size() {
        let image = RgbImage::new(100, 50);
        let tensor = detection_tensor(&image, 960).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 64, 96]);
    }

    #[test]
    fn map_dims_reads_trailing_axes() {
        assert_eq!(map_dims(&[1, 1, 64, 96], 64 * 96).unwrap(), (64, 96));
        assert!(map_dims(&[96], 96).is_err());
        assert!(map_dims(&[1, 1, 64, 96], 10).is_err());
    }

    #[test]
    fn blocks_become_reading_ordered_regions() {
        let map = map_with_blocks(64, 64, &[(40, 5, 60, 15), (4, 6, 30, 16), (4, 40, 50, 50)]);
        let regions = boxes_from_map(&map, 64, 64, (128, 128), PARAMS);
        assert_eq!(regions.len(), 3);
        assert!(regions[0].x < regions[1].x);
        assert!(regions[1].y < regions[2].y);
        for region in &regions {
            assert!(region.right() <= 128.0 && region.bottom() <= 128.0);
        }
    }

    #[test]
    fn low_scores_and_slivers_are_dropped() {
        let mut map = map_with_blocks(32, 32, &[(2, 2, 30, 4)]);
        map[20 * 32 + 20] = 0.9;
        let regions = boxes_from_map(&map, 32, 32, (32, 32), PARAMS);
        assert!(regions.is_empty());

        let faint = vec![0.4f32; 32 * 32];
        let regions = boxes_from_map(&faint, 32, 32, (32, 32), PARAMS);
        assert!(regions.is_empty());
    }

    #[test]
    fn sort_groups_boxes_on_the_same_row() {
        let mut regions = vec![
            TextBounds::new(200.0, 10.0, 50.0, 20.0),
            TextBounds::new(10.0, 15.0, 50.0, 20.0),
            TextBounds::new(5.0, 100.0, 50.0, 20.0),
        ];
        sort_regions(&mut regions);
        let xs: Vec<f32> = regions.iter().map(|region| region.x).collect();
        assert_eq!(xs, vec![10.0, 200.0, 5.0]);
    }
}
