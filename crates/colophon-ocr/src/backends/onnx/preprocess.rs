use image::RgbImage;
use image::imageops::{self, FilterType};
use ndarray::Array4;

use crate::OcrError;

/// Resizes a cropped text line to `height`, keeping its aspect ratio up to
/// `max_width`, and writes it left-aligned into a zero-padded NCHW tensor
/// normalised to `[-1, 1]`.
pub(super) fn line_tensor(
    crop: &RgbImage,
    height: u32,
    max_width: u32,
) -> Result<Array4<f32>, OcrError> {
    let (crop_w, crop_h) = crop.dimensions();
    if crop_w == 0 || crop_h == 0 {
        return Err(OcrError::backend("cannot prepare an empty text line"));
    }
    let ratio = crop_w as f32 / crop_h as f32;
    let resized_w = ((height as f32 * ratio).ceil() as u32).clamp(1, max_width);
    let resized = imageops::resize(crop, resized_w, height, FilterType::Triangle);

    let plane = (height * max_width) as usize;
    let mut data = vec![0.0f32; plane * 3];
    for (x, y, pixel) in resized.enumerate_pixels() {
        let offset = y as usize * max_width as usize + x as usize;
        for channel in 0..3 {
            let value = pixel[2 - channel] as f32 / 255.0;
            data[channel * plane + offset] = (value - 0.5) / 0.5;
        }
    }

    Array4::from_shape_vec((1, 3, height as usize, max_width as usize), data)
        .map_err(|err| OcrError::backend(format!("failed to build line tensor: {err}")))
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::line_tensor;

    #[test]
    fn pads_narrow_lines_with_zeros() {
        let crop = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        let tensor = line_tensor(&crop, 48, 192).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 48, 192]);
        assert!((tensor[[0, 0, 0, 0]] - 1.0).abs() < 1e-6);
        assert_eq!(tensor[[0, 2, 47, 191]], 0.0);
    }

    #[test]
    fn wide_lines_are_squeezed_to_max_width() {
        let crop = RgbImage::from_pixel(1000, 10, Rgb([0, 0, 0]));
        let tensor = line_tensor(&crop, 48, 320).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 48, 320]);
        assert!((tensor[[0, 1, 20, 319]] + 1.0).abs() < 1e-6);
    }
}
