use crate::OcrError;

pub(super) const REC_HEIGHT: u32 = 48;
const REC_MIN_WIDTH: u32 = 320;
const REC_MAX_WIDTH: u32 = 3200;

/// Recogniser input width for a crop: wide enough for its aspect ratio at
/// the model height, never narrower than the model's base width.
pub(super) fn recognition_width(crop_w: u32, crop_h: u32) -> u32 {
    let ratio = crop_w as f32 / crop_h.max(1) as f32;
    let needed = (REC_HEIGHT as f32 * ratio).ceil() as u32;
    needed.clamp(REC_MIN_WIDTH, REC_MAX_WIDTH)
}

/// Greedy CTC decoding over `[.., T, C]` scores. Class 0 is the blank and
/// class `i` maps to `dictionary[i - 1]`. Repeated classes collapse unless a
/// blank separates them. The confidence is the mean score of emitted classes.
pub(super) fn ctc_greedy_decode(
    scores: &[f32],
    shape: &[usize],
    dictionary: &[String],
) -> Result<(String, f32), OcrError> {
    let [.., steps, classes] = shape else {
        return Err(OcrError::backend(format!(
            "unexpected recogniser output shape {shape:?}"
        )));
    };
    let (steps, classes) = (*steps, *classes);
    if classes != dictionary.len() + 1 {
        return Err(OcrError::backend(format!(
            "recogniser emits {classes} classes but the dictionary holds {} entries",
            dictionary.len()
        )));
    }
    if scores.len() < steps * classes {
        return Err(OcrError::backend(format!(
            "recogniser output shape {shape:?} does not match {} values",
            scores.len()
        )));
    }

    let mut text = String::new();
    let mut total = 0.0f32;
    let mut emitted = 0usize;
    let mut previous = None;
    for row in scores.chunks_exact(classes).take(steps) {
        let (best, score) = row
            .iter()
            .copied()
            .enumerate()
            .fold((0usize, f32::NEG_INFINITY), |acc, (index, value)| {
                if value > acc.1 { (index, value) } else { acc }
            });
        if best != 0 && previous != Some(best) {
            text.push_str(&dictionary[best - 1]);
            total += score;
            emitted += 1;
        }
        previous = Some(best);
    }

    let confidence = if emitted == 0 { 0.0 } else { total / emitted as f32 };
    Ok((text, confidence))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Vec<String> {
        ["版", "权", "页", " "].iter().map(|s| s.to_string()).collect()
    }

    fn scores(path: &[(usize, f32)], classes: usize) -> Vec<f32> {
        let mut out = Vec::with_capacity(path.len() * classes);
        for &(class, score) in path {
            let rest = (1.0 - score) / (classes - 1) as f32;
            out.extend((0..classes).map(|index| if index == class { score } else { rest }));
        }
        out
    }

    #[test]
    fn collapses_repeats_and_skips_blanks() {
        let path = [(1, 0.9), (1, 0.8), (0, 0.9), (1, 0.7), (2, 0.9), (4, 0.6), (3, 0.9)];
        let data = scores(&path, 5);
        let (text, confidence) = ctc_greedy_decode(&data, &[1, path.len(), 5], &dictionary()).unwrap();
        assert_eq!(text, "版版权 页");
        let expected = (0.9 + 0.7 + 0.9 + 0.6 + 0.9) / 5.0;
        assert!((confidence - expected).abs() < 1e-5);
    }

    #[test]
    fn all_blank_output_is_empty() {
        let data = scores(&[(0, 0.99), (0, 0.99)], 5);
        let (text, confidence) = ctc_greedy_decode(&data, &[1, 2, 5], &dictionary()).unwrap();
        assert!(text.is_empty());
        assert_eq!(confidence, 0.0);
    }

    #[test]
    fn class_count_must_match_dictionary() {
        let data = vec![0.0; 12];
        assert!(ctc_greedy_decode(&data, &[1, 3, 4], &dictionary()).is_err());
        assert!(ctc_greedy_decode(&data, &[1, 3, 5], &dictionary()).is_err());
    }

    #[test]
    fn width_follows_aspect_ratio() {
        assert_eq!(recognition_width(100, 48), 320);
        assert_eq!(recognition_width(480, 24), 960);
        assert_eq!(recognition_width(100_000, 10), 3200);
    }
}
