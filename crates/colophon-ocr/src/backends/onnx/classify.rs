use crate::OcrError;

pub(super) const CLS_HEIGHT: u32 = 48;
pub(super) const CLS_WIDTH: u32 = 192;

/// Reads a two-class orientation output; true when the line is upside down
/// with a score above `threshold`.
pub(super) fn is_rotated(scores: &[f32], threshold: f32) -> Result<bool, OcrError> {
    let [upright, rotated, ..] = scores else {
        return Err(OcrError::backend(format!(
            "angle classifier produced {} scores, expected 2",
            scores.len()
        )));
    };
    Ok(rotated > upright && *rotated > threshold)
}

#[cfg(test)]
mod tests {
    use super::is_rotated;

    #[test]
    fn rotation_requires_confident_second_class() {
        assert!(is_rotated(&[0.05, 0.95], 0.9).unwrap());
        assert!(!is_rotated(&[0.15, 0.85], 0.9).unwrap());
        assert!(!is_rotated(&[0.95, 0.05], 0.9).unwrap());
        assert!(is_rotated(&[0.5], 0.9).is_err());
    }
}
