/// Axis-aligned box around one detected text line, in source image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TextBounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Integer pixel rectangle `(x, y, width, height)` clamped to an image of
    /// `image_width` × `image_height`. `None` when nothing is left.
    pub fn pixel_rect(&self, image_width: u32, image_height: u32) -> Option<(u32, u32, u32, u32)> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let max_w = image_width as f32;
        let max_h = image_height as f32;
        let left = self.x.floor().clamp(0.0, max_w) as u32;
        let top = self.y.floor().clamp(0.0, max_h) as u32;
        let right = self.right().ceil().clamp(0.0, max_w) as u32;
        let bottom = self.bottom().ceil().clamp(0.0, max_h) as u32;
        let width = right.saturating_sub(left);
        let height = bottom.saturating_sub(top);
        if width == 0 || height == 0 {
            return None;
        }
        Some((left, top, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::TextBounds;

    #[test]
    fn pixel_rect_clamps_to_image() {
        let bounds = TextBounds::new(-3.5, 10.2, 120.0, 20.0);
        assert_eq!(bounds.pixel_rect(100, 200), Some((0, 10, 100, 21)));
    }

    #[test]
    fn pixel_rect_rejects_outside_boxes() {
        let bounds = TextBounds::new(150.0, 10.0, 20.0, 20.0);
        assert_eq!(bounds.pixel_rect(100, 200), None);
        let flat = TextBounds::new(10.0, 10.0, 0.0, 20.0);
        assert_eq!(flat.pixel_rect(100, 200), None);
    }
}
