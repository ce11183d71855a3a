use std::path::Path;

/// OCR invocation metadata.
#[derive(Debug, Clone, Copy)]
pub struct OcrRequest<'a> {
    image: &'a Path,
}

impl<'a> OcrRequest<'a> {
    pub fn new(image: &'a Path) -> Self {
        Self { image }
    }

    /// Raster image file to read.
    pub fn image(&self) -> &'a Path {
        self.image
    }
}
