use crate::region::TextBounds;

/// One recognised text line.
#[derive(Debug, Clone)]
pub struct OcrText {
    pub bounds: TextBounds,
    pub text: String,
    pub confidence: Option<f32>,
}

impl OcrText {
    pub fn new(bounds: TextBounds, text: String) -> Self {
        Self {
            bounds,
            text,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, value: f32) -> Self {
        self.confidence = Some(value);
        self
    }
}

/// Recognised lines in detection order.
#[derive(Debug, Clone, Default)]
pub struct OcrResponse {
    pub texts: Vec<OcrText>,
}

impl OcrResponse {
    pub fn new(texts: Vec<OcrText>) -> Self {
        Self { texts }
    }

    pub fn empty() -> Self {
        Self { texts: Vec::new() }
    }

    /// Builds a response from bare strings; bounds are left zeroed.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let texts = lines
            .into_iter()
            .map(|line| OcrText::new(TextBounds::new(0.0, 0.0, 0.0, 0.0), line.into()))
            .collect();
        Self { texts }
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn lines(&self) -> Vec<&str> {
        self.texts.iter().map(|entry| entry.text.as_str()).collect()
    }
}
