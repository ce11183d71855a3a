use gpui::*;

/// Black, white and greys; follows the window appearance.
#[derive(Clone, Copy, Debug)]
pub struct AppTheme {
    pub is_dark: bool,
}

impl AppTheme {
    pub fn light() -> Self {
        Self { is_dark: false }
    }

    pub fn dark() -> Self {
        Self { is_dark: true }
    }

    pub fn from_appearance(appearance: WindowAppearance) -> Self {
        match appearance {
            WindowAppearance::Dark | WindowAppearance::VibrantDark => Self::dark(),
            WindowAppearance::Light | WindowAppearance::VibrantLight => Self::light(),
        }
    }

    pub fn background(&self) -> Hsla {
        if self.is_dark {
            hsla(0.0, 0.0, 0.05, 1.0)
        } else {
            hsla(0.0, 0.0, 0.98, 1.0)
        }
    }

    pub fn surface(&self) -> Hsla {
        if self.is_dark {
            hsla(0.0, 0.0, 0.12, 1.0)
        } else {
            hsla(0.0, 0.0, 1.0, 1.0)
        }
    }

    pub fn text_primary(&self) -> Hsla {
        if self.is_dark {
            hsla(0.0, 0.0, 0.95, 1.0)
        } else {
            hsla(0.0, 0.0, 0.1, 1.0)
        }
    }

    pub fn text_tertiary(&self) -> Hsla {
        if self.is_dark {
            hsla(0.0, 0.0, 0.45, 1.0)
        } else {
            hsla(0.0, 0.0, 0.55, 1.0)
        }
    }

    pub fn border(&self) -> Hsla {
        if self.is_dark {
            hsla(0.0, 0.0, 0.25, 1.0)
        } else {
            hsla(0.0, 0.0, 0.2, 1.0)
        }
    }

    pub fn accent(&self) -> Hsla {
        if self.is_dark {
            hsla(0.0, 0.0, 0.8, 1.0)
        } else {
            hsla(0.0, 0.0, 0.2, 1.0)
        }
    }

    pub fn accent_hover(&self) -> Hsla {
        if self.is_dark {
            hsla(0.0, 0.0, 0.9, 1.0)
        } else {
            hsla(0.0, 0.0, 0.1, 1.0)
        }
    }

    /// Label color on top of [`AppTheme::accent`].
    pub fn on_accent(&self) -> Hsla {
        if self.is_dark {
            hsla(0.0, 0.0, 0.05, 1.0)
        } else {
            hsla(0.0, 0.0, 0.98, 1.0)
        }
    }

    pub fn disabled(&self) -> Hsla {
        if self.is_dark {
            hsla(0.0, 0.0, 0.18, 1.0)
        } else {
            hsla(0.0, 0.0, 0.88, 1.0)
        }
    }
}
