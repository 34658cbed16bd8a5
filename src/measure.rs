use std::fmt;

/// The font a measurement is taken under: a CSS family list and a pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontSpec<'a> {
    pub family: &'a str,
    pub size_px: u32,
}

impl<'a> FontSpec<'a> {
    pub fn new(family: &'a str, size_px: u32) -> Self {
        Self { family, size_px }
    }
}

impl fmt::Display for FontSpec<'_> {
    /// Formats as the CSS `font` shorthand, e.g. `90px sans-serif`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

/// Reports the rendered width of a string.
///
/// Every call names the font it is measured under, so an implementation that
/// keeps a "current font" register must switch to `font` before measuring.
/// Implementations may cache freely; they are driven from one thread at a time.
pub trait TextMeasurer {
    /// Width of `text` in pixels when set in `font`.
    fn measure(&mut self, font: &FontSpec<'_>, text: &str) -> f32;
}

impl<F> TextMeasurer for F
where
    F: FnMut(&FontSpec<'_>, &str) -> f32,
{
    fn measure(&mut self, font: &FontSpec<'_>, text: &str) -> f32 {
        self(font, text)
    }
}
