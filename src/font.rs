//! Font loading and an `ab_glyph`-backed [`TextMeasurer`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ab_glyph::{Font as _, FontArc, GlyphId, PxScale, ScaleFont as _};

use crate::glyph_cache::{GlyphCache, GlyphCacheKey};
use crate::measure::{FontSpec, TextMeasurer};

/// Errors raised while loading a font face.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// The font file could not be read.
    #[error("failed to load font from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a font `ab_glyph` can parse.
    #[error("failed to parse font: {0}")]
    Parse(#[from] ab_glyph::InvalidFont),
}

pub fn load_font_from_file(path: impl AsRef<Path>) -> Result<FontArc, FontError> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_font_from_bytes(data)
}

pub fn load_font_from_bytes(data: Vec<u8>) -> Result<FontArc, FontError> {
    Ok(FontArc::try_from_vec(data)?)
}

/// Splits a CSS font-family list into bare family names.
///
/// `"'Avenir Next W01', sans-serif"` yields `Avenir Next W01` then `sans-serif`.
pub fn family_names(list: &str) -> impl Iterator<Item = &str> {
    list.split(',')
        .map(|name| name.trim().trim_matches(|c: char| c == '\'' || c == '"').trim())
        .filter(|name| !name.is_empty())
}

const FALLBACK_FONT_ID: u32 = 0;

/// Measures text with real font outlines.
///
/// Faces are registered under family names; a [`FontSpec`] family list resolves
/// to the first registered name it mentions, or to the fallback face. Sizes are
/// em sizes in CSS pixels, the way a canvas `font` string reads them.
pub struct GlyphMeasurer {
    fallback: FontArc,
    font_registry: HashMap<u32, FontArc>,
    family_ids: HashMap<String, u32>,
    next_font_id: u32,
    advances: GlyphCache,
}

impl GlyphMeasurer {
    /// Creates a measurer whose only face is `fallback`.
    pub fn new(fallback: FontArc) -> Self {
        Self {
            fallback,
            font_registry: HashMap::new(),
            family_ids: HashMap::new(),
            next_font_id: FALLBACK_FONT_ID + 1,
            advances: GlyphCache::new(),
        }
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontError> {
        Ok(Self::new(load_font_from_bytes(data)?))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FontError> {
        Ok(Self::new(load_font_from_file(path)?))
    }

    /// Registers `font` under `family`, replacing any face already registered
    /// under the same name (case-insensitive). Returns the new font id.
    pub fn register_font(&mut self, family: &str, font: FontArc) -> u32 {
        let font_id = self.next_font_id;
        self.next_font_id = self.next_font_id.saturating_add(1);
        self.font_registry.insert(font_id, font);
        if let Some(previous) = self.family_ids.insert(family.to_lowercase(), font_id) {
            self.forget_font(previous);
        }
        log::debug!("registered font family {family:?} as id {font_id}");
        font_id
    }

    /// Removes the face registered under `family`. Returns whether one was registered.
    pub fn unregister_font(&mut self, family: &str) -> bool {
        match self.family_ids.remove(&family.to_lowercase()) {
            Some(font_id) => {
                self.forget_font(font_id);
                true
            }
            None => false,
        }
    }

    /// Number of glyph advances currently memoized.
    pub fn cached_glyphs(&self) -> usize {
        self.advances.len()
    }

    fn forget_font(&mut self, font_id: u32) {
        self.font_registry.remove(&font_id);
        self.advances.evict_font(font_id);
    }

    fn resolve(&self, family_list: &str) -> (u32, &FontArc) {
        for name in family_names(family_list) {
            if let Some(&font_id) = self.family_ids.get(&name.to_lowercase()) {
                if let Some(font) = self.font_registry.get(&font_id) {
                    return (font_id, font);
                }
            }
        }
        log::trace!("no registered face for {family_list:?}, using fallback");
        (FALLBACK_FONT_ID, &self.fallback)
    }

    /// Width of a single line: advances plus pair kerning, no wrapping.
    pub fn line_width(&mut self, font: &FontSpec<'_>, text: &str) -> f32 {
        let (font_id, face) = self.resolve(font.family);
        let face = face.clone();
        let scaled = face.as_scaled(em_scale(&face, font.size_px));

        let mut width = 0.0f32;
        let mut prev: Option<GlyphId> = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(p) = prev {
                width += scaled.kern(p, id);
            }
            let key = GlyphCacheKey {
                font_id,
                font_size_px: font.size_px,
                glyph_id: id.0,
            };
            width += self
                .advances
                .get_or_insert_with(key, || scaled.h_advance(id));
            prev = Some(id);
        }

        width
    }
}

impl std::fmt::Debug for GlyphMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphMeasurer")
            .field("fonts", &self.font_registry.len())
            .field("families", &self.family_ids)
            .field("cached_glyphs", &self.advances.len())
            .finish()
    }
}

impl TextMeasurer for GlyphMeasurer {
    fn measure(&mut self, font: &FontSpec<'_>, text: &str) -> f32 {
        self.line_width(font, text)
    }
}

/// `ab_glyph` scales by ascent-to-descent height; CSS sizes are em sizes.
fn em_scale(font: &FontArc, size_px: u32) -> PxScale {
    let px = size_px.max(1) as f32;
    font.pt_to_px_scale(px * 72.0 / 96.0)
        .unwrap_or_else(|| PxScale::from(px))
}
