use std::collections::HashMap;

/// Key for caching individual glyph advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct GlyphCacheKey {
    pub font_id: u32,
    pub font_size_px: u32,
    pub glyph_id: u16,
}

/// Horizontal advances already computed for a font at a size.
///
/// The sizer measures the same words at every candidate size, so the hit rate is high.
#[derive(Debug)]
pub(crate) struct GlyphCache {
    advances: HashMap<GlyphCacheKey, f32>,
}

impl GlyphCache {
    pub(crate) fn new() -> Self {
        Self {
            advances: HashMap::new(),
        }
    }

    pub(crate) fn get_or_insert_with(
        &mut self,
        key: GlyphCacheKey,
        advance: impl FnOnce() -> f32,
    ) -> f32 {
        *self.advances.entry(key).or_insert_with(advance)
    }

    /// Drops every advance cached for `font_id`.
    pub(crate) fn evict_font(&mut self, font_id: u32) {
        self.advances.retain(|key, _| key.font_id != font_id);
    }

    pub(crate) fn len(&self) -> usize {
        self.advances.len()
    }
}

impl Default for GlyphCache {
    fn default() -> Self {
        Self::new()
    }
}
