//! Shrinkfit - find the font size at which text wraps into a fixed number of lines.
//!
//! Start at a large size and step down until the text, word-wrapped at a given
//! width, takes no more than `max_lines` lines. Text is measured through a
//! [`TextMeasurer`]; [`GlyphMeasurer`] measures with real font files.
//!
//! # Example
//! ```
//! use shrinkfit::{FitSettings, FontSpec, Pt, compute_font_size};
//!
//! // Every character is half an em wide.
//! let mut measurer = |font: &FontSpec<'_>, text: &str| {
//!     text.chars().count() as f32 * font.size_px as f32 * 0.5
//! };
//!
//! let settings = FitSettings::default().with_max_lines(2);
//! let size = compute_font_size("Hello world", Pt::from(1000u32), &settings, &mut measurer);
//! assert_eq!(size, Some(90));
//! ```
//!
//! With a font file:
//! ```no_run
//! use shrinkfit::{FitSettings, FitSizer, GlyphMeasurer, Pt};
//!
//! let measurer = GlyphMeasurer::from_file("assets/DejaVuSans.ttf")?;
//! let mut sizer = FitSizer::new(FitSettings::default(), measurer);
//! let size = sizer.compute_font_size("Shrink me until I fit", Pt::from(400u32));
//! # Ok::<(), shrinkfit::FontError>(())
//! ```

mod font;
mod glyph_cache;
mod measure;
mod pt;
mod settings;
mod sizer;

pub use font::{FontError, GlyphMeasurer, family_names, load_font_from_bytes, load_font_from_file};
pub use measure::{FontSpec, TextMeasurer};
pub use pt::Pt;
pub use settings::{FitOverrides, FitSettings, SettingsError};
pub use sizer::{FitSizer, compute_font_size, wrap_lines};
