//! The descending font-size search.

use crate::measure::{FontSpec, TextMeasurer};
use crate::{FitSettings, Pt};

/// Upper bound of the per-word probe, and its result when a word never
/// reaches the wrap width.
const PROBE_CEILING_PX: u32 = 1000;

/// Returns the largest size in `(min_size_px, starting_size_px]` at which `text`,
/// wrapped greedily at `width`, takes at most `max_lines` lines.
///
/// * Blank text has no size: `None`.
/// * A zero width (non-finite widths collapse to zero in [`Pt`]) returns
///   `starting_size_px` without measuring anything. A negative width is searched
///   like any other: every word overflows it.
/// * If no size in the range fits, `min_size_px` is returned. The floor wins over
///   the line limit; the function never fails.
///
/// With `one_word_line_check` the answer is further capped at the smallest size
/// where some single word reaches `width`. With a non-zero `height_px` the
/// answer may be lowered for one-word-per-line layouts that overflow the height,
/// possibly below `min_size_px`.
///
/// Words are whitespace-separated runs, so punctuation stays glued to its word
/// and a word is never split across lines.
pub fn compute_font_size<M>(
    text: &str,
    width: Pt,
    settings: &FitSettings,
    measurer: &mut M,
) -> Option<u32>
where
    M: TextMeasurer + ?Sized,
{
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }
    if width.as_f32() == 0.0 {
        return Some(settings.starting_size_px);
    }

    let word_limit = if settings.one_word_line_check {
        Some(single_word_limit(&words, width, &settings.font_family, measurer))
    } else {
        None
    };

    let mut font_size = settings.starting_size_px;
    while font_size > settings.min_size_px {
        let font = FontSpec::new(&settings.font_family, font_size);
        match pack_words(&words, width, &font, Some(settings.max_lines), measurer) {
            Some(packing) => {
                let candidate = word_limit.map_or(font_size, |limit| font_size.min(limit));
                let fitted = fit_height(candidate, packing.line_count, words.len(), settings.height_px);
                log::debug!(
                    "fit {} words into {} lines at {font}, returning {fitted}px",
                    words.len(),
                    packing.line_count
                );
                return Some(fitted);
            }
            None => log::trace!("{font} needs more than {} lines", settings.max_lines),
        }
        font_size -= 1;
    }

    log::debug!(
        "no size above {}px fits {} lines at {width}",
        settings.min_size_px,
        settings.max_lines
    );
    Some(settings.min_size_px)
}

/// Lines produced by greedy packing at one size.
///
/// `line_count` counts every break, including one forced by a first word that
/// overflows an empty line, so it can exceed `lines.len()`.
#[derive(Debug, Clone, PartialEq)]
struct Packing {
    lines: Vec<String>,
    line_count: u32,
}

/// Greedy packing. Gives up with `None` as soon as the break count exceeds
/// `max_lines`.
fn pack_words<M>(
    words: &[&str],
    width: Pt,
    font: &FontSpec<'_>,
    max_lines: Option<u32>,
    measurer: &mut M,
) -> Option<Packing>
where
    M: TextMeasurer + ?Sized,
{
    let mut lines = Vec::new();
    let mut line_count = 1u32;
    let mut buffer = String::new();

    for word in words {
        let line_start = buffer.len();
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(word);

        if measurer.measure(font, &buffer) > width.as_f32() {
            line_count += 1;
            if max_lines.is_some_and(|max| line_count > max) {
                return None;
            }
            buffer.truncate(line_start);
            if !buffer.is_empty() {
                lines.push(std::mem::take(&mut buffer));
            }
            buffer.push_str(word);
        }
    }

    if !buffer.is_empty() {
        lines.push(buffer);
    }
    Some(Packing { lines, line_count })
}

/// Smallest size at which any single word alone reaches `width`.
fn single_word_limit<M>(words: &[&str], width: Pt, family: &str, measurer: &mut M) -> u32
where
    M: TextMeasurer + ?Sized,
{
    words.iter().fold(PROBE_CEILING_PX, |limit, word| {
        let mut size = 1;
        while size < PROBE_CEILING_PX
            && measurer.measure(&FontSpec::new(family, size), word) < width.as_f32()
        {
            size += 1;
        }
        log::trace!("{word:?} reaches {width} at {size}px");
        limit.min(size)
    })
}

/// Lowers `candidate` when every word sits on its own line (two or more of
/// them) and the stacked lines overflow `height`. Any other layout is left as is.
fn fit_height(candidate: u32, line_count: u32, word_count: usize, height: Pt) -> u32 {
    if !height.is_positive() || word_count < 2 || line_count as usize != word_count {
        return candidate;
    }
    let lines = line_count as f32;
    if Pt::from(candidate) * lines > height {
        (height / lines).to_u32_floor()
    } else {
        candidate
    }
}

/// Wraps `text` at `width` the way the search does and returns the lines.
///
/// Useful for rendering at the size [`compute_font_size`] picked. Blank text
/// yields no lines; a word wider than `width` gets a line of its own.
pub fn wrap_lines<M>(text: &str, width: Pt, font: &FontSpec<'_>, measurer: &mut M) -> Vec<String>
where
    M: TextMeasurer + ?Sized,
{
    let words: Vec<&str> = text.split_whitespace().collect();
    pack_words(&words, width, font, None, measurer)
        .map(|packing| packing.lines)
        .unwrap_or_default()
}

/// A measurer bundled with the settings it sizes text under.
#[derive(Debug)]
pub struct FitSizer<M> {
    settings: FitSettings,
    measurer: M,
}

impl<M: TextMeasurer> FitSizer<M> {
    pub fn new(settings: FitSettings, measurer: M) -> Self {
        Self { settings, measurer }
    }

    pub fn settings(&self) -> &FitSettings {
        &self.settings
    }

    pub fn measurer_mut(&mut self) -> &mut M {
        &mut self.measurer
    }

    /// See [`compute_font_size`].
    pub fn compute_font_size(&mut self, text: &str, width: Pt) -> Option<u32> {
        compute_font_size(text, width, &self.settings, &mut self.measurer)
    }

    /// Lines of `text` at `size_px` in the configured family.
    pub fn wrap_lines(&mut self, text: &str, width: Pt, size_px: u32) -> Vec<String> {
        let font = FontSpec::new(&self.settings.font_family, size_px);
        wrap_lines(text, width, &font, &mut self.measurer)
    }

    pub fn into_inner(self) -> M {
        self.measurer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is `ratio` em wide.
    struct MonoMeasurer {
        ratio: f32,
        calls: Vec<(String, u32)>,
    }

    impl MonoMeasurer {
        fn new() -> Self {
            Self {
                ratio: 0.5,
                calls: Vec::new(),
            }
        }
    }

    impl TextMeasurer for MonoMeasurer {
        fn measure(&mut self, font: &FontSpec<'_>, text: &str) -> f32 {
            self.calls.push((font.family.to_string(), font.size_px));
            text.chars().count() as f32 * font.size_px as f32 * self.ratio
        }
    }

    fn fit(text: &str, width: f32, settings: &FitSettings) -> Option<u32> {
        compute_font_size(text, Pt::from(width), settings, &mut MonoMeasurer::new())
    }

    #[test]
    fn test_short_text_keeps_starting_size() {
        assert_eq!(fit("Hello world", 1000.0, &FitSettings::default()), Some(90));
    }

    #[test]
    fn test_long_sentence_falls_back_to_min() {
        let text = "A very long sentence that will not fit on two lines easily";
        assert_eq!(fit(text, 50.0, &FitSettings::default()), Some(30));
    }

    #[test]
    fn test_blank_text_has_no_size() {
        let mut measurer = MonoMeasurer::new();
        let settings = FitSettings::default();
        assert_eq!(compute_font_size("", Pt::from(300u32), &settings, &mut measurer), None);
        assert_eq!(
            compute_font_size(" \t\n ", Pt::from(300u32), &settings, &mut measurer),
            None
        );
        assert!(measurer.calls.is_empty());
    }

    #[test]
    fn test_zero_width_returns_starting_size_unmeasured() {
        let mut measurer = MonoMeasurer::new();
        let settings = FitSettings::default().with_starting_size(72);
        for width in [0.0f32, -0.0, f32::NAN, f32::INFINITY] {
            assert_eq!(
                compute_font_size("some words", Pt::from(width), &settings, &mut measurer),
                Some(72)
            );
        }
        assert!(measurer.calls.is_empty());
    }

    #[test]
    fn test_negative_width_is_searched() {
        let text = "A very long sentence that will not fit on two lines easily";
        let mut measurer = MonoMeasurer::new();
        let settings = FitSettings::default();
        let below = compute_font_size(text, Pt::from(-5.0f32), &settings, &mut measurer);
        assert_eq!(below, Some(30));
        assert!(!measurer.calls.is_empty());
        assert!(below <= fit(text, 5.0, &settings));
    }

    #[test]
    fn test_probe_stops_at_ceiling_for_weightless_words() {
        let settings = FitSettings::default()
            .with_starting_size(1200)
            .with_min_size(1100);
        let mut weightless = |_: &FontSpec<'_>, _: &str| 0.0f32;
        assert_eq!(
            compute_font_size("never reaches", Pt::from(100u32), &settings, &mut weightless),
            Some(1200)
        );
        let checked = settings.with_one_word_line_check(true);
        assert_eq!(
            compute_font_size("never reaches", Pt::from(100u32), &checked, &mut weightless),
            Some(1000)
        );
    }

    #[test]
    fn test_max_lines_bound() {
        // 4-char words are 2s wide, two of them with a space 4.5s, three 7s.
        let text = "aaaa bbbb cccc dddd";
        let settings = FitSettings::default().with_starting_size(40).with_min_size(5);
        assert_eq!(fit(text, 100.0, &settings.clone().with_max_lines(4)), Some(40));
        assert_eq!(fit(text, 100.0, &settings.clone().with_max_lines(2)), Some(22));
        assert_eq!(fit(text, 100.0, &settings.with_max_lines(1)), Some(10));
    }

    #[test]
    fn test_overlong_words_exhaust_the_search() {
        let settings = FitSettings::default();
        assert_eq!(fit("Antidisestablishment Supercalifragilistic", 10.0, &settings), Some(30));
        // A lone overflowing word breaks once, which still fits two lines.
        assert_eq!(fit("Supercalifragilistic", 10.0, &settings), Some(90));
        assert_eq!(fit("Supercalifragilistic", 10.0, &settings.with_max_lines(1)), Some(30));
    }

    #[test]
    fn test_inverted_bounds_return_min_without_measuring() {
        let mut measurer = MonoMeasurer::new();
        let settings = FitSettings::default().with_starting_size(40).with_min_size(50);
        assert_eq!(
            compute_font_size("hello", Pt::from(500u32), &settings, &mut measurer),
            Some(50)
        );
        assert!(measurer.calls.is_empty());
    }

    #[test]
    fn test_result_within_bounds_and_monotonic_in_width() {
        let text = "The quick brown fox jumps over the lazy dog, twice-over";
        let settings = FitSettings::default();
        let mut previous = 0;
        for width in (25..=2000).step_by(25) {
            let size = fit(text, width as f32, &settings).unwrap();
            assert!((30..=90).contains(&size), "size {size} at width {width}");
            assert!(size >= previous, "size dropped at width {width}");
            previous = size;
        }
    }

    #[test]
    fn test_repeatable() {
        let text = "Repeated calls give the same answer";
        let settings = FitSettings::default().with_max_lines(3);
        let first = fit(text, 420.0, &settings);
        assert_eq!(fit(text, 420.0, &settings), first);
    }

    #[test]
    fn test_every_measurement_names_the_probed_font() {
        let mut measurer = MonoMeasurer::new();
        let settings = FitSettings::default().with_font_family("'Avenir Next W01', sans-serif");
        compute_font_size("many words here to wrap", Pt::from(200u32), &settings, &mut measurer);
        assert!(!measurer.calls.is_empty());
        let mut last = u32::MAX;
        for (family, size) in &measurer.calls {
            assert_eq!(family, "'Avenir Next W01', sans-serif");
            assert!(*size <= last && *size <= 90 && *size > 30);
            last = *size;
        }
    }

    #[test]
    fn test_one_word_line_check_caps_size() {
        // "enormousword" reaches 100px at 17px; the pair fits two lines up to 50px.
        let text = "tiny enormousword";
        let settings = FitSettings::default().with_min_size(5);
        assert_eq!(fit(text, 100.0, &settings), Some(50));
        assert_eq!(fit(text, 100.0, &settings.with_one_word_line_check(true)), Some(17));
    }

    #[test]
    fn test_one_word_line_check_leaves_fitting_size_alone() {
        let settings = FitSettings::default().with_one_word_line_check(true);
        // Both words reach 1000px only beyond 90px.
        assert_eq!(fit("ab cd", 1000.0, &settings), Some(90));
    }

    #[test]
    fn test_height_lowers_one_word_per_line() {
        // At 40px each word fills its own line: two lines of 40px.
        let settings = FitSettings::default().with_starting_size(40).with_min_size(10);
        assert_eq!(fit("aaaa bbbb", 100.0, &settings), Some(40));
        assert_eq!(fit("aaaa bbbb", 100.0, &settings.clone().with_height(Pt::from(60u32))), Some(30));
        assert_eq!(fit("aaaa bbbb", 100.0, &settings.clone().with_height(Pt::from(100u32))), Some(40));
        // Below the minimum is allowed here.
        assert_eq!(fit("aaaa bbbb", 100.0, &settings.with_height(Pt::from(16u32))), Some(8));
    }

    #[test]
    fn test_height_ignores_shared_lines() {
        let settings = FitSettings::default()
            .with_starting_size(40)
            .with_min_size(5)
            .with_height(Pt::from(10u32));
        assert_eq!(fit("aaaa bbbb cccc", 100.0, &settings), Some(22));
    }

    #[test]
    fn test_wrap_lines_matches_search() {
        let mut measurer = MonoMeasurer::new();
        let font = FontSpec::new("sans-serif", 22);
        assert_eq!(
            wrap_lines("aaaa  bbbb\ncccc", Pt::from(100u32), &font, &mut measurer),
            vec!["aaaa bbbb".to_string(), "cccc".to_string()]
        );
        assert!(wrap_lines("   ", Pt::from(100u32), &font, &mut measurer).is_empty());
    }

    #[test]
    fn test_wrap_lines_keeps_punctuation_attached() {
        let mut measurer = MonoMeasurer::new();
        let font = FontSpec::new("sans-serif", 10);
        // Ten chars fill 50px at 10px; "well-known" moves down as one unit.
        assert_eq!(
            wrap_lines("a well-known fact", Pt::from(50u32), &font, &mut measurer),
            vec!["a".to_string(), "well-known".to_string(), "fact".to_string()]
        );
    }

    #[test]
    fn test_sizer_with_closure_measurer() {
        let measurer = |font: &FontSpec<'_>, text: &str| text.len() as f32 * font.size_px as f32 * 0.5;
        let mut sizer = FitSizer::new(FitSettings::default(), measurer);
        assert_eq!(sizer.compute_font_size("Hello world", Pt::from(1000u32)), Some(90));
        assert_eq!(sizer.compute_font_size("", Pt::from(1000u32)), None);
        assert_eq!(sizer.wrap_lines("Hello world", Pt::from(1000u32), 90), vec!["Hello world".to_string()]);
    }
}
