//! Shrinkfit CLI
//!
//! Prints the largest font size at which the given text wraps into the
//! configured number of lines.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use env_logger::{Builder, Env};
use shrinkfit::{FitOverrides, FitSettings, FitSizer, GlyphMeasurer, Pt, load_font_from_file};

#[derive(Parser)]
#[command(name = "shrinkfit")]
#[command(about = "Find the font size at which text fits a number of lines", long_about = None)]
struct Cli {
    /// Text to fit; multiple arguments are joined with spaces
    #[arg(required = true)]
    text: Vec<String>,

    /// Font file to measure with
    #[arg(short, long)]
    font: PathBuf,

    /// Wrap width in pixels
    #[arg(short, long)]
    width: f32,

    /// Family name to register the font under (default: the configured family)
    #[arg(long)]
    family: Option<String>,

    /// JSON file of settings overrides, applied before the flags below
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Maximum number of lines
    #[arg(long)]
    max_lines: Option<u32>,

    /// Size to start the search from, in pixels
    #[arg(long)]
    starting_size: Option<u32>,

    /// Size returned when nothing larger fits, in pixels
    #[arg(long)]
    min_size: Option<u32>,

    /// Never let a single word overflow the width
    #[arg(long)]
    one_word_line_check: bool,

    /// Total height limit in pixels
    #[arg(long)]
    height: Option<f32>,

    /// Also print the wrapped lines at the chosen size
    #[arg(long)]
    lines: bool,
}

impl Cli {
    fn overrides(&self) -> FitOverrides {
        FitOverrides {
            max_lines: self.max_lines,
            font_family: None,
            starting_size_px: self.starting_size,
            min_size_px: self.min_size,
            one_word_line_check: self.one_word_line_check.then_some(true),
            height_px: self.height.map(Pt::from),
        }
    }

    fn fit_settings(&self) -> anyhow::Result<FitSettings> {
        let settings = match &self.settings {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read settings from {}", path.display()))?;
                FitSettings::from_json_str(&json)
                    .with_context(|| format!("failed to parse settings in {}", path.display()))?
            }
            None => FitSettings::default(),
        };
        Ok(settings.merged(self.overrides()))
    }
}

fn main() -> anyhow::Result<()> {
    Builder::from_env(Env::default().filter_or("RUST_LOG", "warn")).init();

    let cli = Cli::parse();
    let settings = cli.fit_settings()?;

    let font = load_font_from_file(&cli.font)?;
    let mut measurer = GlyphMeasurer::new(font.clone());
    let family = cli.family.as_deref().unwrap_or(&settings.font_family);
    for name in shrinkfit::family_names(family) {
        measurer.register_font(name, font.clone());
    }

    let text = cli.text.join(" ");
    let width = Pt::from(cli.width);
    let mut sizer = FitSizer::new(settings, measurer);

    let Some(size) = sizer.compute_font_size(&text, width) else {
        log::warn!("nothing to fit: text is blank");
        return Ok(());
    };

    println!("{size}");
    if cli.lines {
        for line in sizer.wrap_lines(&text, width, size) {
            println!("{line}");
        }
    }
    log::debug!("{} glyph advances cached", sizer.measurer_mut().cached_glyphs());
    Ok(())
}
