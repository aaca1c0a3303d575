use crate::config::GlyphMetrics;
use crate::text_metrics;

/// Vertical extent of a single text line relative to its font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.18;

const FALLBACK_WIDTH_FACTOR: f32 = 0.54;

/// Unrotated footprint of a word in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordExtent {
    pub width: f32,
    pub height: f32,
}

/// Measure a word at `font_size`.
///
/// The default mode sums a fixed per-glyph width factor, which keeps layout
/// independent of installed fonts. Font mode asks the system text measurer
/// and falls back to the table when no face matches `family`.
pub fn measure_word(text: &str, font_size: f32, metrics: GlyphMetrics, family: &str) -> WordExtent {
    let width = match metrics {
        GlyphMetrics::Heuristic => heuristic_width(text, font_size),
        GlyphMetrics::Font => text_metrics::measure_text_width(text, font_size, family)
            .unwrap_or_else(|| heuristic_width(text, font_size)),
    };
    WordExtent {
        width,
        height: font_size * LINE_HEIGHT_FACTOR,
    }
}

fn heuristic_width(text: &str, font_size: f32) -> f32 {
    let units: f32 = text.chars().map(char_width_factor).sum();
    units * font_size
}

// Advance widths relative to font size for a generic proportional face.
// Tokens are lowercase ASCII after tokenization; anything else takes the
// fallback factor.
fn char_width_factor(ch: char) -> f32 {
    match ch {
        'i' | 'j' | 'l' => 0.28,
        'f' | 't' => 0.36,
        'r' => 0.40,
        's' => 0.46,
        'a' | 'c' | 'e' | 'g' | 'v' | 'x' | 'y' | 'z' => 0.52,
        'b' | 'd' | 'h' | 'k' | 'n' | 'o' | 'p' | 'q' | 'u' => 0.56,
        'm' | 'w' => 0.82,
        _ => FALLBACK_WIDTH_FACTOR,
    }
}
