use crate::theme::Theme;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// How word extents are measured before rasterization.
///
/// `Heuristic` uses per-character width factors and needs no fonts on the
/// host, which keeps layouts portable across machines. `Font` reads glyph
/// advances from the system font database and falls back to the heuristic
/// when the family cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphMetrics {
    Heuristic,
    Font,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Tokens shorter than this are dropped.
    pub min_word_length: usize,
    /// Ranking is cut to the top N words.
    pub max_words: usize,
    /// Matched case-insensitively after normalization.
    pub stopwords: Vec<String>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            min_word_length: 3,
            max_words: 100,
            stopwords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub width: f32,
    pub height: f32,
    /// Font size of a weight-zero word in `base + weight * scale`.
    pub base_font_size: f32,
    pub font_size_scale: f32,
    /// Clearance in pixels added around every word before rasterization.
    pub padding: f32,
    /// Pixels per occupancy grid cell. Smaller cells pack tighter and cost
    /// more per collision test.
    pub cell_size: f32,
    /// A word is abandoned once its spiral radius exceeds this factor of
    /// the larger canvas dimension.
    pub max_radius_factor: f32,
    /// Spiral angle increment per candidate, in radians.
    pub spiral_step: f32,
    /// Spiral radius gained per radian, in pixels.
    pub spiral_growth: f32,
    /// Number of discrete rotation angles, evenly spaced over
    /// `[-rotation_range_deg, rotation_range_deg]`.
    pub rotation_buckets: u32,
    pub rotation_range_deg: f32,
    pub seed: u64,
    /// Total candidate positions the run may evaluate before it is cut off
    /// with a truncated partial result. `None` means unbounded.
    pub run_budget: Option<u64>,
    /// Wall-clock cut-off for the run, in milliseconds. Trades determinism
    /// of the placed set for a latency bound, so it is opt-in.
    pub deadline_ms: Option<u64>,
    pub glyph_metrics: GlyphMetrics,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            base_font_size: 10.0,
            font_size_scale: 5.0,
            padding: 2.0,
            cell_size: 2.0,
            max_radius_factor: 1.0,
            spiral_step: 0.1,
            spiral_growth: 2.0,
            rotation_buckets: 7,
            rotation_range_deg: 90.0,
            seed: 0,
            run_budget: None,
            deadline_ms: None,
            glyph_metrics: GlyphMetrics::Heuristic,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.width.is_finite())
            || !(self.height > 0.0 && self.height.is_finite())
        {
            return Err(ConfigError::Canvas {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.base_font_size > 0.0 && self.base_font_size.is_finite()) {
            return Err(ConfigError::BaseFontSize(self.base_font_size));
        }
        if !(self.font_size_scale >= 0.0 && self.font_size_scale.is_finite()) {
            return Err(ConfigError::FontSizeScale(self.font_size_scale));
        }
        if !(self.padding >= 0.0 && self.padding.is_finite()) {
            return Err(ConfigError::Padding(self.padding));
        }
        if !(self.cell_size > 0.0 && self.cell_size.is_finite()) {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        if !(self.max_radius_factor > 0.0 && self.max_radius_factor.is_finite()) {
            return Err(ConfigError::MaxRadiusFactor(self.max_radius_factor));
        }
        if !(self.spiral_step > 0.0 && self.spiral_step.is_finite())
            || !(self.spiral_growth > 0.0 && self.spiral_growth.is_finite())
        {
            return Err(ConfigError::Spiral {
                step: self.spiral_step,
                growth: self.spiral_growth,
            });
        }
        if self.rotation_buckets == 0 {
            return Err(ConfigError::RotationBuckets);
        }
        if !(self.rotation_range_deg >= 0.0 && self.rotation_range_deg <= 180.0) {
            return Err(ConfigError::RotationRange(self.rotation_range_deg));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Output scale for raster formats; 2.0 doubles the pixel density.
    pub scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scale > 0.0 && self.scale.is_finite()) {
            return Err(ConfigError::RenderScale(self.scale));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub tokenizer: TokenizerConfig,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        self.render.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("canvas dimensions must be positive, got {width}x{height}")]
    Canvas { width: f32, height: f32 },
    #[error("base font size must be positive, got {0}")]
    BaseFontSize(f32),
    #[error("font size scale must be non-negative, got {0}")]
    FontSizeScale(f32),
    #[error("padding must be non-negative, got {0}")]
    Padding(f32),
    #[error("cell size must be positive, got {0}")]
    CellSize(f32),
    #[error("max radius factor must be positive, got {0}")]
    MaxRadiusFactor(f32),
    #[error("spiral step and growth must be positive, got step {step} growth {growth}")]
    Spiral { step: f32, growth: f32 },
    #[error("at least one rotation bucket is required")]
    RotationBuckets,
    #[error("rotation range must be within 0..=180 degrees, got {0}")]
    RotationRange(f32),
    #[error("render scale must be positive, got {0}")]
    RenderScale(f32),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    tokenizer: Option<TokenizerFile>,
    layout: Option<LayoutFile>,
    render: Option<RenderFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ThemeVariables {
    font_family: Option<String>,
    background: Option<String>,
    word_colors: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TokenizerFile {
    min_word_length: Option<usize>,
    max_words: Option<usize>,
    stopwords: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LayoutFile {
    width: Option<f32>,
    height: Option<f32>,
    base_font_size: Option<f32>,
    font_size_scale: Option<f32>,
    padding: Option<f32>,
    cell_size: Option<f32>,
    max_radius_factor: Option<f32>,
    spiral_step: Option<f32>,
    spiral_growth: Option<f32>,
    rotation_buckets: Option<u32>,
    rotation_range_deg: Option<f32>,
    seed: Option<u64>,
    run_budget: Option<u64>,
    deadline_ms: Option<u64>,
    glyph_metrics: Option<GlyphMetrics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RenderFile {
    scale: Option<f32>,
}

/// Loads a JSON5 config file and overlays it on the defaults. With no path
/// the defaults are returned as-is. Validation happens at the call sites
/// that consume the config, not here, so a file can be loaded, tweaked and
/// then checked.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let file: ConfigFile = json5::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    apply_config_file(&mut config, file);
    Ok(config)
}

fn apply_config_file(config: &mut Config, file: ConfigFile) {
    if let Some(name) = file.theme {
        match name.as_str() {
            "modern" => config.theme = Theme::modern(),
            _ => config.theme = Theme::classic(),
        }
    }
    if let Some(vars) = file.theme_variables {
        if let Some(font_family) = vars.font_family {
            config.theme.font_family = font_family;
        }
        if let Some(background) = vars.background {
            config.theme.background = background;
        }
        if let Some(word_colors) = vars.word_colors {
            config.theme.word_colors = word_colors;
        }
    }
    if let Some(tokenizer) = file.tokenizer {
        let target = &mut config.tokenizer;
        if let Some(v) = tokenizer.min_word_length {
            target.min_word_length = v;
        }
        if let Some(v) = tokenizer.max_words {
            target.max_words = v;
        }
        if let Some(v) = tokenizer.stopwords {
            target.stopwords = v;
        }
    }
    if let Some(layout) = file.layout {
        let target = &mut config.layout;
        if let Some(v) = layout.width {
            target.width = v;
        }
        if let Some(v) = layout.height {
            target.height = v;
        }
        if let Some(v) = layout.base_font_size {
            target.base_font_size = v;
        }
        if let Some(v) = layout.font_size_scale {
            target.font_size_scale = v;
        }
        if let Some(v) = layout.padding {
            target.padding = v;
        }
        if let Some(v) = layout.cell_size {
            target.cell_size = v;
        }
        if let Some(v) = layout.max_radius_factor {
            target.max_radius_factor = v;
        }
        if let Some(v) = layout.spiral_step {
            target.spiral_step = v;
        }
        if let Some(v) = layout.spiral_growth {
            target.spiral_growth = v;
        }
        if let Some(v) = layout.rotation_buckets {
            target.rotation_buckets = v;
        }
        if let Some(v) = layout.rotation_range_deg {
            target.rotation_range_deg = v;
        }
        if let Some(v) = layout.seed {
            target.seed = v;
        }
        if let Some(v) = layout.run_budget {
            target.run_budget = Some(v);
        }
        if let Some(v) = layout.deadline_ms {
            target.deadline_ms = Some(v);
        }
        if let Some(v) = layout.glyph_metrics {
            target.glyph_metrics = v;
        }
    }
    if let Some(render) = file.render {
        if let Some(v) = render.scale {
            config.render.scale = v;
        }
    }
}
