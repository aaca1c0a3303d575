#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod layout;
pub mod layout_dump;
pub mod render;
mod text_metrics;
pub mod theme;
pub mod tokenizer;

pub use config::{
    Config, ConfigError, GlyphMetrics, LayoutConfig, RenderConfig, TokenizerConfig, load_config,
};
pub use layout::{LayoutResult, PlacedWord, SizedWord, compute_layout};
pub use render::render_svg;
pub use theme::Theme;
pub use tokenizer::{Word, analyze};

#[cfg(feature = "cli")]
pub use cli::run;
