pub mod sizer;
pub mod spatial;
pub mod spiral;
pub mod sprite;
pub mod text;
pub(crate) mod types;
pub use types::*;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{ConfigError, LayoutConfig};
use crate::theme::Theme;
use crate::tokenizer::Word;

/// Runs the full pipeline for already ranked words: sizing and rotation
/// sampling, then spiral placement against the collision index.
///
/// The RNG is seeded from `config.seed`, so the same words, theme and
/// config always produce the same layout. Invalid config is rejected
/// before any work happens.
pub fn compute_layout(
    words: &[Word],
    theme: &Theme,
    config: &LayoutConfig,
) -> Result<LayoutResult, ConfigError> {
    config.validate()?;
    if words.is_empty() {
        return Ok(LayoutResult::empty());
    }
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let sized = sizer::size_words(words, config, &mut rng);
    Ok(spiral::place(sized, &theme.font_family, config))
}
