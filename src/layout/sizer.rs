use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::LayoutConfig;
use crate::layout::types::SizedWord;
use crate::tokenizer::Word;

/// Maps ranked words to font sizes and rotations.
///
/// Font size grows linearly with weight, so equal weights always get equal
/// sizes. Rotation is drawn once per word from the configured buckets; the
/// caller owns the RNG, which keeps a whole run reproducible from one seed.
pub fn size_words(words: &[Word], config: &LayoutConfig, rng: &mut ChaCha8Rng) -> Vec<SizedWord> {
    let angles = rotation_angles(config);
    words
        .iter()
        .filter(|word| word.weight >= 1)
        .map(|word| {
            let rotation = if angles.len() > 1 {
                angles[rng.gen_range(0..angles.len())]
            } else {
                angles[0]
            };
            SizedWord {
                text: word.text.clone(),
                weight: word.weight,
                font_size: config.base_font_size + word.weight as f32 * config.font_size_scale,
                rotation,
            }
        })
        .collect()
}

/// Discrete rotation buckets, evenly spaced over the symmetric range.
/// A single bucket pins every word horizontal.
pub fn rotation_angles(config: &LayoutConfig) -> Vec<f32> {
    let buckets = config.rotation_buckets.max(1);
    if buckets == 1 {
        return vec![0.0];
    }
    let range = config.rotation_range_deg;
    let step = 2.0 * range / (buckets - 1) as f32;
    (0..buckets).map(|i| -range + i as f32 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn words(weights: &[u32]) -> Vec<Word> {
        weights
            .iter()
            .enumerate()
            .map(|(i, &weight)| Word {
                text: format!("word{i}"),
                weight,
            })
            .collect()
    }

    #[test]
    fn font_size_is_linear_in_weight() {
        let config = LayoutConfig {
            base_font_size: 10.0,
            font_size_scale: 5.0,
            ..LayoutConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let sized = size_words(&words(&[3, 2, 2, 1]), &config, &mut rng);
        assert_eq!(sized[0].font_size, 25.0);
        assert_eq!(sized[1].font_size, 20.0);
        assert_eq!(sized[2].font_size, 20.0, "equal weights get equal sizes");
        assert_eq!(sized[3].font_size, 15.0);
    }

    #[test]
    fn sizes_never_increase_down_the_ranking() {
        let config = LayoutConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let sized = size_words(&words(&[9, 5, 5, 4, 1, 1]), &config, &mut rng);
        for pair in sized.windows(2) {
            assert!(pair[0].font_size >= pair[1].font_size);
        }
    }

    #[test]
    fn zero_weight_words_are_dropped() {
        let config = LayoutConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let sized = size_words(&words(&[2, 0, 1]), &config, &mut rng);
        assert_eq!(sized.len(), 2);
        assert!(sized.iter().all(|w| w.weight >= 1));
    }

    #[test]
    fn default_buckets_span_plus_minus_ninety() {
        let angles = rotation_angles(&LayoutConfig::default());
        assert_eq!(angles, vec![-90.0, -60.0, -30.0, 0.0, 30.0, 60.0, 90.0]);
    }

    #[test]
    fn rotations_come_from_the_bucket_set() {
        let config = LayoutConfig::default();
        let angles = rotation_angles(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let sized = size_words(&words(&[1; 64]), &config, &mut rng);
        for word in &sized {
            assert!(
                angles.contains(&word.rotation),
                "{} got rotation {} outside the bucket set",
                word.text,
                word.rotation
            );
        }
    }

    #[test]
    fn single_bucket_pins_words_horizontal() {
        let config = LayoutConfig {
            rotation_buckets: 1,
            ..LayoutConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let sized = size_words(&words(&[5, 4, 3]), &config, &mut rng);
        assert!(sized.iter().all(|w| w.rotation == 0.0));
    }

    #[test]
    fn same_seed_reproduces_the_same_rotations() {
        let config = LayoutConfig::default();
        let input = words(&[8, 7, 6, 5, 4, 3, 2, 1]);
        let mut first = ChaCha8Rng::seed_from_u64(99);
        let mut second = ChaCha8Rng::seed_from_u64(99);
        assert_eq!(
            size_words(&input, &config, &mut first),
            size_words(&input, &config, &mut second)
        );
    }
}
