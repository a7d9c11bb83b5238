//! Snippet offset selection
//!
//! All six clip tiers for a puzzle share one start offset into the source
//! audio. The offset is drawn from an explicit RNG so the rotation job uses
//! real entropy while tests thread a seeded generator.

use rand::Rng;
use trackdle_common::model::SNIPPET_LENGTHS;

/// Pick a start offset such that the longest tier still fits inside the
/// source audio. Sources shorter than the longest tier start at 0.
pub fn choose_offset(duration_secs: f64, rng: &mut impl Rng) -> f64 {
    let max_len = SNIPPET_LENGTHS[SNIPPET_LENGTHS.len() - 1];
    if duration_secs <= max_len {
        0.0
    } else {
        rng.gen_range(0.0..=duration_secs - max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn offset_leaves_room_for_longest_tier() {
        let mut rng = StdRng::seed_from_u64(7);
        for duration in [16.5, 30.0, 95.0, 600.0] {
            for _ in 0..100 {
                let offset = choose_offset(duration, &mut rng);
                assert!(offset >= 0.0);
                assert!(offset + SNIPPET_LENGTHS[5] <= duration);
            }
        }
    }

    #[test]
    fn short_source_falls_back_to_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(choose_offset(10.0, &mut rng), 0.0);
        assert_eq!(choose_offset(16.0, &mut rng), 0.0);
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let a = choose_offset(95.0, &mut StdRng::seed_from_u64(42));
        let b = choose_offset(95.0, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
