//! Grass field sampling.
//!
//! Blades are packed left to right in small overlapping clusters until the
//! cursor passes the right edge of the surface.

use std::f32::consts::TAU;

use rand::Rng;

use super::config::GrassLayerConfig;
use super::params::GrassBladeParams;
use crate::core::rng::RngExt;

/// Left edge of the field in NDC.
const FIELD_START: f32 = -1.0;
/// Sampling stops once the cursor reaches this NDC x.
const FIELD_END: f32 = 1.0;
/// Fraction of a blade's width the cursor advances, so neighbours overlap.
const BLADE_ADVANCE: f32 = 0.7;

/// Sample a full-width grass field.
///
/// `config.count` does not bound the result: the number of blades emerges
/// from the random widths and gaps. Blades come out ordered by `base_x`.
pub fn sample_grass_field<R: Rng + ?Sized>(
    config: &GrassLayerConfig,
    rng: &mut R,
) -> Vec<GrassBladeParams> {
    if config.height_scale <= 0.0 || config.width_scale <= 0.0 {
        log::warn!(
            "Grass field with non-positive scale (height {}, width {}) sampled as empty",
            config.height_scale,
            config.width_scale
        );
        return Vec::new();
    }

    let mut blades = Vec::new();
    let mut x = FIELD_START;
    let mut last_base = f32::NEG_INFINITY;

    while x < FIELD_END {
        let cluster_size = rng.pick(2, 4);
        let cluster_gap = rng.offset(0.01, 0.04);

        let mut placed = 0;
        while placed < cluster_size && x < FIELD_END {
            // Jitter can overshoot the next blade's cursor; clamp to keep order.
            let base_x = (x + rng.unit() * 0.01).max(last_base);
            let height = rng.offset(0.09, 0.12) * config.height_scale;
            let width = rng.offset(0.018, 0.022) * config.width_scale;
            let curve_base = rng.centered(0.18) * config.curve_scale;
            let sway_phase = rng.unit() * TAU + config.phase_offset;

            blades.push(GrassBladeParams {
                base_x,
                y_base: config.y_base,
                height,
                width,
                curve_base,
                sway_phase,
            });

            last_base = base_x;
            x += width * BLADE_ADVANCE;
            placed += 1;
        }
        x += cluster_gap;
    }

    if blades.len() as u32 != config.count {
        log::debug!(
            "Grass field sampled {} blades (configured count {} is not a bound)",
            blades.len(),
            config.count
        );
    }

    blades
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::seeded;

    #[test]
    fn test_blades_positive_and_ordered() {
        for seed in 0..20 {
            let mut rng = seeded(seed);
            for config in [GrassLayerConfig::near(), GrassLayerConfig::mid(), GrassLayerConfig::far()] {
                let blades = sample_grass_field(&config, &mut rng);
                assert!(!blades.is_empty());
                for pair in blades.windows(2) {
                    assert!(pair[0].base_x <= pair[1].base_x, "seed {} out of order", seed);
                }
                for blade in &blades {
                    assert!(blade.width > 0.0);
                    assert!(blade.height > 0.0);
                    assert_eq!(blade.y_base, config.y_base);
                }
            }
        }
    }

    #[test]
    fn test_field_spans_surface() {
        let mut rng = seeded(11);
        let blades = sample_grass_field(&GrassLayerConfig::near(), &mut rng);
        let first = blades.first().map(|b| b.base_x).unwrap_or(1.0);
        let last = blades.last().map(|b| b.base_x).unwrap_or(-1.0);
        assert!(first < -0.98);
        assert!(last > 0.9);
        assert!(last < 1.01);
    }

    #[test]
    fn test_count_does_not_bound_field() {
        let mut config = GrassLayerConfig::near();
        config.count = 3;
        let mut rng = seeded(5);
        let blades = sample_grass_field(&config, &mut rng);
        assert!(blades.len() > 3);
    }

    #[test]
    fn test_fixed_seed_first_blade_ranges() {
        let mut config = GrassLayerConfig::near();
        config.curve_scale = 1.0;
        config.phase_offset = 0.0;
        let mut rng = seeded(2024);
        let blades = sample_grass_field(&config, &mut rng);
        let first = blades[0];
        assert!((-0.09..=0.09).contains(&first.curve_base));
        assert!(first.sway_phase >= 0.0 && first.sway_phase < TAU);
    }

    #[test]
    fn test_phase_offset_shifts_phase() {
        let config = GrassLayerConfig::far();
        let mut rng = seeded(8);
        for blade in sample_grass_field(&config, &mut rng) {
            assert!(blade.sway_phase >= config.phase_offset);
            assert!(blade.sway_phase <= config.phase_offset + TAU);
        }
    }

    #[test]
    fn test_huge_count_is_ignored() {
        let mut config = GrassLayerConfig::near();
        config.count = u32::MAX;
        let blades = sample_grass_field(&config, &mut seeded(1));
        let reference = sample_grass_field(&GrassLayerConfig::near(), &mut seeded(1));
        assert_eq!(blades, reference);
    }

    #[test]
    fn test_curve_base_within_scaled_bound() {
        for seed in 0..20 {
            let mut rng = seeded(seed);
            for config in [GrassLayerConfig::near(), GrassLayerConfig::mid(), GrassLayerConfig::far()] {
                let bound = 0.09 * config.curve_scale;
                for blade in sample_grass_field(&config, &mut rng) {
                    assert!(
                        blade.curve_base >= -bound && blade.curve_base <= bound,
                        "seed {} curve {} outside +-{}",
                        seed,
                        blade.curve_base,
                        bound
                    );
                }
            }
        }
    }

    #[test]
    fn test_degenerate_scale_is_empty() {
        let mut config = GrassLayerConfig::mid();
        config.width_scale = 0.0;
        let mut rng = seeded(1);
        assert!(sample_grass_field(&config, &mut rng).is_empty());
    }

    #[test]
    fn test_same_seed_same_field() {
        let config = GrassLayerConfig::mid();
        let a = sample_grass_field(&config, &mut seeded(77));
        let b = sample_grass_field(&config, &mut seeded(77));
        assert_eq!(a, b);
    }
}
