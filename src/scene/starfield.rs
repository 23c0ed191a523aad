use glam::Vec3;
use rand::Rng;

use super::blueprint::StarfieldSpec;
use super::geometry::{Geometry, Topology};

/// Scatter `spec.count` points uniformly inside the starfield cube
pub fn generate<R: Rng>(spec: &StarfieldSpec, rng: &mut R) -> Geometry {
    let half = spec.extent / 2.0;
    let mut coord = || (rng.random::<f32>() - 0.5) * spec.extent;

    let positions = (0..spec.count)
        .map(|_| Vec3::new(coord(), coord(), coord()))
        .collect::<Vec<_>>();

    debug_assert!(positions.iter().all(|p| p.abs().max_element() <= half));
    Geometry::new(Topology::Points, positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Variant;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_count_matches_variant() {
        for (variant, expected) in [(Variant::Primary, 1500), (Variant::Secondary, 800), (Variant::Tertiary, 800)] {
            let mut rng = StdRng::seed_from_u64(7);
            let stars = generate(&variant.blueprint().starfield, &mut rng);
            assert_eq!(stars.topology, Topology::Points);
            assert_eq!(stars.primitive_count(), expected);
        }
    }

    #[test]
    fn test_points_inside_cube() {
        let spec = Variant::Primary.blueprint().starfield;
        let mut rng = StdRng::seed_from_u64(42);
        let stars = generate(&spec, &mut rng);

        for p in &stars.positions {
            assert!(p.abs().max_element() <= spec.extent / 2.0);
        }
    }

    #[test]
    fn test_same_seed_same_positions() {
        let spec = Variant::Tertiary.blueprint().starfield;
        let a = generate(&spec, &mut StdRng::seed_from_u64(99));
        let b = generate(&spec, &mut StdRng::seed_from_u64(99));
        let c = generate(&spec, &mut StdRng::seed_from_u64(100));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
