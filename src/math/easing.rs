/// Single-pole approach: move `current` a fixed fraction of the way to `target`
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approach_step() {
        assert!((approach(0.0, 1.0, 0.05) - 0.05).abs() < 1e-6);
        assert!((approach(1.0, 0.0, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_approach_converges() {
        let mut x = 3.0;
        for _ in 0..1000 {
            x = approach(x, -1.0, 0.05);
        }
        assert!((x + 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_approach_at_target_is_fixed_point() {
        assert_eq!(approach(2.5, 2.5, 0.05), 2.5);
    }
}
