use fastrand::Rng;
use glam::Vec2;

/// Uniform sample in `[min, max)`.
#[inline]
pub fn random_range(rng: &mut Rng, min: f32, max: f32) -> f32 {
    min + rng.f32() * (max - min)
}

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Axis-aligned bounds of a point set, or `None` when empty.
pub fn bounds(points: &[Vec2]) -> Option<(Vec2, Vec2)> {
    let first = *points.first()?;
    Some(points.iter().fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))))
}

/// Centers the set on the origin and scales it uniformly so the larger side
/// of its bounding box spans exactly 2 units.
pub fn normalize_points(points: &[Vec2]) -> Vec<Vec2> {
    let Some((lo, hi)) = bounds(points) else {
        return Vec::new();
    };

    let center = (lo + hi) * 0.5;
    let size = hi - lo;
    let half_extent = size.x.max(size.y) / 2.0;
    let divisor = if half_extent > 0.0 { half_extent } else { 1.0 };

    points.iter().map(|p| (*p - center) / divisor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_same(a: &[Vec2], b: &[Vec2]) {
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(b) {
            assert_relative_eq!(p.x, q.x, epsilon = 1e-5);
            assert_relative_eq!(p.y, q.y, epsilon = 1e-5);
        }
    }

    #[test]
    fn normalize_maps_longer_side_to_two_units() {
        let raw = [Vec2::new(10.0, 20.0), Vec2::new(110.0, 20.0), Vec2::new(60.0, 70.0)];
        let out = normalize_points(&raw);
        let (lo, hi) = bounds(&out).unwrap();

        assert_relative_eq!(hi.x - lo.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(hi.y - lo.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!((lo + hi).x, 0.0, epsilon = 1e-5);
        assert_relative_eq!((lo + hi).y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn normalize_is_idempotent() {
        let raw = [
            Vec2::new(-3.0, 4.0),
            Vec2::new(7.5, -2.0),
            Vec2::new(0.25, 9.0),
            Vec2::new(1.0, 1.0),
        ];
        let once = normalize_points(&raw);
        let twice = normalize_points(&once);
        assert_same(&once, &twice);
    }

    #[test]
    fn normalize_is_scale_invariant() {
        let raw = [
            Vec2::new(12.0, 40.0),
            Vec2::new(80.0, 44.0),
            Vec2::new(33.0, 90.0),
            Vec2::new(51.0, 61.0),
            Vec2::new(20.0, 70.0),
        ];
        let scaled: Vec<Vec2> = raw.iter().map(|p| *p * 3.7).collect();
        assert_same(&normalize_points(&raw), &normalize_points(&scaled));
    }

    #[test]
    fn single_point_collapses_to_origin() {
        let out = normalize_points(&[Vec2::new(42.0, -7.0)]);
        assert_eq!(out, vec![Vec2::ZERO]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(normalize_points(&[]).is_empty());
        assert!(bounds(&[]).is_none());
    }

    #[test]
    fn random_range_stays_in_bounds() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..1000 {
            let v = random_range(&mut rng, -2.0, 5.0);
            assert!((-2.0..5.0).contains(&v));
        }
    }
}
