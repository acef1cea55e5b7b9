use glam::Vec2;

pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    distance_sq(p1, p2).sqrt()
}

pub fn distance_sq(p1: Vec2, p2: Vec2) -> f32 {
    (p1.x - p2.x).powi(2) + (p1.y - p2.y).powi(2)
}

/// Rescales `v` to exactly `length`.
///
/// Returns `None` when `v` is the zero vector or `length` is not finite; the
/// direction is undefined there and the caller decides the fallback.
#[inline]
pub fn scale_to_length(v: Vec2, length: f32) -> Option<Vec2> {
    let current = v.length();

    if current == 0. || !length.is_finite() {
        None
    } else {
        Some(v / current * length)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec2;

    use super::{distance, distance_sq, scale_to_length};

    macro_rules! assert_eqf32 {
        ($x:expr, $y:expr) => {
            assert_relative_eq!($x, $y, epsilon = 1e-3_f32)
        };
    }

    #[test]
    fn distance_of_3_4_triangle() {
        let result = distance(Vec2::new(1., 1.), Vec2::new(4., 5.));
        assert_eqf32!(result, 5.);
    }

    #[test]
    fn distance_sq_skips_the_root() {
        let result = distance_sq(Vec2::new(-2., 0.), Vec2::new(2., 3.));
        assert_eqf32!(result, 25.);
    }

    #[test]
    fn distance_of_coincident_points_is_zero() {
        let p = Vec2::new(13.5, -7.25);
        assert_eqf32!(distance(p, p), 0.);
    }

    #[test]
    fn scale_preserves_direction() {
        let scaled = scale_to_length(Vec2::new(3., 4.), 10.).unwrap();
        assert_eqf32!(scaled.x, 6.);
        assert_eqf32!(scaled.y, 8.);
    }

    #[test]
    fn scale_handles_shrinking() {
        let scaled = scale_to_length(Vec2::new(0., -8.), 0.5).unwrap();
        assert_eqf32!(scaled.x, 0.);
        assert_eqf32!(scaled.y, -0.5);
    }

    #[test]
    fn scale_of_zero_vector_is_undefined() {
        assert!(scale_to_length(Vec2::ZERO, 2.).is_none());
    }

    #[test]
    fn scale_to_nonfinite_length_is_undefined() {
        assert!(scale_to_length(Vec2::new(1., 1.), f32::INFINITY).is_none());
    }
}
