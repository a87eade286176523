//! Signed angle computation.
//!
//! The search measures every candidate shortcut as an angle at the
//! current node's parent, so both the visibility-bound propagator and the
//! relaxation rule share this single primitive.

use taut_core::Vec2;

/// Angle at `pivot` between the rays `pivot → vertex` and `pivot → other`,
/// in degrees, in the range [−180, 180].
///
/// The sign follows the z component of the cross product of the two rays:
/// counter-clockwise (from the vertex ray to the other ray) is positive.
/// A zero cross product (collinear rays) takes the negative branch, so
/// "straight ahead" is −0° and "straight behind" is −180°.
///
/// Degenerate inputs where either ray has zero length yield 0°.
pub fn signed_angle(vertex: Vec2, pivot: Vec2, other: Vec2) -> f64 {
    let a = vertex - pivot;
    let b = other - pivot;

    let mag_a = (a.x * a.x + a.y * a.y).sqrt();
    let mag_b = (b.x * b.x + b.y * b.y).sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    let dot = a.x * b.x + a.y * b.y;
    let cross_z = a.x * b.y - a.y * b.x;

    // Clamp against float drift pushing the ratio outside acos's domain.
    let unsigned = (dot / (mag_a * mag_b)).clamp(-1.0, 1.0).acos().to_degrees();

    if cross_z > 0.0 { unsigned } else { -unsigned }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn counter_clockwise_is_positive() {
        // From +x ray to +y ray: CCW quarter turn.
        let angle = signed_angle(v(1.0, 0.0), v(0.0, 0.0), v(0.0, 1.0));
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn clockwise_is_negative() {
        let angle = signed_angle(v(1.0, 0.0), v(0.0, 0.0), v(0.0, -1.0));
        assert!((angle + 90.0).abs() < 1e-9);
    }

    #[test]
    fn collinear_ahead_is_negative_zero() {
        let angle = signed_angle(v(1.0, 0.0), v(0.0, 0.0), v(3.0, 0.0));
        assert_eq!(angle, 0.0);
        assert!(angle.is_sign_negative());
    }

    #[test]
    fn collinear_diagonal_near_zero() {
        // Diagonal magnitudes are irrational; the result may drift a hair
        // below zero but must stay on the non-positive side.
        let angle = signed_angle(v(1.0, 1.0), v(0.0, 0.0), v(2.0, 2.0));
        assert!(angle.abs() < 1e-5);
        assert!(angle <= 0.0);
    }

    #[test]
    fn collinear_behind_is_minus_180() {
        let angle = signed_angle(v(1.0, 0.0), v(0.0, 0.0), v(-3.0, 0.0));
        assert!((angle + 180.0).abs() < 1e-9);
    }

    #[test]
    fn diagonal_45() {
        let angle = signed_angle(v(1.0, 1.0), v(0.0, 0.0), v(1.0, 0.0));
        assert!((angle + 45.0).abs() < 1e-9);
        let angle = signed_angle(v(1.0, 1.0), v(0.0, 0.0), v(0.0, 1.0));
        assert!((angle - 45.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_rays_are_zero() {
        let p = v(2.0, 3.0);
        assert_eq!(signed_angle(p, p, v(5.0, 5.0)), 0.0);
        assert_eq!(signed_angle(v(5.0, 5.0), p, p), 0.0);
        assert_eq!(signed_angle(p, p, p), 0.0);
    }

    #[test]
    fn magnitude_never_exceeds_180() {
        let pivot = v(0.0, 0.0);
        for k in 0..24 {
            let t = f64::from(k) * std::f64::consts::PI / 12.0;
            let angle = signed_angle(v(1.0, 0.0), pivot, v(t.cos(), t.sin()));
            assert!(angle.abs() <= 180.0 + 1e-9);
        }
    }
}
