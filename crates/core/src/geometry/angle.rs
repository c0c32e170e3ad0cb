//! Angle helpers that don't depend on the grid geometry. All angles here are
//! in degrees.

/// √3, used to project hex tile steps into a flat plane
pub const SQRT3: f32 = 1.732_050_8;
/// 2√3
pub const SQRT3_X2: f32 = SQRT3 * 2.0;

/// Reduce an integer angle into `[0, 360)`. Works for any input, including
/// large negatives.
pub fn normalize_angle(angle: i32) -> i32 {
    angle.rem_euclid(360)
}

/// Wrap a floating point bearing into `[0, 360)`. This wraps by modulo rather
/// than clamping, so `-30` becomes `330` and `725` becomes `5`.
pub fn normalize_bearing(bearing: f32) -> f32 {
    let wrapped = bearing.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Unsigned minimal distance between two angles, in `[0, 180]`. The inputs
/// should already be normalized into `[0, 360)`.
pub fn dir_angle_diff(a1: f32, a2: f32) -> f32 {
    let diff = 180.0 - ((a1 - a2).abs() - 180.0).abs();
    debug_assert!(
        (0.0..=180.0).contains(&diff),
        "angle diff {} out of range for {} and {}",
        diff,
        a1,
        a2
    );
    diff
}

/// Signed minimal distance from `a1` to `a2`, in `[-180, 180]`. Positive
/// means `a2` is clockwise of `a1`. Works across the 0/360 seam.
pub fn dir_angle_diff_sided(a1: f32, a2: f32) -> f32 {
    let delta = (a2 - a1).to_radians();
    delta.sin().atan2(delta.cos()).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(0), 0);
        assert_eq!(normalize_angle(359), 359);
        assert_eq!(normalize_angle(360), 0);
        assert_eq!(normalize_angle(725), 5);
        assert_eq!(normalize_angle(-30), 330);
        assert_eq!(normalize_angle(-360), 0);
        assert_eq!(normalize_angle(-1090), 350);
    }

    #[test]
    fn test_normalize_angle_idempotent() {
        for angle in -1000..1000 {
            let normalized = normalize_angle(angle);
            assert!((0..360).contains(&normalized));
            assert_eq!(normalize_angle(normalized), normalized);
        }
    }

    #[test]
    fn test_normalize_bearing() {
        assert_approx_eq!(normalize_bearing(0.0), 0.0);
        assert_approx_eq!(normalize_bearing(360.0), 0.0);
        assert_approx_eq!(normalize_bearing(-30.0), 330.0);
        assert_approx_eq!(normalize_bearing(725.5), 5.5, 1e-3);
        assert_approx_eq!(normalize_bearing(-720.0), 0.0);
        assert!(normalize_bearing(-1e-7) < 360.0);
    }

    #[test]
    fn test_dir_angle_diff() {
        assert_approx_eq!(dir_angle_diff(10.0, 350.0), 20.0, 1e-4);
        assert_approx_eq!(dir_angle_diff(350.0, 10.0), 20.0, 1e-4);
        assert_approx_eq!(dir_angle_diff(0.0, 180.0), 180.0);
        assert_approx_eq!(dir_angle_diff(90.0, 90.0), 0.0);
        assert_approx_eq!(dir_angle_diff(30.0, 150.0), 120.0);
    }

    #[test]
    fn test_dir_angle_diff_sided() {
        assert_approx_eq!(dir_angle_diff_sided(350.0, 10.0), 20.0, 1e-3);
        assert_approx_eq!(dir_angle_diff_sided(10.0, 350.0), -20.0, 1e-3);
        assert_approx_eq!(dir_angle_diff_sided(90.0, 30.0), -60.0, 1e-3);
        assert_approx_eq!(dir_angle_diff_sided(0.0, 0.0), 0.0);
        let opposite = dir_angle_diff_sided(0.0, 180.0);
        assert_approx_eq!(opposite.abs(), 180.0, 1e-3);
    }
}
