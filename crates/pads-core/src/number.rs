/// Output precision: values are kept to 1/10000 of a mil.
pub const PRECISION: f64 = 1e4;

/// Rounds `value` half away from zero to [`PRECISION`] and folds `-0.0` into `0.0`.
///
/// Every number leaving the core goes through here exactly once, so the serializer never sees
/// float noise such as `41.750000000000004`.
#[must_use]
pub fn normalize(value: f64) -> f64 {
    let rounded = (value * PRECISION).round() / PRECISION;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_float_noise() {
        assert_eq!(normalize(0.1 + 0.2), 0.3);
        assert_eq!(normalize(41.750_000_000_000_004), 41.75);
    }

    #[test]
    fn rounds_symmetrically_about_zero() {
        assert_eq!(normalize(1.234_56), 1.2346);
        assert_eq!(normalize(-1.234_56), -1.2346);
        assert_eq!(normalize(2.000_04), 2.0);
    }

    #[test]
    fn negative_zero_becomes_zero() {
        let n = normalize(-0.000_01);
        assert_eq!(n, 0.0);
        assert!(n.is_sign_positive());
    }
}
