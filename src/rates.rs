//! Dormancy transition rate equations.
//!
//! Both rates are linear in Fe3 against the fixed reference scale `K_F`.
//! For equal maxima `alpha_ad == alpha_da == a` the two channels sum to
//! exactly `a` at any Fe3: bacteria always transition at the full rate, the
//! food level only splits it between the two directions.

/// Fe3 reference scale the transition rates are normalized against.
pub const K_F: f32 = 1.0;

/// Active -> Dormant transition rate: maximal when food is scarce.
#[inline(always)]
pub fn r_ad(fe3: f32, alpha_ad: f32) -> f32 {
    alpha_ad * (1.0 - fe3 / K_F)
}

/// Dormant -> Active transition rate: maximal when food is abundant.
#[inline(always)]
pub fn r_da(fe3: f32, alpha_da: f32) -> f32 {
    alpha_da * (fe3 / K_F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r_ad_is_maximal_without_food() {
        assert_eq!(r_ad(0.0, 0.5), 0.5);
        assert_eq!(r_ad(0.0, 1.0), 1.0);
    }

    #[test]
    fn r_ad_vanishes_at_saturation() {
        assert!(r_ad(1.0, 0.5).abs() < 1e-7);
    }

    #[test]
    fn r_ad_decreases_linearly_in_fe3() {
        assert!((r_ad(0.25, 1.0) - 0.75).abs() < 1e-7);
        assert!((r_ad(0.5, 1.0) - 0.5).abs() < 1e-7);
        assert!((r_ad(0.75, 1.0) - 0.25).abs() < 1e-7);
    }

    #[test]
    fn r_da_vanishes_without_food() {
        assert_eq!(r_da(0.0, 0.5), 0.0);
    }

    #[test]
    fn r_da_is_maximal_at_saturation() {
        assert!((r_da(1.0, 0.5) - 0.5).abs() < 1e-7);
    }

    #[test]
    fn r_da_increases_linearly_in_fe3() {
        assert!((r_da(0.25, 1.0) - 0.25).abs() < 1e-7);
        assert!((r_da(0.75, 1.0) - 0.75).abs() < 1e-7);
    }

    #[test]
    fn equal_maxima_sum_to_alpha_at_any_fe3() {
        let alpha = 0.5;
        for i in 0..=20 {
            let fe3 = i as f32 / 20.0;
            let sum = r_ad(fe3, alpha) + r_da(fe3, alpha);
            assert!((sum - alpha).abs() < 1e-6, "sum {} at fe3 {}", sum, fe3);
        }
    }
}
