//! Pareto-dominance predicates over raw objective slices.
//!
//! All objectives are minimized. Slices must have equal length; the archives
//! guarantee this before calling in.

/// `a` is no worse than `b` in every objective.
#[inline]
pub fn weakly_dominates(a: &[f64], b: &[f64]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).all(|(x, y)| x <= y)
}

/// `a` is no worse everywhere and better somewhere.
#[inline]
pub fn strictly_dominates(a: &[f64], b: &[f64]) -> bool {
    weakly_dominates(a, b) && a.iter().zip(b).any(|(x, y)| x < y)
}

/// Every component of `a` is strictly smaller than the matching one of `b`.
/// With `b` the reference point this is the in-domain test.
#[inline]
pub fn strictly_less(a: &[f64], b: &[f64]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).all(|(x, y)| x < y)
}

/// Euclidean distance from `f` to the closed region weakly dominating `r`.
/// Zero when `f` already dominates `r` componentwise.
pub fn distance_to_domain(f: &[f64], r: &[f64]) -> f64 {
    debug_assert_eq!(f.len(), r.len());
    f.iter()
        .zip(r)
        .map(|(x, y)| (x - y).max(0.0).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_allows_ties_strict_does_not() {
        assert!(weakly_dominates(&[1.0, 2.0], &[1.0, 2.0]));
        assert!(!strictly_dominates(&[1.0, 2.0], &[1.0, 2.0]));
        assert!(strictly_dominates(&[1.0, 1.0], &[1.0, 2.0]));
    }

    #[test]
    fn incomparable_points_dominate_neither_way() {
        let a = [1.0, 2.0];
        let b = [2.0, 1.0];
        assert!(!weakly_dominates(&a, &b));
        assert!(!weakly_dominates(&b, &a));
    }

    #[test]
    fn strictly_less_is_the_open_box_test() {
        let r = [1.0, 1.0];
        assert!(strictly_less(&[0.5, 0.9], &r));
        assert!(!strictly_less(&[0.5, 1.0], &r), "boundary is outside");
    }

    #[test]
    fn distance_clamps_negative_excess() {
        let r = [1.0, 1.0];
        assert_eq!(distance_to_domain(&[0.0, 0.0], &r), 0.0);
        assert_eq!(distance_to_domain(&[1.0, 1.0], &r), 0.0);
        let d = distance_to_domain(&[4.0, 5.0], &r);
        assert!((d - 5.0).abs() < 1e-12, "3-4-5 triangle, got {d}");
    }
}
