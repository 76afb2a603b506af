//! Hypervolume kernels, generic over the computation precision.
//!
//! Everything is minimization against a reference point `r`: the hypervolume
//! of a point set is the measure of the region weakly dominated by the set
//! and strictly below `r` in every coordinate.
//!
//! The 2-d kernel maintains a staircase front with incremental area
//! bookkeeping; 3-d sweeps that front along z, accumulating area times slab
//! height; 4-d sweeps 3-d volumes along w. All three run unchanged over
//! `f64` or `BigRational` through [`HvScalar`], so exact mode shares the
//! float code path.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Mul, Sub};

use nalgebra::{Vector2, Vector3, Vector4};
use num_traits::Zero;

#[cfg(feature = "exact")]
use num_rational::BigRational;
#[cfg(feature = "exact")]
use num_traits::ToPrimitive;

use crate::precision::PrecisionKind;

/// A hypervolume in whichever representation the archive was built with.
#[derive(Clone, Debug)]
pub enum HvValue {
    /// Arbitrary-precision rational, available with the `exact` feature.
    #[cfg(feature = "exact")]
    Exact(BigRational),
    Float(f64),
}

impl HvValue {
    pub fn kind(&self) -> PrecisionKind {
        match self {
            #[cfg(feature = "exact")]
            Self::Exact(_) => PrecisionKind::Exact,
            Self::Float(_) => PrecisionKind::Float,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.kind() == PrecisionKind::Exact
    }

    /// Lossy view; NaN when a rational overflows `f64`.
    pub fn to_f64(&self) -> f64 {
        match self {
            #[cfg(feature = "exact")]
            Self::Exact(q) => q.to_f64().unwrap_or(f64::NAN),
            Self::Float(x) => *x,
        }
    }

    pub(crate) fn zero(kind: PrecisionKind) -> Self {
        match kind {
            #[cfg(feature = "exact")]
            PrecisionKind::Exact => Self::Exact(BigRational::zero()),
            _ => Self::Float(0.0),
        }
    }
}

impl fmt::Display for HvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "exact")]
            Self::Exact(q) => write!(f, "{q}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

/// `a - b`, staying exact only when both sides are.
pub(crate) fn sub_values(a: HvValue, b: HvValue) -> HvValue {
    match (a, b) {
        #[cfg(feature = "exact")]
        (HvValue::Exact(x), HvValue::Exact(y)) => HvValue::Exact(x - y),
        (x, y) => HvValue::Float(x.to_f64() - y.to_f64()),
    }
}

/// Convert a computed value into the reported kind.
pub(crate) fn finalize(value: HvValue, kind: PrecisionKind) -> HvValue {
    match (value, kind) {
        #[cfg(feature = "exact")]
        (HvValue::Float(x), PrecisionKind::Exact) => BigRational::from_float(x)
            .map(HvValue::Exact)
            .unwrap_or(HvValue::Float(x)),
        #[cfg(feature = "exact")]
        (HvValue::Exact(q), PrecisionKind::Float) => {
            HvValue::Float(q.to_f64().unwrap_or(f64::NAN))
        }
        (value, _) => value,
    }
}

/// Scalar the kernels compute in. Coordinates enter as `f64` and are lifted
/// once; factories reject non-finite coordinates before any kernel runs.
pub(crate) trait HvScalar:
    Clone + PartialOrd + Zero + Sub<Output = Self> + Mul<Output = Self>
{
    fn from_coord(x: f64) -> Self;
    fn into_value(self) -> HvValue;
}

impl HvScalar for f64 {
    #[inline]
    fn from_coord(x: f64) -> Self {
        x
    }

    fn into_value(self) -> HvValue {
        HvValue::Float(self)
    }
}

#[cfg(feature = "exact")]
impl HvScalar for BigRational {
    fn from_coord(x: f64) -> Self {
        // Finite f64 values convert exactly.
        BigRational::from_float(x).unwrap_or_else(BigRational::zero)
    }

    fn into_value(self) -> HvValue {
        HvValue::Exact(self)
    }
}

/// A 2-d staircase front below a reference corner `(rx, ry)`.
///
/// Points are kept sorted by strictly ascending x with strictly descending y,
/// and `area` always equals the dominated area: the sum over strips
/// `(rx - x_k) * (y_prev - y_k)` with `y_prev` starting at `ry`.
pub(crate) struct Front2<T> {
    rx: T,
    ry: T,
    pts: Vec<(T, T)>,
    area: T,
}

impl<T: HvScalar> Front2<T> {
    pub(crate) fn new(rx: T, ry: T) -> Self {
        Self {
            rx,
            ry,
            pts: Vec::new(),
            area: T::zero(),
        }
    }

    /// Insert a point, evicting anything it weakly dominates. Returns false
    /// for points outside the open domain or weakly dominated by the front.
    pub(crate) fn insert(&mut self, x: T, y: T) -> bool {
        if !(x < self.rx && y < self.ry) {
            return false;
        }
        let i = self.pts.partition_point(|p| p.0 < x);
        if i > 0 && self.pts[i - 1].1 <= y {
            return false;
        }
        if i < self.pts.len() && self.pts[i].0 == x && self.pts[i].1 <= y {
            return false;
        }
        let mut j = i;
        while j < self.pts.len() && self.pts[j].1 >= y {
            j += 1;
        }
        let y_left = if i > 0 {
            self.pts[i - 1].1.clone()
        } else {
            self.ry.clone()
        };
        let mut removed = T::zero();
        let mut y_prev = y_left.clone();
        for p in &self.pts[i..j] {
            removed = removed + (self.rx.clone() - p.0.clone()) * (y_prev.clone() - p.1.clone());
            y_prev = p.1.clone();
        }
        let gained = (self.rx.clone() - x.clone()) * (y_left - y.clone());
        let mut delta = gained - removed;
        if j < self.pts.len() {
            // The successor strip re-anchors from y_prev down to the new y.
            let sx = self.rx.clone() - self.pts[j].0.clone();
            delta = delta + sx * (y.clone() - y_prev);
        }
        self.area = self.area.clone() + delta;
        self.pts.splice(i..j, [(x, y)]);
        true
    }

    pub(crate) fn area(&self) -> T {
        self.area.clone()
    }
}

fn hv2_acc<T: HvScalar>(pts: &[Vector2<f64>], r: Vector2<f64>) -> T {
    let mut front = Front2::new(T::from_coord(r.x), T::from_coord(r.y));
    for p in pts {
        front.insert(T::from_coord(p.x), T::from_coord(p.y));
    }
    front.area()
}

fn hv3_acc<T: HvScalar>(pts: &[Vector3<f64>], r: Vector3<f64>) -> T {
    let mut order: Vec<usize> = (0..pts.len()).filter(|&k| pts[k].z < r.z).collect();
    order.sort_by(|&a, &b| pts[a].z.partial_cmp(&pts[b].z).unwrap_or(Ordering::Equal));
    let mut front = Front2::new(T::from_coord(r.x), T::from_coord(r.y));
    let mut volume = T::zero();
    let mut z_prev: Option<T> = None;
    for &k in &order {
        let z = T::from_coord(pts[k].z);
        match z_prev.take() {
            Some(zp) if zp < z => {
                volume = volume + front.area() * (z.clone() - zp);
                z_prev = Some(z);
            }
            Some(zp) => z_prev = Some(zp),
            None => z_prev = Some(z),
        }
        front.insert(T::from_coord(pts[k].x), T::from_coord(pts[k].y));
    }
    if let Some(zp) = z_prev {
        volume = volume + front.area() * (T::from_coord(r.z) - zp);
    }
    volume
}

fn hv4_acc<T: HvScalar>(pts: &[Vector4<f64>], r: Vector4<f64>) -> T {
    let mut order: Vec<usize> = (0..pts.len()).filter(|&k| pts[k].w < r.w).collect();
    order.sort_by(|&a, &b| pts[a].w.partial_cmp(&pts[b].w).unwrap_or(Ordering::Equal));
    let r3 = Vector3::new(r.x, r.y, r.z);
    let mut active: Vec<Vector3<f64>> = Vec::with_capacity(order.len());
    let mut volume = T::zero();
    let mut w_prev: Option<T> = None;
    for &k in &order {
        let w = T::from_coord(pts[k].w);
        match w_prev.take() {
            Some(wp) if wp < w => {
                volume = volume + hv3_acc::<T>(&active, r3) * (w.clone() - wp);
                w_prev = Some(w);
            }
            Some(wp) => w_prev = Some(wp),
            None => w_prev = Some(w),
        }
        active.push(Vector3::new(pts[k].x, pts[k].y, pts[k].z));
    }
    if let Some(wp) = w_prev {
        volume = volume + hv3_acc::<T>(&active, r3) * (T::from_coord(r.w) - wp);
    }
    volume
}

pub(crate) fn hv2(pts: &[Vector2<f64>], r: Vector2<f64>, kind: PrecisionKind) -> HvValue {
    match kind {
        #[cfg(feature = "exact")]
        PrecisionKind::Exact => hv2_acc::<BigRational>(pts, r).into_value(),
        _ => hv2_acc::<f64>(pts, r).into_value(),
    }
}

pub(crate) fn hv3(pts: &[Vector3<f64>], r: Vector3<f64>, kind: PrecisionKind) -> HvValue {
    match kind {
        #[cfg(feature = "exact")]
        PrecisionKind::Exact => hv3_acc::<BigRational>(pts, r).into_value(),
        _ => hv3_acc::<f64>(pts, r).into_value(),
    }
}

pub(crate) fn hv4(pts: &[Vector4<f64>], r: Vector4<f64>, kind: PrecisionKind) -> HvValue {
    match kind {
        #[cfg(feature = "exact")]
        PrecisionKind::Exact => hv4_acc::<BigRational>(pts, r).into_value(),
        _ => hv4_acc::<f64>(pts, r).into_value(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn front_tracks_area_through_inserts_and_evictions() {
        let mut front: Front2<f64> = Front2::new(1.0, 1.0);
        assert!(front.insert(0.0, 0.0));
        assert!((front.area() - 1.0).abs() < EPS);

        // Dominated and out-of-domain points leave the area untouched.
        assert!(!front.insert(0.5, 0.5));
        assert!(!front.insert(0.0, 2.0));
        assert!((front.area() - 1.0).abs() < EPS);

        assert!(front.insert(-1.0, 0.5));
        assert!((front.area() - 1.5).abs() < EPS);
        assert!(front.insert(-2.0, 0.6));
        assert!((front.area() - 1.9).abs() < EPS);

        // Evicts (-2.0, 0.6).
        assert!(front.insert(-3.0, 0.55));
        assert!((front.area() - 2.4).abs() < EPS);
        assert_eq!(front.pts.len(), 3);
    }

    #[test]
    fn front_keeps_x_ascending_y_descending() {
        let mut front: Front2<f64> = Front2::new(10.0, 10.0);
        for (x, y) in [(5.0, 1.0), (1.0, 5.0), (3.0, 3.0), (2.0, 4.0), (4.0, 2.0)] {
            assert!(front.insert(x, y));
        }
        for w in front.pts.windows(2) {
            assert!(w[0].0 < w[1].0);
            assert!(w[0].1 > w[1].1);
        }
    }

    #[test]
    fn hv2_matches_strip_sum() {
        let pts = [Vector2::new(1.0, 2.0), Vector2::new(2.0, 1.0)];
        let v = hv2(&pts, Vector2::new(4.0, 4.0), PrecisionKind::Float);
        assert!((v.to_f64() - 8.0).abs() < EPS);
    }

    #[test]
    fn hv2_ignores_duplicates_and_dominated_points() {
        let pts = [
            Vector2::new(1.0, 2.0),
            Vector2::new(1.0, 2.0),
            Vector2::new(3.0, 3.0),
        ];
        let v = hv2(&pts, Vector2::new(4.0, 4.0), PrecisionKind::Float);
        assert!((v.to_f64() - 6.0).abs() < EPS);
    }

    #[cfg(feature = "exact")]
    #[test]
    fn hv2_exact_is_a_rational() {
        use num_bigint::BigInt;

        let pts = [Vector2::new(0.25, 0.25)];
        let v = hv2(&pts, Vector2::new(1.0, 1.0), PrecisionKind::Exact);
        match v {
            HvValue::Exact(q) => {
                assert_eq!(q, BigRational::new(BigInt::from(9), BigInt::from(16)));
            }
            HvValue::Float(_) => panic!("expected exact value"),
        }
    }

    #[test]
    fn hv3_sweeps_layers() {
        let pts = [
            Vector3::new(0.0, 1.0, 1.0),
            Vector3::new(1.0, 0.0, 1.0),
            Vector3::new(1.0, 1.0, 0.0),
        ];
        let v = hv3(&pts, Vector3::new(2.0, 2.0, 2.0), PrecisionKind::Float);
        // Inclusion-exclusion over the three boxes gives 4.
        assert!((v.to_f64() - 4.0).abs() < EPS);
    }

    #[test]
    fn hv3_dominated_point_adds_nothing() {
        let pts = [Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0)];
        let v = hv3(&pts, Vector3::new(2.0, 2.0, 2.0), PrecisionKind::Float);
        assert!((v.to_f64() - 8.0).abs() < EPS);
    }

    #[test]
    fn hv4_single_corner_is_the_box_volume() {
        let pts = [Vector4::new(0.0, 0.0, 0.0, 0.0)];
        let v = hv4(&pts, Vector4::new(1.0, 2.0, 3.0, 1.0), PrecisionKind::Float);
        assert!((v.to_f64() - 6.0).abs() < EPS);
    }

    #[test]
    fn hv4_handles_equal_w_layers() {
        let pts = [
            Vector4::new(0.0, 1.0, 1.0, 1.0),
            Vector4::new(1.0, 0.0, 1.0, 1.0),
        ];
        let v = hv4(&pts, Vector4::new(2.0, 2.0, 2.0, 2.0), PrecisionKind::Float);
        // Two overlapping boxes of volume 2, intersection 1.
        assert!((v.to_f64() - 3.0).abs() < EPS);
    }

    #[test]
    fn out_of_domain_points_contribute_zero() {
        let pts = [Vector3::new(3.0, 0.0, 0.0)];
        let v = hv3(&pts, Vector3::new(2.0, 2.0, 2.0), PrecisionKind::Float);
        assert_eq!(v.to_f64(), 0.0);
    }

    #[cfg(feature = "exact")]
    #[test]
    fn exact_and_float_kernels_agree_on_representable_inputs() {
        let pts = [
            Vector3::new(0.5, 1.5, 1.0),
            Vector3::new(1.0, 1.0, 0.5),
            Vector3::new(1.5, 0.5, 1.5),
        ];
        let r = Vector3::new(2.0, 2.0, 2.0);
        let exact = hv3(&pts, r, PrecisionKind::Exact);
        let float = hv3(&pts, r, PrecisionKind::Float);
        assert!((exact.to_f64() - float.to_f64()).abs() < EPS);
        assert!(exact.is_exact());
    }

    #[cfg(feature = "exact")]
    #[test]
    fn finalize_converts_between_kinds() {
        let down = finalize(
            HvValue::Exact(BigRational::from_float(0.5).unwrap()),
            PrecisionKind::Float,
        );
        assert!(matches!(down, HvValue::Float(x) if x == 0.5));

        let up = finalize(HvValue::Float(0.5), PrecisionKind::Exact);
        assert!(matches!(up, HvValue::Exact(ref q)
            if *q == BigRational::from_float(0.5).unwrap()));
    }

    #[test]
    fn sub_values_keeps_the_common_kind() {
        let d = sub_values(HvValue::Float(3.0), HvValue::Float(1.0));
        assert!(matches!(d, HvValue::Float(x) if (x - 2.0).abs() < EPS));
        assert_eq!(HvValue::zero(PrecisionKind::Float).to_f64(), 0.0);
    }
}
