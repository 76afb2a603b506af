//! Bi-objective archive.
//!
//! The non-dominated set of two minimized objectives is a staircase: sorting
//! by ascending first objective forces strictly descending second objective.
//! Insertion is a binary search plus one splice over the dominated run. The
//! hypervolume is refreshed from the kernel after every mutation and cached
//! in the reported precision.

use nalgebra::Vector2;

use crate::dominance;
use crate::hv::{self, HvValue};
use crate::precision::PrecisionPair;

#[derive(Clone, Debug)]
pub struct Archive2d {
    /// Ascending x, strictly descending y.
    pts: Vec<Vector2<f64>>,
    /// Parallel to `pts`.
    infos: Vec<Option<String>>,
    reference_point: Option<Vector2<f64>>,
    precision: PrecisionPair,
    /// Finalized value; `None` without a reference point.
    hv: Option<HvValue>,
    /// Sup of `-distance` over offers rejected as out-of-domain. Feeds
    /// `hypervolume_plus` while the archive is empty.
    best_outside: f64,
}

impl Archive2d {
    pub fn new(
        f_vals: Vec<Vector2<f64>>,
        reference_point: Option<Vector2<f64>>,
        infos: Option<Vec<String>>,
        precision: PrecisionPair,
    ) -> Self {
        let mut archive = Self {
            pts: Vec::new(),
            infos: Vec::new(),
            reference_point,
            precision,
            hv: None,
            best_outside: f64::NEG_INFINITY,
        };
        archive.add_list(f_vals, infos);
        archive
    }

    /// Offer one candidate. Returns whether it entered the archive.
    pub fn add(&mut self, f: Vector2<f64>, info: Option<String>) -> bool {
        let accepted = self.insert_point(f, info);
        if accepted {
            self.refresh_hv();
        }
        accepted
    }

    /// Offer candidates in order with positionally paired infos; missing
    /// infos pad as `None`, extras are ignored. Returns how many entered.
    pub fn add_list(&mut self, f_vals: Vec<Vector2<f64>>, infos: Option<Vec<String>>) -> usize {
        let mut info_iter = infos.into_iter().flatten();
        self.add_pairs(f_vals.into_iter().map(move |f| (f, info_iter.next())))
    }

    /// Batch insertion with one hypervolume refresh at the end.
    pub(crate) fn add_pairs(
        &mut self,
        pairs: impl IntoIterator<Item = (Vector2<f64>, Option<String>)>,
    ) -> usize {
        let mut added = 0;
        for (f, info) in pairs {
            if self.insert_point(f, info) {
                added += 1;
            }
        }
        self.refresh_hv();
        added
    }

    /// Remove the exact point if present.
    pub fn remove(&mut self, f: Vector2<f64>) -> bool {
        let i = self.pts.partition_point(|p| p.x < f.x);
        if i < self.pts.len() && self.pts[i] == f {
            self.pts.remove(i);
            self.infos.remove(i);
            self.refresh_hv();
            true
        } else {
            false
        }
    }

    fn insert_point(&mut self, f: Vector2<f64>, info: Option<String>) -> bool {
        if !(f.x.is_finite() && f.y.is_finite()) {
            return false;
        }
        if !self.in_domain(f) {
            if let Some(r) = self.reference_point {
                let d = dominance::distance_to_domain(f.as_slice(), r.as_slice());
                if -d > self.best_outside {
                    self.best_outside = -d;
                }
            }
            return false;
        }
        let i = self.pts.partition_point(|p| p.x < f.x);
        if i > 0 && self.pts[i - 1].y <= f.y {
            return false;
        }
        if i < self.pts.len() && self.pts[i].x == f.x && self.pts[i].y <= f.y {
            return false;
        }
        let mut j = i;
        while j < self.pts.len() && self.pts[j].y >= f.y {
            j += 1;
        }
        self.pts.splice(i..j, [f]);
        self.infos.splice(i..j, [info]);
        true
    }

    fn refresh_hv(&mut self) {
        self.hv = self.reference_point.map(|r| {
            hv::finalize(
                hv::hv2(&self.pts, r, self.precision.compute_kind),
                self.precision.final_kind,
            )
        });
    }

    pub fn len(&self) -> usize {
        self.pts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    pub fn points(&self) -> &[Vector2<f64>] {
        &self.pts
    }

    pub fn infos(&self) -> &[Option<String>] {
        &self.infos
    }

    pub fn reference_point(&self) -> Option<Vector2<f64>> {
        self.reference_point
    }

    pub fn precision(&self) -> PrecisionPair {
        self.precision
    }

    /// Strictly below the reference point in both objectives. Everything is
    /// in domain when no reference point is set.
    pub fn in_domain(&self, f: Vector2<f64>) -> bool {
        match self.reference_point {
            Some(r) => dominance::strictly_less(f.as_slice(), r.as_slice()),
            None => true,
        }
    }

    /// Whether some archived point weakly dominates `f`.
    pub fn dominates(&self, f: Vector2<f64>) -> bool {
        let i = self.pts.partition_point(|p| p.x <= f.x);
        i > 0 && self.pts[i - 1].y <= f.y
    }

    /// Dominated hypervolume in the reported precision; `None` without a
    /// reference point. Empty archives report zero.
    pub fn hypervolume(&self) -> Option<HvValue> {
        self.hv.clone()
    }

    /// Hypervolume while non-empty; before the first accepted point, the
    /// negated distance of the closest offer to the domain, or negative
    /// infinity if nothing was ever offered. Sentinels stay `f64`.
    pub fn hypervolume_plus(&self) -> Option<HvValue> {
        self.reference_point?;
        if self.pts.is_empty() {
            Some(HvValue::Float(self.best_outside))
        } else {
            self.hv.clone()
        }
    }

    /// Hypervolume lost if the exact member `f` were removed; `None` when
    /// `f` is not archived or no reference point is set.
    pub fn contributing_hypervolume(&self, f: Vector2<f64>) -> Option<HvValue> {
        let r = self.reference_point?;
        let i = self.pts.partition_point(|p| p.x < f.x);
        if !(i < self.pts.len() && self.pts[i] == f) {
            return None;
        }
        let mut rest = self.pts.clone();
        rest.remove(i);
        let kind = self.precision.compute_kind;
        let whole = hv::hv2(&self.pts, r, kind);
        let without = hv::hv2(&rest, r, kind);
        Some(hv::finalize(
            hv::sub_values(whole, without),
            self.precision.final_kind,
        ))
    }

    /// Hypervolume gained if `f` were added; zero for dominated or
    /// out-of-domain candidates. `None` without a reference point or for
    /// non-finite input.
    pub fn hypervolume_improvement(&self, f: Vector2<f64>) -> Option<HvValue> {
        let r = self.reference_point?;
        if !(f.x.is_finite() && f.y.is_finite()) {
            return None;
        }
        let kind = self.precision.compute_kind;
        let current = hv::hv2(&self.pts, r, kind);
        let mut extended = self.pts.clone();
        extended.push(f);
        let with = hv::hv2(&extended, r, kind);
        Some(hv::finalize(
            hv::sub_values(with, current),
            self.precision.final_kind,
        ))
    }
}
