//! Tri-objective archive.
//!
//! No total order survives three objectives, so membership is a linear scan
//! against the dominance predicates and the point list keeps insertion
//! order. Hypervolume comes from the layered z-sweep kernel after every
//! mutation, same caching scheme as the bi-objective archive.

use nalgebra::Vector3;

use crate::dominance;
use crate::hv::{self, HvValue};
use crate::precision::PrecisionPair;

#[derive(Clone, Debug)]
pub struct Archive3d {
    /// Mutually non-dominated, in insertion order.
    pts: Vec<Vector3<f64>>,
    infos: Vec<Option<String>>,
    reference_point: Option<Vector3<f64>>,
    precision: PrecisionPair,
    hv: Option<HvValue>,
    best_outside: f64,
}

impl Archive3d {
    pub fn new(
        f_vals: Vec<Vector3<f64>>,
        reference_point: Option<Vector3<f64>>,
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

    pub fn add(&mut self, f: Vector3<f64>, info: Option<String>) -> bool {
        let accepted = self.insert_point(f, info);
        if accepted {
            self.refresh_hv();
        }
        accepted
    }

    pub fn add_list(&mut self, f_vals: Vec<Vector3<f64>>, infos: Option<Vec<String>>) -> usize {
        let mut info_iter = infos.into_iter().flatten();
        self.add_pairs(f_vals.into_iter().map(move |f| (f, info_iter.next())))
    }

    pub(crate) fn add_pairs(
        &mut self,
        pairs: impl IntoIterator<Item = (Vector3<f64>, Option<String>)>,
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

    pub fn remove(&mut self, f: Vector3<f64>) -> bool {
        match self.pts.iter().position(|p| *p == f) {
            Some(i) => {
                self.pts.remove(i);
                self.infos.remove(i);
                self.refresh_hv();
                true
            }
            None => false,
        }
    }

    fn insert_point(&mut self, f: Vector3<f64>, info: Option<String>) -> bool {
        if !f.iter().all(|v| v.is_finite()) {
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
        if self.dominates(f) {
            return false;
        }
        // Evict everything the newcomer weakly dominates, infos in lockstep.
        let mut keep = 0;
        for read in 0..self.pts.len() {
            if dominance::weakly_dominates(f.as_slice(), self.pts[read].as_slice()) {
                continue;
            }
            self.pts.swap(keep, read);
            self.infos.swap(keep, read);
            keep += 1;
        }
        self.pts.truncate(keep);
        self.infos.truncate(keep);
        self.pts.push(f);
        self.infos.push(info);
        true
    }

    fn refresh_hv(&mut self) {
        self.hv = self.reference_point.map(|r| {
            hv::finalize(
                hv::hv3(&self.pts, r, self.precision.compute_kind),
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

    pub fn points(&self) -> &[Vector3<f64>] {
        &self.pts
    }

    pub fn infos(&self) -> &[Option<String>] {
        &self.infos
    }

    pub fn reference_point(&self) -> Option<Vector3<f64>> {
        self.reference_point
    }

    pub fn precision(&self) -> PrecisionPair {
        self.precision
    }

    pub fn in_domain(&self, f: Vector3<f64>) -> bool {
        match self.reference_point {
            Some(r) => dominance::strictly_less(f.as_slice(), r.as_slice()),
            None => true,
        }
    }

    pub fn dominates(&self, f: Vector3<f64>) -> bool {
        self.pts
            .iter()
            .any(|p| dominance::weakly_dominates(p.as_slice(), f.as_slice()))
    }

    pub fn hypervolume(&self) -> Option<HvValue> {
        self.hv.clone()
    }

    pub fn hypervolume_plus(&self) -> Option<HvValue> {
        self.reference_point?;
        if self.pts.is_empty() {
            Some(HvValue::Float(self.best_outside))
        } else {
            self.hv.clone()
        }
    }

    pub fn contributing_hypervolume(&self, f: Vector3<f64>) -> Option<HvValue> {
        let r = self.reference_point?;
        let i = self.pts.iter().position(|p| *p == f)?;
        let mut rest = self.pts.clone();
        rest.remove(i);
        let kind = self.precision.compute_kind;
        let whole = hv::hv3(&self.pts, r, kind);
        let without = hv::hv3(&rest, r, kind);
        Some(hv::finalize(
            hv::sub_values(whole, without),
            self.precision.final_kind,
        ))
    }

    pub fn hypervolume_improvement(&self, f: Vector3<f64>) -> Option<HvValue> {
        let r = self.reference_point?;
        if !f.iter().all(|v| v.is_finite()) {
            return None;
        }
        let kind = self.precision.compute_kind;
        let current = hv::hv3(&self.pts, r, kind);
        let mut extended = self.pts.clone();
        extended.push(f);
        let with = hv::hv3(&extended, r, kind);
        Some(hv::finalize(
            hv::sub_values(with, current),
            self.precision.final_kind,
        ))
    }
}
