//! Constrained archive: a feasibility gate in front of an inner archive.
//!
//! Candidates carry a constraint vector next to their objectives. Positive
//! constraint entries are violations and their sum is the candidate's
//! violation; only zero-violation candidates may reach the inner archive.
//! Until one does, the indicator reports how close the infeasible offers
//! came, shifted by the threshold `tau`.

use crate::cfg::CmoArchiveCfg;
use crate::error::ArchiveError;
use crate::factory::{self, MoArchive};
use crate::hv::HvValue;
use crate::precision::PrecisionPair;

/// Sum of positive constraint entries; zero means feasible.
pub fn violation(g: &[f64]) -> f64 {
    g.iter().map(|v| v.max(0.0)).sum()
}

#[derive(Clone, Debug)]
pub struct CmoArchive {
    inner: MoArchive,
    tau: f64,
    /// Smallest violation among infeasible offers so far.
    best_violation: f64,
    /// Whether any candidate was ever offered.
    offered: bool,
    /// Whether any feasible candidate was ever offered, accepted or not.
    feasible_seen: bool,
}

impl CmoArchive {
    /// Called by the factory with the resolved objective count and validated
    /// inputs. Dimension handling lives in the inner dispatch.
    pub(crate) fn from_parts(
        n_obj: usize,
        cfg: CmoArchiveCfg,
        precision: PrecisionPair,
    ) -> Result<Self, ArchiveError> {
        let inner = factory::dispatch(
            n_obj,
            Vec::new(),
            cfg.reference_point.as_deref(),
            None,
            precision,
        )?;
        let mut archive = Self {
            inner,
            tau: cfg.tau,
            best_violation: f64::INFINITY,
            offered: false,
            feasible_seen: false,
        };
        let f_vals = cfg.f_vals.unwrap_or_default();
        let g_vals = cfg.g_vals.unwrap_or_default();
        archive.add_list(&f_vals, &g_vals, cfg.infos);
        Ok(archive)
    }

    /// Offer one candidate with its constraint vector. Returns whether it
    /// entered the inner archive; infeasible candidates never do.
    pub fn add(&mut self, f: &[f64], g: &[f64], info: Option<String>) -> bool {
        if !g.iter().all(|v| v.is_finite()) {
            return false;
        }
        self.offered = true;
        let violation = violation(g);
        if violation > 0.0 {
            if violation < self.best_violation {
                self.best_violation = violation;
            }
            return false;
        }
        self.feasible_seen = true;
        self.inner.add(f, info)
    }

    /// Offer paired candidates; infos pair positionally and pad as `None`.
    /// Returns how many entered the inner archive.
    pub fn add_list(
        &mut self,
        f_vals: &[Vec<f64>],
        g_vals: &[Vec<f64>],
        infos: Option<Vec<String>>,
    ) -> usize {
        let mut info_iter = infos.into_iter().flatten();
        let mut added = 0;
        for (f, g) in f_vals.iter().zip(g_vals) {
            if self.add(f, g, info_iter.next()) {
                added += 1;
            }
        }
        added
    }

    pub fn remove(&mut self, f: &[f64]) -> bool {
        self.inner.remove(f)
    }

    /// Constrained hypervolume-plus indicator.
    ///
    /// Negative infinity before any offer; `-(tau + best_violation)` while
    /// only infeasible candidates have been seen; the inner hypervolume-plus
    /// afterwards. That last stage is `None` without a reference point;
    /// sentinel values stay `f64` in either precision mode.
    pub fn indicator(&self) -> Option<HvValue> {
        if !self.offered {
            return Some(HvValue::Float(f64::NEG_INFINITY));
        }
        if !self.feasible_seen {
            return Some(HvValue::Float(-(self.tau + self.best_violation)));
        }
        self.inner.hypervolume_plus()
    }

    /// The feasible front, for typed access or the slice-based facade.
    pub fn archive(&self) -> &MoArchive {
        &self.inner
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn n_obj(&self) -> usize {
        self.inner.n_obj()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn points(&self) -> Vec<Vec<f64>> {
        self.inner.points()
    }

    pub fn infos(&self) -> &[Option<String>] {
        self.inner.infos()
    }

    pub fn reference_point(&self) -> Option<Vec<f64>> {
        self.inner.reference_point()
    }

    pub fn precision(&self) -> PrecisionPair {
        self.inner.precision()
    }

    pub fn hypervolume(&self) -> Option<HvValue> {
        self.inner.hypervolume()
    }

    pub fn dominates(&self, f: &[f64]) -> bool {
        self.inner.dominates(f)
    }

    pub fn in_domain(&self, f: &[f64]) -> bool {
        self.inner.in_domain(f)
    }
}
