//! Archive construction and the kind-erased facade.
//!
//! The factories run four stages in order: precision selection, objective
//! count resolution, input validation, dispatch to a concrete archive. The
//! plain entry points use the process-wide precision caches and log soft
//! diagnostics; the `*_with` variants take an explicit cache and hand the
//! diagnostics back.

use nalgebra::{Vector2, Vector3, Vector4};

use crate::archive2::Archive2d;
use crate::archive3::Archive3d;
use crate::archive4::Archive4d;
use crate::cfg::{ArchiveCfg, CmoArchiveCfg};
use crate::constrained::CmoArchive;
use crate::diag::Diagnostic;
use crate::error::ArchiveError;
use crate::hv::HvValue;
use crate::precision::{cmo_precision, mo_precision, PrecisionCache, PrecisionPair};
use crate::resolve;

/// An archive of any supported objective count, with a slice-based surface.
/// Match on the variant for the typed interface.
#[derive(Clone, Debug)]
pub enum MoArchive {
    Bi(Archive2d),
    Tri(Archive3d),
    Quad(Archive4d),
}

#[inline]
fn to2(f: &[f64]) -> Option<Vector2<f64>> {
    (f.len() == 2).then(|| Vector2::new(f[0], f[1]))
}

#[inline]
fn to3(f: &[f64]) -> Option<Vector3<f64>> {
    (f.len() == 3).then(|| Vector3::new(f[0], f[1], f[2]))
}

#[inline]
fn to4(f: &[f64]) -> Option<Vector4<f64>> {
    (f.len() == 4).then(|| Vector4::new(f[0], f[1], f[2], f[3]))
}

impl MoArchive {
    pub fn n_obj(&self) -> usize {
        match self {
            Self::Bi(_) => 2,
            Self::Tri(_) => 3,
            Self::Quad(_) => 4,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Bi(a) => a.len(),
            Self::Tri(a) => a.len(),
            Self::Quad(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offer one candidate. Slices of the wrong arity are rejected.
    pub fn add(&mut self, f: &[f64], info: Option<String>) -> bool {
        match self {
            Self::Bi(a) => match to2(f) {
                Some(p) => a.add(p, info),
                None => false,
            },
            Self::Tri(a) => match to3(f) {
                Some(p) => a.add(p, info),
                None => false,
            },
            Self::Quad(a) => match to4(f) {
                Some(p) => a.add(p, info),
                None => false,
            },
        }
    }

    /// Offer candidates with positionally paired infos; rows of the wrong
    /// arity are skipped and still consume their info slot.
    pub fn add_list(&mut self, f_vals: Vec<Vec<f64>>, infos: Option<Vec<String>>) -> usize {
        let mut info_iter = infos.into_iter().flatten();
        match self {
            Self::Bi(a) => a.add_pairs(
                f_vals
                    .into_iter()
                    .map(move |row| (to2(&row), info_iter.next()))
                    .filter_map(|(p, info)| p.map(|p| (p, info))),
            ),
            Self::Tri(a) => a.add_pairs(
                f_vals
                    .into_iter()
                    .map(move |row| (to3(&row), info_iter.next()))
                    .filter_map(|(p, info)| p.map(|p| (p, info))),
            ),
            Self::Quad(a) => a.add_pairs(
                f_vals
                    .into_iter()
                    .map(move |row| (to4(&row), info_iter.next()))
                    .filter_map(|(p, info)| p.map(|p| (p, info))),
            ),
        }
    }

    pub fn remove(&mut self, f: &[f64]) -> bool {
        match self {
            Self::Bi(a) => to2(f).map(|p| a.remove(p)).unwrap_or(false),
            Self::Tri(a) => to3(f).map(|p| a.remove(p)).unwrap_or(false),
            Self::Quad(a) => to4(f).map(|p| a.remove(p)).unwrap_or(false),
        }
    }

    pub fn dominates(&self, f: &[f64]) -> bool {
        match self {
            Self::Bi(a) => to2(f).map(|p| a.dominates(p)).unwrap_or(false),
            Self::Tri(a) => to3(f).map(|p| a.dominates(p)).unwrap_or(false),
            Self::Quad(a) => to4(f).map(|p| a.dominates(p)).unwrap_or(false),
        }
    }

    pub fn in_domain(&self, f: &[f64]) -> bool {
        match self {
            Self::Bi(a) => to2(f).map(|p| a.in_domain(p)).unwrap_or(false),
            Self::Tri(a) => to3(f).map(|p| a.in_domain(p)).unwrap_or(false),
            Self::Quad(a) => to4(f).map(|p| a.in_domain(p)).unwrap_or(false),
        }
    }

    pub fn hypervolume(&self) -> Option<HvValue> {
        match self {
            Self::Bi(a) => a.hypervolume(),
            Self::Tri(a) => a.hypervolume(),
            Self::Quad(a) => a.hypervolume(),
        }
    }

    pub fn hypervolume_plus(&self) -> Option<HvValue> {
        match self {
            Self::Bi(a) => a.hypervolume_plus(),
            Self::Tri(a) => a.hypervolume_plus(),
            Self::Quad(a) => a.hypervolume_plus(),
        }
    }

    pub fn contributing_hypervolume(&self, f: &[f64]) -> Option<HvValue> {
        match self {
            Self::Bi(a) => to2(f).and_then(|p| a.contributing_hypervolume(p)),
            Self::Tri(a) => to3(f).and_then(|p| a.contributing_hypervolume(p)),
            Self::Quad(a) => to4(f).and_then(|p| a.contributing_hypervolume(p)),
        }
    }

    pub fn hypervolume_improvement(&self, f: &[f64]) -> Option<HvValue> {
        match self {
            Self::Bi(a) => to2(f).and_then(|p| a.hypervolume_improvement(p)),
            Self::Tri(a) => to3(f).and_then(|p| a.hypervolume_improvement(p)),
            Self::Quad(a) => to4(f).and_then(|p| a.hypervolume_improvement(p)),
        }
    }

    pub fn reference_point(&self) -> Option<Vec<f64>> {
        match self {
            Self::Bi(a) => a.reference_point().map(|r| r.as_slice().to_vec()),
            Self::Tri(a) => a.reference_point().map(|r| r.as_slice().to_vec()),
            Self::Quad(a) => a.reference_point().map(|r| r.as_slice().to_vec()),
        }
    }

    pub fn points(&self) -> Vec<Vec<f64>> {
        match self {
            Self::Bi(a) => a.points().iter().map(|p| p.as_slice().to_vec()).collect(),
            Self::Tri(a) => a.points().iter().map(|p| p.as_slice().to_vec()).collect(),
            Self::Quad(a) => a.points().iter().map(|p| p.as_slice().to_vec()).collect(),
        }
    }

    pub fn infos(&self) -> &[Option<String>] {
        match self {
            Self::Bi(a) => a.infos(),
            Self::Tri(a) => a.infos(),
            Self::Quad(a) => a.infos(),
        }
    }

    pub fn precision(&self) -> PrecisionPair {
        match self {
            Self::Bi(a) => a.precision(),
            Self::Tri(a) => a.precision(),
            Self::Quad(a) => a.precision(),
        }
    }
}

/// Route validated inputs to the archive for `n_obj`. Rows and reference
/// point have already been checked against `n_obj`.
pub(crate) fn dispatch(
    n_obj: usize,
    f_vals: Vec<Vec<f64>>,
    reference_point: Option<&[f64]>,
    infos: Option<Vec<String>>,
    precision: PrecisionPair,
) -> Result<MoArchive, ArchiveError> {
    match n_obj {
        2 => Ok(MoArchive::Bi(Archive2d::new(
            f_vals.iter().map(|r| Vector2::new(r[0], r[1])).collect(),
            reference_point.map(|r| Vector2::new(r[0], r[1])),
            infos,
            precision,
        ))),
        3 => Ok(MoArchive::Tri(Archive3d::new(
            f_vals
                .iter()
                .map(|r| Vector3::new(r[0], r[1], r[2]))
                .collect(),
            reference_point.map(|r| Vector3::new(r[0], r[1], r[2])),
            infos,
            precision,
        ))),
        4 => Ok(MoArchive::Quad(Archive4d::new(
            f_vals
                .iter()
                .map(|r| Vector4::new(r[0], r[1], r[2], r[3]))
                .collect(),
            reference_point.map(|r| Vector4::new(r[0], r[1], r[2], r[3])),
            infos,
            precision,
        ))),
        n => Err(ArchiveError::UnsupportedDimensionality(n)),
    }
}

/// Build an unconstrained archive from `cfg`.
///
/// Uses the process-wide [`mo_precision`] cache; soft corrections are logged
/// at warn level. See [`build_archive_with`] for the variant that returns
/// them instead.
pub fn build_archive(cfg: ArchiveCfg) -> Result<MoArchive, ArchiveError> {
    let (archive, diags) = build_archive_with(mo_precision(), cfg)?;
    for d in &diags {
        tracing::warn!("{d}");
    }
    Ok(archive)
}

/// [`build_archive`] with an explicit precision cache, returning the
/// diagnostics alongside the archive.
pub fn build_archive_with(
    cache: &PrecisionCache,
    cfg: ArchiveCfg,
) -> Result<(MoArchive, Vec<Diagnostic>), ArchiveError> {
    let mut diags = Vec::new();
    let precision = cache.resolve(&mut diags);
    let n_obj = resolve::resolve_n_obj(
        cfg.f_vals.as_deref(),
        cfg.reference_point.as_deref(),
        cfg.n_obj,
        &mut diags,
    )?;
    resolve::validate_objectives(cfg.f_vals.as_deref(), n_obj)?;
    resolve::validate_reference(cfg.reference_point.as_deref())?;
    let archive = dispatch(
        n_obj,
        cfg.f_vals.unwrap_or_default(),
        cfg.reference_point.as_deref(),
        cfg.infos,
        precision,
    )?;
    Ok((archive, diags))
}

/// Build a constrained archive from `cfg`, using the [`cmo_precision`]
/// cache. Soft corrections are logged at warn level.
pub fn build_cmo_archive(cfg: CmoArchiveCfg) -> Result<CmoArchive, ArchiveError> {
    let (archive, diags) = build_cmo_archive_with(cmo_precision(), cfg)?;
    for d in &diags {
        tracing::warn!("{d}");
    }
    Ok(archive)
}

/// [`build_cmo_archive`] with an explicit precision cache, returning the
/// diagnostics alongside the archive.
pub fn build_cmo_archive_with(
    cache: &PrecisionCache,
    cfg: CmoArchiveCfg,
) -> Result<(CmoArchive, Vec<Diagnostic>), ArchiveError> {
    let mut diags = Vec::new();
    let precision = cache.resolve(&mut diags);
    let n_obj = resolve::resolve_n_obj(
        cfg.f_vals.as_deref(),
        cfg.reference_point.as_deref(),
        cfg.n_obj,
        &mut diags,
    )?;
    resolve::validate_objectives(cfg.f_vals.as_deref(), n_obj)?;
    resolve::validate_reference(cfg.reference_point.as_deref())?;
    resolve::validate_constraints(cfg.f_vals.as_deref(), cfg.g_vals.as_deref())?;
    let archive = CmoArchive::from_parts(n_obj, cfg, precision)?;
    Ok((archive, diags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigIssue;
    use crate::precision::PrecisionKind;

    const EPS: f64 = 1e-12;

    fn fresh() -> PrecisionCache {
        PrecisionCache::new()
    }

    fn expected_kind() -> PrecisionKind {
        if cfg!(feature = "exact") {
            PrecisionKind::Exact
        } else {
            PrecisionKind::Float
        }
    }

    #[test]
    fn two_entry_vectors_build_a_bi_archive() {
        let cfg = ArchiveCfg {
            f_vals: Some(vec![vec![1.0, 2.0], vec![2.0, 1.0]]),
            ..ArchiveCfg::default()
        };
        let (archive, diags) = build_archive_with(&fresh(), cfg).unwrap();
        assert!(matches!(archive, MoArchive::Bi(_)));
        assert_eq!(archive.len(), 2);
        assert!(diags.is_empty());
    }

    #[test]
    fn declared_two_is_overridden_by_three_entry_vectors() {
        let cfg = ArchiveCfg {
            f_vals: Some(vec![vec![1.0, 2.0, 3.0]]),
            n_obj: Some(2),
            ..ArchiveCfg::default()
        };
        let (archive, diags) = build_archive_with(&fresh(), cfg).unwrap();
        assert!(matches!(archive, MoArchive::Tri(_)));
        assert_eq!(
            diags,
            vec![Diagnostic::NObjFromVectors {
                declared: 2,
                observed: 3,
            }]
        );
    }

    #[test]
    fn reference_point_alone_builds_an_empty_quad_archive() {
        let cfg = ArchiveCfg {
            reference_point: Some(vec![1.0, 1.0, 1.0, 1.0]),
            ..ArchiveCfg::default()
        };
        let (archive, diags) = build_archive_with(&fresh(), cfg).unwrap();
        assert!(matches!(archive, MoArchive::Quad(_)));
        assert!(archive.is_empty());
        assert!(diags.is_empty());
        assert_eq!(archive.hypervolume().unwrap().to_f64(), 0.0);
    }

    #[test]
    fn vectors_vs_reference_conflict_fails_construction() {
        let cfg = ArchiveCfg {
            f_vals: Some(vec![vec![1.0, 2.0]]),
            reference_point: Some(vec![1.0, 2.0, 3.0]),
            ..ArchiveCfg::default()
        };
        let err = build_archive_with(&fresh(), cfg).unwrap_err();
        assert_eq!(
            err,
            ArchiveError::InvalidConfiguration(ConfigIssue::ReferenceMismatch {
                reference_point: 3,
                f_vals: 2,
            })
        );
    }

    #[test]
    fn everything_absent_builds_a_bi_archive() {
        let (archive, diags) = build_archive_with(&fresh(), ArchiveCfg::default()).unwrap();
        assert!(matches!(archive, MoArchive::Bi(_)));
        assert!(archive.is_empty());
        assert!(diags.is_empty());
    }

    #[test]
    fn five_objectives_are_unsupported() {
        let cfg = ArchiveCfg {
            n_obj: Some(5),
            ..ArchiveCfg::default()
        };
        assert_eq!(
            build_archive_with(&fresh(), cfg).unwrap_err(),
            ArchiveError::UnsupportedDimensionality(5)
        );
    }

    #[test]
    fn zero_length_rows_are_unsupported_dimensionality() {
        let cfg = ArchiveCfg {
            f_vals: Some(vec![vec![]]),
            ..ArchiveCfg::default()
        };
        assert_eq!(
            build_archive_with(&fresh(), cfg).unwrap_err(),
            ArchiveError::UnsupportedDimensionality(0)
        );
    }

    #[test]
    fn ragged_rows_fail_validation() {
        let cfg = ArchiveCfg {
            f_vals: Some(vec![vec![1.0, 2.0], vec![1.0, 2.0, 3.0]]),
            ..ArchiveCfg::default()
        };
        assert!(matches!(
            build_archive_with(&fresh(), cfg).unwrap_err(),
            ArchiveError::InvalidConfiguration(ConfigIssue::RaggedRow { index: 1, .. })
        ));
    }

    #[test]
    fn non_finite_inputs_fail_validation() {
        let cfg = ArchiveCfg {
            f_vals: Some(vec![vec![1.0, f64::NAN]]),
            ..ArchiveCfg::default()
        };
        assert!(matches!(
            build_archive_with(&fresh(), cfg).unwrap_err(),
            ArchiveError::InvalidConfiguration(ConfigIssue::NonFinite { .. })
        ));
    }

    #[test]
    fn constrained_objectives_without_constraints_fail() {
        let cfg = CmoArchiveCfg {
            f_vals: Some(vec![vec![1.0, 2.0]]),
            ..CmoArchiveCfg::default()
        };
        assert_eq!(
            build_cmo_archive_with(&fresh(), cfg).unwrap_err(),
            ArchiveError::InvalidConfiguration(ConfigIssue::ObjectivesWithoutConstraints)
        );
    }

    #[test]
    fn constrained_dimension_checks_run_before_pairing() {
        // The resolver's hard error wins over the missing constraints.
        let cfg = CmoArchiveCfg {
            f_vals: Some(vec![vec![1.0, 2.0]]),
            reference_point: Some(vec![1.0, 2.0, 3.0]),
            ..CmoArchiveCfg::default()
        };
        assert!(matches!(
            build_cmo_archive_with(&fresh(), cfg).unwrap_err(),
            ArchiveError::InvalidConfiguration(ConfigIssue::ReferenceMismatch { .. })
        ));
    }

    #[test]
    fn constrained_unsupported_dimension_surfaces_from_the_inner_dispatch() {
        let cfg = CmoArchiveCfg {
            n_obj: Some(6),
            ..CmoArchiveCfg::default()
        };
        assert_eq!(
            build_cmo_archive_with(&fresh(), cfg).unwrap_err(),
            ArchiveError::UnsupportedDimensionality(6)
        );
    }

    #[test]
    fn precision_pair_reaches_the_archive() {
        let cache = fresh();
        assert!(cache.set(PrecisionPair::float()).is_ok());
        let cfg = ArchiveCfg {
            f_vals: Some(vec![vec![1.0, 2.0]]),
            reference_point: Some(vec![4.0, 4.0]),
            ..ArchiveCfg::default()
        };
        let (archive, _) = build_archive_with(&cache, cfg).unwrap();
        assert_eq!(archive.precision(), PrecisionPair::float());
        assert_eq!(
            archive.hypervolume().unwrap().kind(),
            PrecisionKind::Float
        );
    }

    #[test]
    fn default_entry_point_uses_the_detected_precision() {
        let archive = build_archive(ArchiveCfg::default()).unwrap();
        assert_eq!(archive.precision().final_kind, expected_kind());

        // The same process-wide slot answers every later call.
        let again = build_archive(ArchiveCfg::default()).unwrap();
        assert_eq!(again.precision(), archive.precision());
    }

    #[test]
    fn facade_round_trip_on_a_tri_archive() {
        let cfg = ArchiveCfg {
            f_vals: Some(vec![vec![0.0, 1.0, 1.0], vec![1.0, 0.0, 1.0]]),
            reference_point: Some(vec![2.0, 2.0, 2.0]),
            infos: Some(vec!["a".into()]),
            ..ArchiveCfg::default()
        };
        let (mut archive, _) = build_archive_with(&fresh(), cfg).unwrap();
        assert_eq!(archive.n_obj(), 3);
        assert_eq!(archive.infos()[0].as_deref(), Some("a"));
        assert_eq!(archive.reference_point(), Some(vec![2.0, 2.0, 2.0]));

        assert!(archive.add(&[1.0, 1.0, 0.0], None));
        assert!((archive.hypervolume().unwrap().to_f64() - 4.0).abs() < EPS);
        assert!(archive.dominates(&[1.5, 1.5, 1.0]));
        assert!(archive.in_domain(&[1.5, 1.5, 1.0]));
        assert!(archive.remove(&[1.0, 1.0, 0.0]));
        assert_eq!(archive.len(), 2);

        // Wrong arity never matches anything.
        assert!(!archive.add(&[1.0, 1.0], None));
        assert!(!archive.dominates(&[0.0, 0.0]));
        assert!(archive.contributing_hypervolume(&[0.0]).is_none());
    }

    #[test]
    fn facade_add_list_skips_misshapen_rows() {
        let cfg = ArchiveCfg {
            reference_point: Some(vec![10.0, 10.0]),
            ..ArchiveCfg::default()
        };
        let (mut archive, _) = build_archive_with(&fresh(), cfg).unwrap();
        let added = archive.add_list(
            vec![vec![1.0, 3.0], vec![1.0, 2.0, 3.0], vec![3.0, 1.0]],
            Some(vec!["a".into(), "dropped".into(), "c".into()]),
        );
        assert_eq!(added, 2);
        let labels: Vec<Option<&str>> =
            archive.infos().iter().map(|i| i.as_deref()).collect();
        assert_eq!(labels, vec![Some("a"), Some("c")]);
    }
}
