//! Objective-count resolution and input validation for the factories.
//!
//! Resolution order: default 2 when nothing is given; an explicit `n_obj`
//! otherwise, cross-checked against whatever else is present; else the first
//! objective vector; else the reference point. Disagreement between the two
//! authoritative sources (vectors and reference point) is a hard error;
//! disagreement with a declared count is corrected and recorded as a
//! diagnostic. An empty vector list counts as absent.

use crate::diag::Diagnostic;
use crate::error::{ArchiveError, ConfigIssue};

/// Resolve the objective count for one construction call.
///
/// Pushes a diagnostic for every soft override it applies; the only hard
/// error here is the vectors-vs-reference-point length conflict.
pub(crate) fn resolve_n_obj(
    f_vals: Option<&[Vec<f64>]>,
    reference_point: Option<&[f64]>,
    declared: Option<usize>,
    diags: &mut Vec<Diagnostic>,
) -> Result<usize, ArchiveError> {
    let first = f_vals.and_then(|rows| rows.first());
    let mut n_obj = match (first, reference_point, declared) {
        // Nothing to infer from, nothing to cross-check.
        (None, None, None) => return Ok(2),
        (_, _, Some(n)) => n,
        (Some(row), _, None) => row.len(),
        (None, Some(r), None) => r.len(),
    };

    if let (Some(row), Some(r)) = (first, reference_point) {
        if r.len() != row.len() {
            return Err(ConfigIssue::ReferenceMismatch {
                reference_point: r.len(),
                f_vals: row.len(),
            }
            .into());
        }
        if n_obj != row.len() {
            diags.push(Diagnostic::NObjFromVectors {
                declared: n_obj,
                observed: row.len(),
            });
            n_obj = row.len();
        }
    } else if let Some(row) = first {
        if n_obj != row.len() {
            diags.push(Diagnostic::NObjFromVectors {
                declared: n_obj,
                observed: row.len(),
            });
            n_obj = row.len();
        }
    } else if let Some(r) = reference_point {
        if n_obj != r.len() {
            diags.push(Diagnostic::NObjFromReference {
                declared: n_obj,
                observed: r.len(),
            });
            n_obj = r.len();
        }
    }
    Ok(n_obj)
}

/// Every objective vector must match the resolved count and be finite.
pub(crate) fn validate_objectives(
    f_vals: Option<&[Vec<f64>]>,
    n_obj: usize,
) -> Result<(), ArchiveError> {
    let Some(rows) = f_vals else {
        return Ok(());
    };
    for (index, row) in rows.iter().enumerate() {
        if row.len() != n_obj {
            return Err(ConfigIssue::RaggedRow {
                index,
                expected: n_obj,
                found: row.len(),
            }
            .into());
        }
        if !row.iter().all(|v| v.is_finite()) {
            return Err(ConfigIssue::NonFinite { context: "f_vals" }.into());
        }
    }
    Ok(())
}

pub(crate) fn validate_reference(reference_point: Option<&[f64]>) -> Result<(), ArchiveError> {
    if let Some(r) = reference_point {
        if !r.iter().all(|v| v.is_finite()) {
            return Err(ConfigIssue::NonFinite {
                context: "reference_point",
            }
            .into());
        }
    }
    Ok(())
}

/// Constrained-mode pairing: objectives and constraints come together or not
/// at all, with matching outer lengths. Presence means `Some`, so an empty
/// pair of lists is still a valid (empty) configuration.
pub(crate) fn validate_constraints(
    f_vals: Option<&[Vec<f64>]>,
    g_vals: Option<&[Vec<f64>]>,
) -> Result<(), ArchiveError> {
    match (f_vals, g_vals) {
        (None, None) => Ok(()),
        (None, Some(_)) => Err(ConfigIssue::ConstraintsWithoutObjectives.into()),
        (Some(_), None) => Err(ConfigIssue::ObjectivesWithoutConstraints.into()),
        (Some(f), Some(g)) => {
            if f.len() != g.len() {
                return Err(ConfigIssue::ConstraintLengthMismatch {
                    f_vals: f.len(),
                    g_vals: g.len(),
                }
                .into());
            }
            for row in g {
                if !row.iter().all(|v| v.is_finite()) {
                    return Err(ConfigIssue::NonFinite { context: "g_vals" }.into());
                }
            }
            Ok(())
        }
    }
}
