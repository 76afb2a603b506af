//! Construction inputs for the archive factories.
//!
//! Plain structs with public fields; `Default` gives the all-absent
//! configuration so call sites can use struct-update syntax for the parts
//! they care about.

/// Inputs for an unconstrained archive.
#[derive(Clone, Debug, Default)]
pub struct ArchiveCfg {
    /// Objective vectors, one per candidate solution. `None` and `Some` of an
    /// empty list both build an empty archive.
    pub f_vals: Option<Vec<Vec<f64>>>,
    /// Upper corner of the dominated region. Without it the archive still
    /// maintains the non-dominated set but reports no hypervolume.
    pub reference_point: Option<Vec<f64>>,
    /// Optional per-candidate labels, carried alongside surviving points.
    /// Missing tail entries are padded with `None`, extras are ignored.
    pub infos: Option<Vec<String>>,
    /// Declared objective count. A hint only: observed lengths override it.
    pub n_obj: Option<usize>,
}

/// Inputs for a constrained archive.
#[derive(Clone, Debug)]
pub struct CmoArchiveCfg {
    /// Objective vectors; must be paired with `g_vals`.
    pub f_vals: Option<Vec<Vec<f64>>>,
    /// Constraint vectors, one per objective vector. Positive entries are
    /// violations; a candidate is feasible when none are positive.
    pub g_vals: Option<Vec<Vec<f64>>>,
    pub reference_point: Option<Vec<f64>>,
    pub infos: Option<Vec<String>>,
    pub n_obj: Option<usize>,
    /// Feasibility threshold folded into the indicator while no feasible
    /// candidate has been seen. Passed through uninterpreted.
    pub tau: f64,
}

impl Default for CmoArchiveCfg {
    fn default() -> Self {
        Self {
            f_vals: None,
            g_vals: None,
            reference_point: None,
            infos: None,
            n_obj: None,
            tau: 1.0,
        }
    }
}
