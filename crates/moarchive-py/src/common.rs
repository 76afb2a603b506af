use moarchive::{ArchiveCfg, ArchiveError, CmoArchiveCfg, HvValue};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

pub fn map_archive_err(err: ArchiveError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Hypervolume values cross into Python as floats; exact rationals convert
/// lossily at the boundary.
pub fn to_py_value(value: Option<HvValue>) -> Option<f64> {
    value.map(|v| v.to_f64())
}

pub fn archive_cfg(
    f_vals: Option<Vec<Vec<f64>>>,
    reference_point: Option<Vec<f64>>,
    infos: Option<Vec<String>>,
    n_obj: Option<usize>,
) -> ArchiveCfg {
    ArchiveCfg {
        f_vals,
        reference_point,
        infos,
        n_obj,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn cmo_archive_cfg(
    f_vals: Option<Vec<Vec<f64>>>,
    g_vals: Option<Vec<Vec<f64>>>,
    reference_point: Option<Vec<f64>>,
    infos: Option<Vec<String>>,
    n_obj: Option<usize>,
    tau: f64,
) -> CmoArchiveCfg {
    CmoArchiveCfg {
        f_vals,
        g_vals,
        reference_point,
        infos,
        n_obj,
        tau,
    }
}
