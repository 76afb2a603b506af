//! PyO3 bindings for the `moarchive` factories and archive handles.
//!
//! Notes
//! - Keep bindings thin and predictable; objective vectors cross the boundary
//!   as plain lists of floats.
//! - Construction errors surface as `ValueError`; soft corrections are logged
//!   on the Rust side only.

use moarchive::{build_archive, build_cmo_archive, CmoArchive, MoArchive};
use pyo3::prelude::*;

mod common;

use common::{archive_cfg, cmo_archive_cfg, map_archive_err, to_py_value};

/// An unconstrained non-dominated archive with hypervolume bookkeeping.
#[pyclass(name = "MoArchive")]
struct PyMoArchive {
    inner: MoArchive,
}

#[pymethods]
impl PyMoArchive {
    fn add(&mut self, f: Vec<f64>, info: Option<String>) -> bool {
        self.inner.add(&f, info)
    }

    fn add_list(&mut self, f_vals: Vec<Vec<f64>>, infos: Option<Vec<String>>) -> usize {
        self.inner.add_list(f_vals, infos)
    }

    fn remove(&mut self, f: Vec<f64>) -> bool {
        self.inner.remove(&f)
    }

    fn dominates(&self, f: Vec<f64>) -> bool {
        self.inner.dominates(&f)
    }

    fn in_domain(&self, f: Vec<f64>) -> bool {
        self.inner.in_domain(&f)
    }

    fn hypervolume(&self) -> Option<f64> {
        to_py_value(self.inner.hypervolume())
    }

    fn hypervolume_plus(&self) -> Option<f64> {
        to_py_value(self.inner.hypervolume_plus())
    }

    fn contributing_hypervolume(&self, f: Vec<f64>) -> Option<f64> {
        to_py_value(self.inner.contributing_hypervolume(&f))
    }

    fn hypervolume_improvement(&self, f: Vec<f64>) -> Option<f64> {
        to_py_value(self.inner.hypervolume_improvement(&f))
    }

    fn points(&self) -> Vec<Vec<f64>> {
        self.inner.points()
    }

    fn infos(&self) -> Vec<Option<String>> {
        self.inner.infos().to_vec()
    }

    fn reference_point(&self) -> Option<Vec<f64>> {
        self.inner.reference_point()
    }

    fn n_obj(&self) -> usize {
        self.inner.n_obj()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}

/// A constrained archive: feasible candidates feed an inner archive, the
/// indicator blends constraint violations in before any candidate is feasible.
#[pyclass(name = "CmoArchive")]
struct PyCmoArchive {
    inner: CmoArchive,
}

#[pymethods]
impl PyCmoArchive {
    fn add(&mut self, f: Vec<f64>, g: Vec<f64>, info: Option<String>) -> bool {
        self.inner.add(&f, &g, info)
    }

    fn add_list(
        &mut self,
        f_vals: Vec<Vec<f64>>,
        g_vals: Vec<Vec<f64>>,
        infos: Option<Vec<String>>,
    ) -> usize {
        self.inner.add_list(&f_vals, &g_vals, infos)
    }

    fn remove(&mut self, f: Vec<f64>) -> bool {
        self.inner.remove(&f)
    }

    fn dominates(&self, f: Vec<f64>) -> bool {
        self.inner.dominates(&f)
    }

    fn in_domain(&self, f: Vec<f64>) -> bool {
        self.inner.in_domain(&f)
    }

    fn hypervolume(&self) -> Option<f64> {
        to_py_value(self.inner.hypervolume())
    }

    fn indicator(&self) -> Option<f64> {
        to_py_value(self.inner.indicator())
    }

    fn points(&self) -> Vec<Vec<f64>> {
        self.inner.points()
    }

    fn infos(&self) -> Vec<Option<String>> {
        self.inner.infos().to_vec()
    }

    fn reference_point(&self) -> Option<Vec<f64>> {
        self.inner.reference_point()
    }

    fn n_obj(&self) -> usize {
        self.inner.n_obj()
    }

    fn tau(&self) -> f64 {
        self.inner.tau()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}

/// Build an unconstrained archive; raises `ValueError` on inconsistent inputs.
#[pyfunction]
#[pyo3(signature = (f_vals=None, reference_point=None, infos=None, n_obj=None))]
fn mo_archive(
    f_vals: Option<Vec<Vec<f64>>>,
    reference_point: Option<Vec<f64>>,
    infos: Option<Vec<String>>,
    n_obj: Option<usize>,
) -> PyResult<PyMoArchive> {
    let inner = build_archive(archive_cfg(f_vals, reference_point, infos, n_obj))
        .map_err(map_archive_err)?;
    Ok(PyMoArchive { inner })
}

/// Build a constrained archive; `f_vals` and `g_vals` come together or not
/// at all.
#[pyfunction]
#[pyo3(signature = (f_vals=None, g_vals=None, reference_point=None, infos=None, n_obj=None, tau=1.0))]
fn cmo_archive(
    f_vals: Option<Vec<Vec<f64>>>,
    g_vals: Option<Vec<Vec<f64>>>,
    reference_point: Option<Vec<f64>>,
    infos: Option<Vec<String>>,
    n_obj: Option<usize>,
    tau: f64,
) -> PyResult<PyCmoArchive> {
    let inner = build_cmo_archive(cmo_archive_cfg(
        f_vals,
        g_vals,
        reference_point,
        infos,
        n_obj,
        tau,
    ))
    .map_err(map_archive_err)?;
    Ok(PyCmoArchive { inner })
}

#[pymodule]
fn moarchive_native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMoArchive>()?;
    m.add_class::<PyCmoArchive>()?;
    m.add_function(wrap_pyfunction!(mo_archive, m)?)?;
    m.add_function(wrap_pyfunction!(cmo_archive, m)?)?;
    Ok(())
}
