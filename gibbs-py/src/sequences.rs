#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use pyo3::types::PyModule;

use gibbs_core::io::read_sequence_set;
use gibbs_core::SequenceSet;

use crate::utils::to_py_err;

#[pyclass(frozen, name = "SequenceSet")]
pub struct PySequenceSet {
    pub(crate) inner: SequenceSet,
}

#[pymethods]
impl PySequenceSet {
    /// Build a set from `(id, sequence)` pairs; order is kept.
    #[new]
    fn new(records: Vec<(String, String)>) -> PyResult<Self> {
        SequenceSet::from_pairs(records)
            .map(|inner| Self { inner })
            .map_err(to_py_err)
    }

    fn ids(&self) -> Vec<String> {
        self.inner.iter().map(|s| s.id().to_string()).collect()
    }

    #[getter]
    fn min_len(&self) -> usize {
        self.inner.min_len()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "SequenceSet(n={}, min_len={})",
            self.inner.len(),
            self.inner.min_len()
        )
    }
}

#[pyfunction]
fn read_fasta(py: Python<'_>, path: &str) -> PyResult<PySequenceSet> {
    let inner = py
        .allow_threads(|| read_sequence_set(path))
        .map_err(to_py_err)?;
    Ok(PySequenceSet { inner })
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySequenceSet>()?;
    m.add_function(wrap_pyfunction!(read_fasta, m)?)?;
    Ok(())
}
