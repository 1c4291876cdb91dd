#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use pyo3::types::PyModule;

use gibbs_core::{find_motif as core_find_motif, MotifHit, SearchConfig, Termination};

use crate::sequences::PySequenceSet;
use crate::utils::to_py_err;

#[pyclass(frozen, name = "MotifHit")]
pub struct PyMotifHit {
    inner: MotifHit,
    ids: Vec<String>,
    windows: Vec<String>,
}

#[pymethods]
impl PyMotifHit {
    #[getter]
    fn positions(&self) -> Vec<usize> {
        self.inner.positions.clone()
    }

    #[getter]
    fn motif_len(&self) -> usize {
        self.inner.motif_len
    }

    #[getter]
    fn score(&self) -> f64 {
        self.inner.score
    }

    #[getter]
    fn consensus(&self) -> &str {
        &self.inner.consensus
    }

    #[getter]
    fn restart(&self) -> usize {
        self.inner.restart
    }

    #[getter]
    fn start_len(&self) -> usize {
        self.inner.start_len
    }

    #[getter]
    fn iterations(&self) -> usize {
        self.inner.iterations
    }

    #[getter]
    fn termination(&self) -> &'static str {
        match self.inner.termination {
            Termination::Plateau => "plateau",
            Termination::IterationCap => "iteration_cap",
        }
    }

    fn windows(&self) -> Vec<String> {
        self.windows.clone()
    }

    /// `(motif, start, end, id)` per sequence, 1-based inclusive coordinates.
    fn sites(&self) -> Vec<(String, usize, usize, String)> {
        self.windows
            .iter()
            .zip(&self.inner.positions)
            .zip(&self.ids)
            .map(|((w, &pos), id)| (w.clone(), pos + 1, pos + self.inner.motif_len, id.clone()))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "MotifHit(motif_len={}, score={:.4}, n={})",
            self.inner.motif_len,
            self.inner.score,
            self.inner.positions.len()
        )
    }
}

#[pyfunction]
#[allow(clippy::too_many_arguments)]
#[pyo3(signature = (
    sequences,
    motif_len,
    restarts=200,
    seed=None,
    max_iterations=2000,
    plateau=150,
    shift_probability=0.05,
    length_probability=0.10,
    halve_oversized_guess=false,
    length_jitter=0,
    pseudocount=0.125,
    min_total_score=0.0,
    null_shuffles=4,
    null_margin=1.3,
))]
fn find_motif(
    py: Python<'_>,
    sequences: &PySequenceSet,
    motif_len: usize,
    restarts: usize,
    seed: Option<u64>,
    max_iterations: usize,
    plateau: usize,
    shift_probability: f64,
    length_probability: f64,
    halve_oversized_guess: bool,
    length_jitter: usize,
    pseudocount: f64,
    min_total_score: f64,
    null_shuffles: usize,
    null_margin: f64,
) -> PyResult<PyMotifHit> {
    let config = SearchConfig {
        restarts,
        seed,
        max_iterations,
        plateau_threshold: plateau,
        shift_probability,
        length_probability,
        halve_oversized_guess,
        length_jitter,
        pseudocount,
        min_total_score,
        null_shuffles,
        null_margin,
        ..SearchConfig::default()
    };
    let set = &sequences.inner;

    // Release GIL while the restarts run
    let inner = py
        .allow_threads(|| core_find_motif(set, motif_len, &config))
        .map_err(to_py_err)?;

    Ok(PyMotifHit {
        ids: set.iter().map(|s| s.id().to_string()).collect(),
        windows: inner.windows(set),
        inner,
    })
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMotifHit>()?;
    m.add_function(wrap_pyfunction!(find_motif, m)?)?;
    Ok(())
}
