use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::PyErr;

use gibbs_core::GibbsError;

pub(crate) fn to_py_err(err: GibbsError) -> PyErr {
    match err {
        GibbsError::FastaIo(io) => PyIOError::new_err(io.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}
