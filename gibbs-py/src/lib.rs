use pyo3::prelude::*;

mod motif;
mod sequences;
mod utils;

#[pymodule]
fn _native(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    sequences::register(m)?;
    motif::register(m)?;
    Ok(())
}
