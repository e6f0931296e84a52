use crate::entity::{DiscRates, Entity, Mergeable};
use crate::error::EntityError;
use crate::tag::Tag;
use pyo3::exceptions::{PyNotImplementedError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

fn to_py_err(err: EntityError) -> PyErr {
    match err {
        EntityError::Validation(e) => PyValueError::new_err(e.to_string()),
        EntityError::NotImplemented { .. } => PyNotImplementedError::new_err(err.to_string()),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

#[pyclass(name = "_DiscRates")]
#[derive(Debug, Clone, Default)]
pub struct PyDiscRates {
    pub inner: DiscRates,
}

#[pymethods]
impl PyDiscRates {
    #[new]
    #[pyo3(signature = (years, rates, file_name = None, description = None))]
    pub fn new(
        years: Vec<i64>,
        rates: Vec<f64>,
        file_name: Option<String>,
        description: Option<String>,
    ) -> Self {
        let mut inner = DiscRates::new(years, rates);
        if let Some(file_name) = file_name {
            inner.tag = Tag::new(file_name, description.unwrap_or_default());
        }
        Self { inner }
    }

    #[getter]
    pub fn years(&self) -> Vec<i64> { self.inner.years.clone() }

    #[getter]
    pub fn rates(&self) -> Vec<f64> { self.inner.rates.clone() }

    #[getter]
    pub fn file_name(&self) -> String { self.inner.tag.file_name().to_string() }

    #[getter]
    pub fn description(&self) -> String { self.inner.tag.description().to_string() }

    pub fn check(&self) -> PyResult<()> {
        self.inner.check().map_err(to_py_err)
    }

    pub fn append(&mut self, other: &PyDiscRates) {
        self.inner.append(&other.inner);
    }

    pub fn select(&self, year_range: Vec<i64>) -> Option<PyDiscRates> {
        self.inner.select(&year_range).map(|inner| PyDiscRates { inner })
    }

    pub fn net_present_value(&self, year_start: i64, year_end: i64, values: Vec<f64>) -> PyResult<Option<f64>> {
        self.inner
            .net_present_value(year_start, year_end, &values)
            .map_err(to_py_err)
    }
}

/// Confirms the Rust core is callable from Python.
#[pyfunction]
pub fn rust_core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
