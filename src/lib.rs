//! Climate-risk entities (discount rates, impact functions, measures and
//! hazards) as checked, mergeable records.
//!
//! Every entity verifies that its per-item arrays agree in length before it is
//! used (`check`), can absorb another entity of the same kind (`append`), and
//! is queried read-only afterwards.

pub mod config;
pub mod entity;
pub mod error;
pub mod hazard;
pub mod tag;
pub mod util;

#[cfg(feature = "python")]
pub mod bindings {
    pub mod python;
}

pub use config::ReaderConfig;
pub use entity::{
    from_sources, Descriptions, DiscRates, Entity, ImpactFunc, ImpactFuncSet, Measure,
    MeasureSet, Mergeable, Sources,
};
pub use error::{EntityError, ValidationError};
pub use hazard::{Centroids, Hazard};
pub use tag::{Tag, TagValue};

// --- Python Module Definition ---
/// This function defines the `_core` Python module.
#[cfg(feature = "python")]
#[pyo3::pymodule]
fn _core(m: &pyo3::Bound<'_, pyo3::types::PyModule>) -> pyo3::PyResult<()> {
    use pyo3::prelude::*;
    m.add_function(wrap_pyfunction!(bindings::python::rust_core_version, m)?)?;
    m.add_class::<bindings::python::PyDiscRates>()?;
    Ok(())
}
