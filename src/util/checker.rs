//! Cardinality checks shared by every entity's `check()`.
//!
//! Each entity names one reference length (e.g. the number of years, events or
//! centroids) and the arrays that must agree with it. The first disagreeing
//! array is logged and returned; the remaining ones are not inspected.
use crate::error::ValidationError;
use tracing::error;

/// Verifies that a single array has the expected length.
///
/// Logs `Invalid <owner>.<field> size: <expected> != <actual>.` at error level
/// before returning the failure.
pub fn check_size(
    owner: &str,
    field: &str,
    expected: usize,
    actual: usize,
) -> Result<(), ValidationError> {
    if expected == actual {
        return Ok(());
    }
    let err = ValidationError {
        owner: owner.to_string(),
        field: field.to_string(),
        expected,
        actual,
    };
    error!("{}.", err);
    Err(err)
}

/// Verifies that every named array has `reference_len` entries, stopping at the
/// first mismatch.
pub fn check_obligatories(
    owner: &str,
    reference_len: usize,
    fields: &[(&str, usize)],
) -> Result<(), ValidationError> {
    fields
        .iter()
        .try_for_each(|&(field, len)| check_size(owner, field, reference_len, len))
}

/// Like [`check_obligatories`], but empty arrays are accepted as "not provided".
pub fn check_optionals(
    owner: &str,
    reference_len: usize,
    fields: &[(&str, usize)],
) -> Result<(), ValidationError> {
    fields
        .iter()
        .filter(|&&(_, len)| len != 0)
        .try_for_each(|&(field, len)| check_size(owner, field, reference_len, len))
}

/// Verifies both dimensions of a matrix, rows first.
pub fn check_shape(
    owner: &str,
    field: &str,
    expected: (usize, usize),
    actual: (usize, usize),
) -> Result<(), ValidationError> {
    check_size(owner, &format!("{} row", field), expected.0, actual.0)?;
    check_size(owner, &format!("{} column", field), expected.1, actual.1)
}
