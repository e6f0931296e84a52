//! Discounting of yearly cash flows.

/// Net present value of `values` discounted with the per-year `rates`.
///
/// Accumulates backwards from the last year: `npv = v[k] + npv / (1 + r[k])`.
/// For a constant rate this is `sum(v[i] / (1 + r)^i)`. The accumulation order
/// is fixed so results are bit-for-bit reproducible.
///
/// Both slices must have the same, non-zero, length.
pub fn net_present_value(rates: &[f64], values: &[f64]) -> f64 {
    debug_assert_eq!(rates.len(), values.len());
    let Some((&last, rest)) = values.split_last() else {
        return 0.0;
    };
    rest.iter()
        .rev()
        .zip(rates[..rest.len()].iter().rev())
        .fold(last, |npv, (&val, &rate)| val + npv / (1.0 + rate))
}
