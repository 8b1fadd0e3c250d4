//! Bracketed root finding.

use crate::error::{GeometryError, GeometryResult};

/// Upper bound on bisection steps; 2^-200 of any finite bracket is below
/// every `delta` worth asking for.
const MAX_BISECTIONS: usize = 200;

/// Finds a root of `f` between `lower` and `upper` by bisection.
///
/// `f(lower)` and `f(upper)` must differ in sign and the root is assumed to
/// be unique inside the bracket. Bisection stops once the bracket is narrower
/// than `delta` and the midpoint is returned.
pub fn root_binary_search<F>(f: F, lower: f64, upper: f64, delta: f64) -> GeometryResult<f64>
where
    F: Fn(f64) -> f64,
{
    if !(delta.is_finite() && delta > 0.0) {
        return Err(GeometryError::InvalidArgument(format!(
            "search resolution must be positive, got {}",
            delta
        )));
    }
    if !(lower.is_finite() && upper.is_finite()) {
        return Err(GeometryError::InvalidArgument(
            "search bracket must be finite".to_string(),
        ));
    }

    let mut f_low = f(lower);
    let f_high = f(upper);
    if f_low == 0.0 {
        return Ok(lower);
    }
    if f_high == 0.0 {
        return Ok(upper);
    }
    if f_low.is_nan() || f_high.is_nan() || f_low.signum() == f_high.signum() {
        return Err(GeometryError::NoSignChange { lower, upper });
    }

    let (mut low, mut high) = (lower, upper);
    for _ in 0..MAX_BISECTIONS {
        if (high - low).abs() <= delta {
            break;
        }
        let mid = 0.5 * (low + high);
        let f_mid = f(mid);
        if f_mid == 0.0 {
            return Ok(mid);
        }
        if f_mid.signum() == f_low.signum() {
            low = mid;
            f_low = f_mid;
        } else {
            high = mid;
        }
    }
    Ok(0.5 * (low + high))
}
