//! Discrete and exponential-kernel convolution

use super::NumericsError;

/// Full discrete linear convolution of `a` and `b`
///
/// Returns `a.len() + b.len() - 1` samples, or an empty vector when either
/// input is empty.
///
/// # Example
/// ```rust
/// use tracersol::numerics::convolve_full;
///
/// let c = convolve_full(&[1.0, 2.0, 3.0], &[0.0, 1.0, 0.5]);
/// assert_eq!(c, vec![0.0, 1.0, 2.5, 4.0, 1.5]);
/// ```
pub fn convolve_full(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        if ai == 0.0 {
            continue;
        }
        for (o, &bj) in out[i..].iter_mut().zip(b) {
            *o += ai * bj;
        }
    }
    out
}

/// Convolution of `a(t)` with the kernel `exp(-t/tc) / tc`
///
/// The input is treated as piecewise linear between samples, for which the
/// recursion below is exact; `t` need not be uniformly spaced. A zero time
/// constant returns the input unchanged (the kernel tends to a delta) and an
/// infinite one returns zeros.
pub fn exp_conv(tc: f64, t: &[f64], a: &[f64]) -> Result<Vec<f64>, NumericsError> {
    if t.len() != a.len() {
        return Err(NumericsError::LengthMismatch {
            left: t.len(),
            right: a.len(),
        });
    }
    if tc == 0.0 {
        return Ok(a.to_vec());
    }
    if tc.is_infinite() {
        return Ok(vec![0.0; a.len()]);
    }

    let mut f = vec![0.0; t.len()];
    for i in 0..t.len().saturating_sub(1) {
        let x = (t[i + 1] - t[i]) / tc;
        if x == 0.0 {
            // Step underflows against the time constant
            f[i + 1] = f[i];
            continue;
        }
        let slope = (a[i + 1] - a[i]) / x;
        let decay = (-x).exp();
        let e0 = -(-x).exp_m1();
        let e1 = x - e0;
        f[i + 1] = decay * f[i] + a[i] * e0 + slope * e1;
    }
    Ok(f)
}
