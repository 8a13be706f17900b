// BSD 3-Clause License
//
// Copyright (c) 2026, Dar Dahlen
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
/// Sum of the squared residuals, Sr.
#[must_use]
pub fn sum_of_squares(residuals: &[f64]) -> f64 {
    residuals.iter().map(|r| r.powi(2)).sum()
}

/// Coefficient of determination, r^2 = (St - Sr) / St.
///
/// St is the total sum of squares of y around its mean. If y has no spread then r^2
/// is 1 for a perfect fit, otherwise 0.
#[must_use]
pub fn r_squared(y: &[f64], residuals: &[f64]) -> f64 {
    if y.is_empty() {
        return f64::NAN;
    }
    let mean = y.iter().sum::<f64>() / y.len() as f64;
    let total = y.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    let sr = sum_of_squares(residuals);
    if total == 0.0 {
        return if sr == 0.0 { 1.0 } else { 0.0 };
    }
    (total - sr) / total
}

/// Standard error of the estimate, `sqrt(Sr / (n - p))`.
///
/// This quantifies the spread around the fitted curve. NaN if there are no degrees of
/// freedom remaining.
#[must_use]
pub fn std_error(residuals: &[f64], n_params: usize) -> f64 {
    let Some(dof) = residuals.len().checked_sub(n_params).filter(|d| *d > 0) else {
        return f64::NAN;
    };
    (sum_of_squares(residuals) / dof as f64).sqrt()
}

/// Largest absolute residual, useful to bound how far any point sits from the curve.
#[must_use]
pub(crate) fn max_abs_residual(residuals: &[f64]) -> f64 {
    residuals
        .iter()
        .map(|r| r.abs())
        .max_by(f64::total_cmp)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::{max_abs_residual, r_squared, std_error, sum_of_squares};

    #[test]
    fn test_goodness() {
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];
        let residuals = [0.1, -0.1, 0.2, -0.2, 0.0];

        assert!((sum_of_squares(&residuals) - 0.1).abs() < 1e-14);
        // St = 10
        assert!((r_squared(&y, &residuals) - 0.99).abs() < 1e-14);
        assert!((std_error(&residuals, 2) - (0.1_f64 / 3.0).sqrt()).abs() < 1e-14);
        assert!(std_error(&residuals, 5).is_nan());
        assert!((max_abs_residual(&residuals) - 0.2).abs() < 1e-14);
        assert_eq!(max_abs_residual(&[-3.0, 1.0, 2.5]), 3.0);
        assert_eq!(max_abs_residual(&[]), 0.0);
    }

    #[test]
    fn test_flat_data() {
        let y = [2.0, 2.0, 2.0];
        assert_eq!(r_squared(&y, &[0.0, 0.0, 0.0]), 1.0);
        assert_eq!(r_squared(&y, &[0.1, 0.0, 0.0]), 0.0);
        assert!(r_squared(&[], &[]).is_nan());
    }
}
