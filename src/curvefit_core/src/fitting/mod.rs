//! # Fitting
//! Nonlinear least squares fitting of models to observations.
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

mod batch;
mod gauss_newton;
mod goodness;
mod observer;

pub use self::batch::{FitRequest, fit_many};
pub use self::gauss_newton::{gauss_newton, jacobian, relative_change, residuals};
pub use self::goodness::{r_squared, std_error, sum_of_squares};
pub use self::observer::{IterationState, LogObserver, Observer, TraceObserver};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, FitResult};

/// Settings which control when the Gauss-Newton iteration stops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitSettings {
    /// Converged when the relative change of every parameter is below this value.
    ///
    /// 0.01 corresponds to a 1% change between iterations.
    pub tolerance: f64,

    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,

    /// Normal equations are treated as singular when the ratio of the smallest to
    /// largest eigenvalue is at or below this value.
    pub min_rcond: f64,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            max_iterations: 100,
            min_rcond: 1e-13,
        }
    }
}

impl FitSettings {
    /// Replace the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replace the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Check that the settings can be used for a fit.
    ///
    /// # Errors
    /// [`Error::InvalidSettings`] if the tolerance is not a positive finite number, the
    /// iteration cap is zero, or `min_rcond` is negative or non-finite.
    pub fn validate(&self) -> FitResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            Err(Error::InvalidSettings(format!(
                "Tolerance must be positive and finite, got {}.",
                self.tolerance
            )))?;
        }
        if self.max_iterations == 0 {
            Err(Error::InvalidSettings(
                "At least one iteration is required.".into(),
            ))?;
        }
        if !self.min_rcond.is_finite() || self.min_rcond < 0.0 {
            Err(Error::InvalidSettings(format!(
                "min_rcond must be non-negative and finite, got {}.",
                self.min_rcond
            )))?;
        }
        Ok(())
    }
}

/// Outcome of a fit.
///
/// Returned directly on convergence, or inside [`Error::NonConvergence`] when the
/// iteration cap was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    /// Final parameters, in the order the model defines them.
    pub params: Vec<f64>,

    /// True if the tolerance was satisfied.
    pub converged: bool,

    /// Number of iterations performed.
    pub iterations: usize,

    /// Observed minus predicted value for every observation at the final parameters.
    pub residuals: Vec<f64>,

    /// Sum of the squared residuals.
    pub sum_squares: f64,

    /// Coefficient of determination.
    pub r_squared: f64,

    /// Standard error of the estimate, NaN when there are no degrees of freedom.
    pub std_error: f64,
}

impl FitReport {
    /// Assemble a report from final parameters and residuals.
    pub(crate) fn new(
        params: Vec<f64>,
        converged: bool,
        iterations: usize,
        y: &[f64],
        residuals: Vec<f64>,
    ) -> Self {
        let n_params = params.len();
        Self {
            sum_squares: sum_of_squares(&residuals),
            r_squared: r_squared(y, &residuals),
            std_error: std_error(&residuals, n_params),
            params,
            converged,
            iterations,
            residuals,
        }
    }

    /// Largest absolute residual, how far the worst observation sits from the curve.
    #[must_use]
    pub fn max_abs_residual(&self) -> f64 {
        goodness::max_abs_residual(&self.residuals)
    }
}

impl fmt::Display for FitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.converged {
            "converged"
        } else {
            "not converged"
        };
        writeln!(f, "Fit {status} after {} iterations", self.iterations)?;
        for (idx, param) in self.params.iter().enumerate() {
            writeln!(f, "  param[{idx}] = {param:.6}")?;
        }
        writeln!(f, "  Sr         = {:.6e}", self.sum_squares)?;
        writeln!(f, "  r^2        = {:.6}", self.r_squared)?;
        write!(f, "  s_y/x      = {:.6e}", self.std_error)
    }
}

#[cfg(test)]
mod tests {
    use super::{FitReport, FitSettings};
    use crate::errors::Error;

    #[test]
    fn test_settings() {
        let settings = FitSettings::default();
        assert_eq!(settings.tolerance, 0.01);
        assert_eq!(settings.max_iterations, 100);
        assert!(settings.validate().is_ok());

        let settings = settings.with_tolerance(1e-8).with_max_iterations(5);
        assert_eq!(settings.tolerance, 1e-8);
        assert_eq!(settings.max_iterations, 5);
    }

    #[test]
    fn test_settings_invalid() {
        for settings in [
            FitSettings::default().with_tolerance(0.0),
            FitSettings::default().with_tolerance(-1.0),
            FitSettings::default().with_tolerance(f64::NAN),
            FitSettings::default().with_max_iterations(0),
            FitSettings {
                min_rcond: -1.0,
                ..Default::default()
            },
        ] {
            assert!(matches!(
                settings.validate(),
                Err(Error::InvalidSettings(_))
            ));
        }
    }

    #[test]
    fn test_report() {
        let y = [1.0, 2.0, 3.0, 4.0];
        let report = FitReport::new(vec![1.0, 0.0], true, 3, &y, vec![0.0; 4]);
        assert_eq!(report.sum_squares, 0.0);
        assert_eq!(report.r_squared, 1.0);
        assert_eq!(report.std_error, 0.0);
        assert_eq!(report.max_abs_residual(), 0.0);

        let text = report.to_string();
        assert!(text.starts_with("Fit converged after 3 iterations"));
    }

    #[test]
    fn test_report_json() {
        let y = [1.0, 2.0, 3.0, 4.0];
        let residuals = vec![0.5, -0.5, 0.25, -0.25];
        let report = FitReport::new(vec![1.5, -0.25], false, 7, &y, residuals);
        let text = serde_json::to_string(&report).unwrap();
        assert!(text.contains("\"converged\":false"));

        let back: FitReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back.params, report.params);
        assert_eq!(back.residuals, report.residuals);
        assert_eq!(back.iterations, 7);
        assert!(!back.converged);
        assert!((back.r_squared - report.r_squared).abs() < 1e-12);
        assert!((back.std_error - report.std_error).abs() < 1e-12);
    }
}
