//! # Models
//! Regression models which may be fit to observations.
//!
//! A model describes itself through the [`Model`] trait, which provides the model
//! value and its gradient with respect to the fit parameters. The gradient is a
//! single row of the Jacobian used by the solver.
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

mod closure;
mod saturation;
mod weibull;

pub use self::closure::ClosureModel;
pub use self::saturation::SaturationGrowth;
pub use self::weibull::Weibull;

use crate::errors::{Error, FitResult};

/// Description of a regression model y = f(x; params).
///
/// Implementations must be pure, the solver may evaluate them any number of times
/// and in any order.
pub trait Model: Send + Sync {
    /// Number of fit parameters this model accepts.
    fn n_params(&self) -> usize;

    /// Human readable names of the parameters, used for diagnostics.
    fn param_names(&self) -> &[&str];

    /// Evaluate the model at the given x.
    ///
    /// # Errors
    /// [`Error::Domain`] when the model is undefined at x for these parameters.
    fn evaluate(&self, x: f64, params: &[f64]) -> FitResult<f64>;

    /// Fill `out` with the partial derivatives of the model with respect to each
    /// parameter, evaluated at x.
    ///
    /// # Errors
    /// [`Error::Domain`] when any partial derivative is undefined at x.
    fn gradient(&self, x: f64, params: &[f64], out: &mut [f64]) -> FitResult<()>;
}

/// Verify that the number of parameters provided matches what the model expects.
pub(crate) fn check_params(model: &dyn Model, params: &[f64]) -> FitResult<()> {
    if params.len() != model.n_params() {
        Err(Error::DimensionMismatch(format!(
            "Model expects {} parameters but {} were provided.",
            model.n_params(),
            params.len()
        )))?;
    }
    Ok(())
}

/// Reject non-finite model outputs.
pub(crate) fn finite_or_domain(val: f64, x: f64, what: &str) -> FitResult<f64> {
    if val.is_finite() {
        Ok(val)
    } else {
        Err(Error::Domain(format!("{what} is not finite at x={x}.")))
    }
}
