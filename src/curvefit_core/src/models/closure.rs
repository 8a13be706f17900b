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
use std::fmt::{self, Debug};

use super::{Model, check_params};
use crate::errors::FitResult;

/// Model built from a pair of functions.
///
/// This accepts two functions, the first evaluating the model at x for a set of
/// parameters. The second fills the partial derivatives of the model with respect
/// to each parameter. The number of parameters is the number of names provided.
///
/// ```
///     use curvefit_core::models::{ClosureModel, Model};
///     let line = ClosureModel::new(
///         &["slope", "intercept"],
///         |x, p| Ok(p[0] * x + p[1]),
///         |x, _p, out| {
///             out[0] = x;
///             out[1] = 1.0;
///             Ok(())
///         },
///     );
///     assert_eq!(line.evaluate(2.0, &[3.0, 1.0]).unwrap(), 7.0);
/// ```
pub struct ClosureModel<F, G> {
    names: &'static [&'static str],
    func: F,
    grad: G,
}

impl<F, G> ClosureModel<F, G>
where
    F: Fn(f64, &[f64]) -> FitResult<f64> + Send + Sync,
    G: Fn(f64, &[f64], &mut [f64]) -> FitResult<()> + Send + Sync,
{
    /// Construct a new model from its parameter names, value function, and gradient
    /// function.
    pub fn new(names: &'static [&'static str], func: F, grad: G) -> Self {
        Self { names, func, grad }
    }
}

impl<F, G> Debug for ClosureModel<F, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureModel")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

impl<F, G> Model for ClosureModel<F, G>
where
    F: Fn(f64, &[f64]) -> FitResult<f64> + Send + Sync,
    G: Fn(f64, &[f64], &mut [f64]) -> FitResult<()> + Send + Sync,
{
    fn n_params(&self) -> usize {
        self.names.len()
    }

    fn param_names(&self) -> &[&str] {
        self.names
    }

    fn evaluate(&self, x: f64, params: &[f64]) -> FitResult<f64> {
        check_params(self, params)?;
        (self.func)(x, params)
    }

    fn gradient(&self, x: f64, params: &[f64], out: &mut [f64]) -> FitResult<()> {
        check_params(self, params)?;
        (self.grad)(x, params, out)
    }
}
