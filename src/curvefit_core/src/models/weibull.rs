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

use super::{Model, check_params, finite_or_domain};
use crate::errors::{Error, FitResult};

/// Weibull type growth model.
///
/// y = a - b * exp(-c * x^d)
///
/// Parameters are ordered `[a, b, c, d]`.
///
/// The partial with respect to d is the exact one, `b * c * x^d * ln(x) * exp(-c * x^d)`,
/// and is 0 at x = 0.
///
/// ```
///     use curvefit_core::models::{Model, Weibull};
///     let y = Weibull.evaluate(0.0, &[300.0, 200.0, 0.3, 0.4]).unwrap();
///     assert!((y - 100.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Weibull;

impl Weibull {
    /// Compute `x^d` and `exp(-c * x^d)`, failing if `x^d` has no real value.
    fn power_and_decay(x: f64, c: f64, d: f64) -> FitResult<(f64, f64)> {
        if x < 0.0 && d.fract() != 0.0 {
            Err(Error::Domain(format!(
                "x={x} is negative while the exponent d={d} is not an integer."
            )))?;
        }
        let x_d = finite_or_domain(x.powf(d), x, "x^d")?;
        let decay = finite_or_domain((-c * x_d).exp(), x, "exp(-c * x^d)")?;
        Ok((x_d, decay))
    }
}

impl Model for Weibull {
    fn n_params(&self) -> usize {
        4
    }

    fn param_names(&self) -> &[&str] {
        &["a", "b", "c", "d"]
    }

    fn evaluate(&self, x: f64, params: &[f64]) -> FitResult<f64> {
        check_params(self, params)?;
        let (a, b, c, d) = (params[0], params[1], params[2], params[3]);
        let (_, decay) = Self::power_and_decay(x, c, d)?;
        finite_or_domain(a - b * decay, x, "Weibull model")
    }

    fn gradient(&self, x: f64, params: &[f64], out: &mut [f64]) -> FitResult<()> {
        check_params(self, params)?;
        let (b, c, d) = (params[1], params[2], params[3]);

        // derivative wrt d requires ln(x), which has no real value for x < 0.
        if x < 0.0 {
            Err(Error::Domain(format!(
                "x={x} is negative, derivative with respect to d is undefined."
            )))?;
        }
        let (x_d, decay) = Self::power_and_decay(x, c, d)?;

        // x^d ln(x) tends to 0 as x approaches 0.
        let x_d_ln_x = if x == 0.0 { 0.0 } else { x_d * x.ln() };

        out[0] = 1.0;
        out[1] = -decay;
        out[2] = finite_or_domain(b * x_d * decay, x, "Derivative wrt c")?;
        out[3] = finite_or_domain(b * c * x_d_ln_x * decay, x, "Derivative wrt d")?;
        Ok(())
    }
}
