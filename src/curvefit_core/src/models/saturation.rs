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
use crate::errors::FitResult;

/// Saturation growth model, an exponential approach to an asymptote.
///
/// y = a0 * (1 - exp(-a1 * x))
///
/// Parameters are ordered `[a0, a1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaturationGrowth;

impl Model for SaturationGrowth {
    fn n_params(&self) -> usize {
        2
    }

    fn param_names(&self) -> &[&str] {
        &["a0", "a1"]
    }

    fn evaluate(&self, x: f64, params: &[f64]) -> FitResult<f64> {
        check_params(self, params)?;
        let decay = (-params[1] * x).exp();
        finite_or_domain(params[0] * (1.0 - decay), x, "Saturation growth model")
    }

    fn gradient(&self, x: f64, params: &[f64], out: &mut [f64]) -> FitResult<()> {
        check_params(self, params)?;
        let decay = finite_or_domain((-params[1] * x).exp(), x, "exp(-a1 * x)")?;
        out[0] = 1.0 - decay;
        out[1] = finite_or_domain(params[0] * x * decay, x, "Derivative wrt a1")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SaturationGrowth;
    use crate::models::Model;
    use crate::models::tests::check_gradient;

    #[test]
    fn test_saturation_eval() {
        let params = [1.0, 1.0];
        assert_eq!(SaturationGrowth.evaluate(0.0, &params).unwrap(), 0.0);
        let y = SaturationGrowth.evaluate(1.0, &params).unwrap();
        assert!((y - (1.0 - (-1.0_f64).exp())).abs() < 1e-14);
    }

    #[test]
    fn test_saturation_gradient() {
        for x in [0.25, 0.75, 1.25, 1.75, 2.25] {
            check_gradient(&SaturationGrowth, x, &[1.0, 1.0], 1e-6);
        }
    }
}
