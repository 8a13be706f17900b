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
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{FitReport, FitSettings, gauss_newton};
use crate::data::Observations;
use crate::errors::FitResult;
use crate::models::Model;

/// Everything a caller provides for a single fit.
///
/// This is the structured record exchanged with callers across a process boundary,
/// the serialization format itself is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitRequest {
    /// Independent values.
    pub x: Vec<f64>,

    /// Observed values, one per x.
    pub y: Vec<f64>,

    /// Initial guesses for the model parameters.
    pub initial: Vec<f64>,

    /// Optional overrides of the tolerance and iteration cap.
    #[serde(default)]
    pub settings: FitSettings,
}

impl FitRequest {
    /// Construct a new request with default settings.
    #[must_use]
    pub fn new(x: Vec<f64>, y: Vec<f64>, initial: Vec<f64>) -> Self {
        Self {
            x,
            y,
            initial,
            settings: FitSettings::default(),
        }
    }

    /// Fit the model using the contents of this request.
    ///
    /// # Errors
    /// Any error from building the [`Observations`] or from [`gauss_newton`].
    pub fn fit(&self, model: &dyn Model) -> FitResult<FitReport> {
        let obs: Observations = (self.x.as_slice(), self.y.as_slice()).try_into()?;
        gauss_newton(&obs, model, &self.initial, &self.settings, None)
    }
}

/// Run many independent fits of the same model in parallel.
///
/// Results are returned in the same order as the requests. Each fit is independent,
/// one failing has no effect on the others.
pub fn fit_many(requests: &[FitRequest], model: &dyn Model) -> Vec<FitResult<FitReport>> {
    requests.par_iter().map(|req| req.fit(model)).collect()
}
