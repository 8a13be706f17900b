//! # curvefit
//! Fit the Weibull regression model to the reference dataset and print the iteration
//! trace along with the outcome.
//!
//! References:
//! Chapra, S.C., Canale, R.P. (2015). Numerical Methods for Engineers Seventh Edition.
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
use std::process::ExitCode;

use curvefit_core::prelude::*;

const X: [f64; 8] = [2.0, 5.0, 10.0, 15.0, 20.0, 25.0, 50.0, 100.0];
const Y: [f64; 8] = [
    124.38122, 171.92605, 203.40486, 221.16494, 233.60009, 243.17842, 272.68472, 301.93715,
];
const INITIAL: [f64; 4] = [300.0, 300.0, 0.3, 0.4];

fn main() -> ExitCode {
    let obs = match Observations::new(X.to_vec(), Y.to_vec()) {
        Ok(obs) => obs,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let model = Weibull;
    let mut trace = TraceObserver::new(model.param_names());
    let settings = FitSettings::default();

    match gauss_newton(&obs, &model, &INITIAL, &settings, Some(&mut trace)) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(Error::NonConvergence(report)) => {
            println!("{report}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
