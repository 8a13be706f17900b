//! # Errors
//!
//! Every failure a fit can surface to its caller.
//!
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
use crate::fitting::FitReport;

/// Result type for curve fitting operations.
pub type FitResult<T> = Result<T, Error>;

/// Possible errors which may be raised while fitting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Input arrays are inconsistent, either with each other or with the model.
    ///
    /// Always raised before any iteration takes place.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A model was evaluated outside of its valid domain, or produced a non-finite
    /// value.
    #[error("Domain error: {0}")]
    Domain(String),

    /// The normal equations matrix was not invertible.
    ///
    /// A different set of initial guesses may avoid this.
    #[error("Normal equations matrix is singular on iteration {iteration}, params: {params:?}")]
    SingularMatrix {
        /// Iteration on which the matrix was formed, starting at 1.
        iteration: usize,

        /// Parameters which produced the singular matrix.
        params: Vec<f64>,
    },

    /// Maximum number of iterations reached without convergence.
    ///
    /// The report contains the best parameters found along with their residuals.
    #[error("Failed to converge within the iteration limit.\n{0}")]
    NonConvergence(Box<FitReport>),

    /// Fit settings were not usable.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}
