//! # Data
//!
//! Handling of paired (x, y) observations which a model is fit against.
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
use crate::errors::{Error, FitResult};

/// Finite, paired set of observations.
///
/// The x and y values are checked on construction and never change afterwards.
///
/// Construction hints:
///
/// If data ownership can be given up, then a `Vec<f64>` will not incur any copy/clone.
/// However a slice may be used, but then the data must be cloned/copied.
#[derive(Clone, Debug, PartialEq)]
pub struct Observations {
    x: Box<[f64]>,
    y: Box<[f64]>,
}

impl Observations {
    /// Construct a new set of observations.
    ///
    /// # Errors
    /// [`Error::DimensionMismatch`] if x and y have different lengths, or
    /// [`Error::Domain`] if any value is NaN or infinite.
    pub fn new(x: impl Into<Box<[f64]>>, y: impl Into<Box<[f64]>>) -> FitResult<Self> {
        let x = x.into();
        let y = y.into();
        if x.len() != y.len() {
            Err(Error::DimensionMismatch(format!(
                "x has {} values but y has {}.",
                x.len(),
                y.len()
            )))?;
        }
        if let Some(idx) = x
            .iter()
            .zip(y.iter())
            .position(|(a, b)| !a.is_finite() || !b.is_finite())
        {
            Err(Error::Domain(format!(
                "Observation {idx} is not finite: ({}, {}).",
                x[idx], y[idx]
            )))?;
        }
        Ok(Self { x, y })
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True if there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Independent values.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Observed values.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Iterate over the (x, y) pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

impl TryFrom<(Vec<f64>, Vec<f64>)> for Observations {
    type Error = Error;
    fn try_from(value: (Vec<f64>, Vec<f64>)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1)
    }
}

impl TryFrom<(&[f64], &[f64])> for Observations {
    type Error = Error;
    fn try_from(value: (&[f64], &[f64])) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1)
    }
}

#[cfg(test)]
mod tests {
    use super::Observations;
    use crate::errors::Error;

    #[test]
    fn test_observations() {
        let obs = Observations::new(vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]).unwrap();
        assert_eq!(obs.len(), 3);
        assert!(!obs.is_empty());
        assert_eq!(obs.x(), &[1.0, 2.0, 3.0]);
        assert_eq!(obs.y()[2], 6.0);
        let pairs: Vec<_> = obs.iter().collect();
        assert_eq!(pairs, vec![(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]);
    }

    #[test]
    fn test_mismatch() {
        let x = [2.0, 5.0, 10.0, 15.0, 20.0, 25.0, 50.0, 100.0];
        let y = [124.0, 171.0, 203.0, 221.0, 233.0, 243.0, 272.0];
        let obs: Result<Observations, _> = (x.as_slice(), y.as_slice()).try_into();
        assert!(matches!(obs, Err(Error::DimensionMismatch(_))));
    }

    #[test]
    fn test_non_finite() {
        let obs = Observations::new(vec![1.0, f64::NAN], vec![1.0, 2.0]);
        assert!(matches!(obs, Err(Error::Domain(_))));

        let obs = Observations::new(vec![1.0, 2.0], vec![f64::INFINITY, 2.0]);
        assert!(matches!(obs, Err(Error::Domain(_))));
    }
}
