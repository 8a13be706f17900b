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
use nalgebra::{DMatrix, DVector};

use super::{FitReport, FitSettings, IterationState, Observer};
use crate::data::Observations;
use crate::errors::{Error, FitResult};
use crate::models::{Model, check_params};

/// Build the Jacobian of the model for every observation.
///
/// Row i contains the partial derivatives of the model with respect to each parameter,
/// evaluated at the i-th x value.
///
/// # Errors
/// Fails if the model gradient cannot be evaluated at any x, or if the parameters do
/// not match the model.
pub fn jacobian(
    observations: &Observations,
    model: &dyn Model,
    params: &[f64],
) -> FitResult<DMatrix<f64>> {
    check_params(model, params)?;
    let mut jac = DMatrix::<f64>::zeros(observations.len(), params.len());
    let mut row = vec![0.0; params.len()];
    for (idx, x) in observations.x().iter().enumerate() {
        model.gradient(*x, params, &mut row)?;
        jac.row_mut(idx).copy_from_slice(&row);
    }
    Ok(jac)
}

/// Observed minus predicted value for every observation.
///
/// # Errors
/// Fails if the model cannot be evaluated at any x, or if the parameters do not match
/// the model.
pub fn residuals(
    observations: &Observations,
    model: &dyn Model,
    params: &[f64],
) -> FitResult<DVector<f64>> {
    check_params(model, params)?;
    let vals = observations
        .iter()
        .map(|(x, y)| model.evaluate(x, params).map(|val| y - val))
        .collect::<FitResult<Vec<f64>>>()?;
    Ok(DVector::from_vec(vals))
}

/// Relative change of each parameter, `(new - old) / new`.
///
/// A parameter which is now exactly zero has a change of zero if it did not move, and
/// infinity otherwise so that it can never satisfy a tolerance.
#[must_use]
pub fn relative_change(old: &[f64], new: &[f64]) -> Vec<f64> {
    old.iter()
        .zip(new)
        .map(|(old, new)| {
            let diff = new - old;
            if *new != 0.0 {
                diff / new
            } else if diff == 0.0 {
                0.0
            } else {
                f64::INFINITY
            }
        })
        .collect()
}

/// Solve the normal equations `M delta = rhs`.
///
/// Returns None if M is numerically singular, that is the ratio of its smallest to
/// largest eigenvalue is at or below `min_rcond`, or the solution is not finite.
fn solve_normal_equations(
    normal: DMatrix<f64>,
    rhs: &DVector<f64>,
    min_rcond: f64,
) -> Option<DVector<f64>> {
    if !normal.iter().all(|v| v.is_finite()) {
        return None;
    }
    let eigenvalues = normal.symmetric_eigenvalues();
    let largest = eigenvalues.max();
    if largest <= 0.0 || eigenvalues.min() <= largest * min_rcond {
        return None;
    }
    let delta = normal.cholesky()?.solve(rhs);
    delta.iter().all(|v| v.is_finite()).then_some(delta)
}

/// Fit a model to observations using the Gauss-Newton method.
///
/// Starting from the initial parameters, each iteration linearizes the model with its
/// Jacobian Z and solves the normal equations `(Z^T Z) delta = Z^T r` for the update,
/// where r are the residuals. Iteration stops once the relative change of every
/// parameter is below the tolerance in `settings`.
///
/// The optional observer is handed the state after every iteration, and told when the
/// fit finishes.
///
/// ```
///     use curvefit_core::prelude::*;
///     let obs = Observations::new(
///         vec![0.25, 0.75, 1.25, 1.75, 2.25],
///         vec![0.28, 0.57, 0.68, 0.74, 0.79],
///     ).unwrap();
///     let settings = FitSettings::default().with_tolerance(1e-6);
///     let report = gauss_newton(&obs, &SaturationGrowth, &[1.0, 1.0], &settings, None).unwrap();
///     assert!((report.params[0] - 0.79187).abs() < 1e-4);
///     assert!((report.params[1] - 1.67514).abs() < 1e-4);
/// ```
///
/// # Errors
/// - [`Error::InvalidSettings`] if the settings are not usable.
/// - [`Error::DimensionMismatch`] if the initial parameters do not match the model,
///   or there are fewer observations than parameters.
/// - [`Error::Domain`] if the model cannot be evaluated during the fit.
/// - [`Error::SingularMatrix`] if the normal equations cannot be solved.
/// - [`Error::NonConvergence`] if the iteration cap is reached, this contains the
///   parameters from the final iteration.
pub fn gauss_newton(
    observations: &Observations,
    model: &dyn Model,
    initial: &[f64],
    settings: &FitSettings,
    mut observer: Option<&mut dyn Observer>,
) -> FitResult<FitReport> {
    settings.validate()?;
    check_params(model, initial)?;
    let n_params = model.n_params();
    if n_params == 0 {
        Err(Error::DimensionMismatch("Model has no parameters.".into()))?;
    }
    if observations.len() < n_params {
        Err(Error::DimensionMismatch(format!(
            "{} observations are not enough to fit {} parameters.",
            observations.len(),
            n_params
        )))?;
    }

    let mut params = initial.to_vec();
    let outcome = iterate(observations, model, &mut params, settings, &mut observer);
    if let Some(obs) = observer.as_deref_mut() {
        obs.on_finish();
    }
    let iterations = outcome?;

    if let Some(iterations) = iterations {
        log::debug!("Gauss-Newton converged after {iterations} iterations: {params:?}");
        let resid = residuals(observations, model, &params)?;
        return Ok(FitReport::new(
            params,
            true,
            iterations,
            observations.y(),
            resid.as_slice().to_vec(),
        ));
    }

    log::debug!(
        "Gauss-Newton failed to converge in {} iterations: {params:?}",
        settings.max_iterations
    );
    // The final parameters may sit outside the model domain, report NaN residuals then.
    let resid = residuals(observations, model, &params).map_or_else(
        |_| vec![f64::NAN; observations.len()],
        |r| r.as_slice().to_vec(),
    );
    Err(Error::NonConvergence(Box::new(FitReport::new(
        params,
        false,
        settings.max_iterations,
        observations.y(),
        resid,
    ))))
}

/// Run the iteration loop, updating the parameters in place.
///
/// Returns the iteration on which the fit converged, or None if the cap was reached.
fn iterate(
    observations: &Observations,
    model: &dyn Model,
    params: &mut [f64],
    settings: &FitSettings,
    observer: &mut Option<&mut dyn Observer>,
) -> FitResult<Option<usize>> {
    for iteration in 1..=settings.max_iterations {
        let jac = jacobian(observations, model, params)?;
        let resid = residuals(observations, model, params)?;
        let jac_t = jac.transpose();

        let normal = &jac_t * &jac;
        let rhs = &jac_t * &resid;
        let Some(delta) = solve_normal_equations(normal, &rhs, settings.min_rcond) else {
            return Err(Error::SingularMatrix {
                iteration,
                params: params.to_vec(),
            });
        };

        let old = params.to_vec();
        params
            .iter_mut()
            .zip(delta.iter())
            .for_each(|(p, d)| *p += d);
        let change = relative_change(&old, params);

        if let Some(obs) = observer.as_deref_mut() {
            obs.on_iteration(&IterationState {
                iteration,
                params: params.to_vec(),
                delta: delta.as_slice().to_vec(),
                relative_change: change.clone(),
                sum_squares: resid.norm_squared(),
            });
        }

        if change.iter().all(|e| e.abs() < settings.tolerance) {
            return Ok(Some(iteration));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::{gauss_newton, jacobian, relative_change, residuals};
    use crate::data::Observations;
    use crate::errors::Error;
    use crate::fitting::{FitSettings, IterationState, Observer};
    use crate::models::{Model, SaturationGrowth, Weibull};

    const X: [f64; 8] = [2.0, 5.0, 10.0, 15.0, 20.0, 25.0, 50.0, 100.0];
    const Y: [f64; 8] = [
        124.38122, 171.92605, 203.40486, 221.16494, 233.60009, 243.17842, 272.68472, 301.93715,
    ];
    const TRUE_PARAMS: [f64; 4] = [350.0, 300.0, 0.25, 0.45];

    #[derive(Default)]
    struct Recorder(Vec<IterationState>, usize);

    impl Observer for Recorder {
        fn on_iteration(&mut self, state: &IterationState) {
            self.0.push(state.clone());
        }
        fn on_finish(&mut self) {
            self.1 += 1;
        }
    }

    /// Observations generated exactly from the Weibull model.
    fn exact_weibull() -> Observations {
        let y: Vec<f64> = X
            .iter()
            .map(|x| Weibull.evaluate(*x, &TRUE_PARAMS).unwrap())
            .collect();
        Observations::new(X.to_vec(), y).unwrap()
    }

    #[test]
    fn test_relative_change() {
        let change = relative_change(&[1.0, 2.0, 0.0, 1.0], &[2.0, 2.0, 0.0, 0.0]);
        assert_eq!(change[0], 0.5);
        assert_eq!(change[1], 0.0);
        assert_eq!(change[2], 0.0);
        assert!(change[3].is_infinite());
    }

    #[test]
    fn test_jacobian_and_residuals() {
        let obs = exact_weibull();
        let jac = jacobian(&obs, &Weibull, &TRUE_PARAMS).unwrap();
        assert_eq!(jac.shape(), (8, 4));

        let mut row = [0.0; 4];
        Weibull.gradient(X[3], &TRUE_PARAMS, &mut row).unwrap();
        for (col, val) in row.iter().enumerate() {
            assert_eq!(jac[(3, col)], *val);
        }
        assert!(jac.column(0).iter().all(|v| *v == 1.0));

        // residuals use the full model, not a single Jacobian column
        let resid = residuals(&obs, &Weibull, &TRUE_PARAMS).unwrap();
        assert!(resid.iter().all(|r| r.abs() < 1e-10));

        let shifted = [351.0, 300.0, 0.25, 0.45];
        let resid = residuals(&obs, &Weibull, &shifted).unwrap();
        assert!(resid.iter().all(|r| (r + 1.0).abs() < 1e-10));
    }

    #[test]
    fn test_recover_exact_params() {
        let obs = exact_weibull();
        let settings = FitSettings::default().with_tolerance(1e-10);
        for guess in [
            [340.0, 290.0, 0.24, 0.46],
            [330.0, 280.0, 0.2, 0.5],
            [300.0, 300.0, 0.3, 0.4],
        ] {
            let report = gauss_newton(&obs, &Weibull, &guess, &settings, None).unwrap();
            assert!(report.converged);
            assert!(report.iterations < 20);
            for (fit, exact) in report.params.iter().zip(TRUE_PARAMS) {
                assert!((fit - exact).abs() < 1e-6 * exact.abs());
            }
            assert!(report.sum_squares < 1e-12);
            assert!((report.r_squared - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sum_squares_non_increasing() {
        let obs = exact_weibull();
        let settings = FitSettings::default().with_tolerance(1e-10);
        let mut recorder = Recorder::default();
        let report = gauss_newton(
            &obs,
            &Weibull,
            &[340.0, 290.0, 0.24, 0.46],
            &settings,
            Some(&mut recorder),
        )
        .unwrap();
        assert_eq!(recorder.1, 1);
        assert_eq!(recorder.0.len(), report.iterations);

        let mut costs: Vec<f64> = recorder.0.iter().map(|s| s.sum_squares).collect();
        costs.push(report.sum_squares);
        for pair in costs.windows(2) {
            assert!(pair[1] <= pair[0] * (1.0 + 1e-9) + 1e-12, "{costs:?}");
        }
    }

    #[test]
    fn test_saturation_growth() {
        let obs = Observations::new(
            vec![0.25, 0.75, 1.25, 1.75, 2.25],
            vec![0.28, 0.57, 0.68, 0.74, 0.79],
        )
        .unwrap();
        let settings = FitSettings::default().with_tolerance(1e-8);
        let mut recorder = Recorder::default();
        let report = gauss_newton(
            &obs,
            &SaturationGrowth,
            &[1.0, 1.0],
            &settings,
            Some(&mut recorder),
        )
        .unwrap();

        assert!((report.params[0] - 0.791_867_69).abs() < 1e-6);
        assert!((report.params[1] - 1.675_139_23).abs() < 1e-6);
        assert!((report.sum_squares - 6.616_59e-4).abs() < 1e-8);

        let mut costs: Vec<f64> = recorder.0.iter().map(|s| s.sum_squares).collect();
        costs.push(report.sum_squares);
        for pair in costs.windows(2) {
            assert!(pair[1] <= pair[0] * (1.0 + 1e-9), "{costs:?}");
        }
    }

    #[test]
    fn test_singular() {
        // identical x values make every Jacobian row the same
        let y: Vec<f64> = (0..8).map(|i| 200.0 + f64::from(i)).collect();
        let obs = Observations::new(vec![10.0; 8], y).unwrap();
        let res = gauss_newton(
            &obs,
            &Weibull,
            &[300.0, 300.0, 0.3, 0.4],
            &FitSettings::default(),
            None,
        );
        match res {
            Err(Error::SingularMatrix { iteration, params }) => {
                assert_eq!(iteration, 1);
                assert_eq!(params, vec![300.0, 300.0, 0.3, 0.4]);
            }
            other => panic!("Expected a singular matrix, got {other:?}"),
        }
    }

    #[test]
    fn test_non_convergence() {
        let obs = exact_weibull();
        let settings = FitSettings::default()
            .with_tolerance(1e-10)
            .with_max_iterations(1);
        let mut recorder = Recorder::default();
        let res = gauss_newton(
            &obs,
            &Weibull,
            &[300.0, 300.0, 0.3, 0.4],
            &settings,
            Some(&mut recorder),
        );
        let report = match res {
            Err(Error::NonConvergence(report)) => report,
            other => panic!("Expected non-convergence, got {other:?}"),
        };
        assert!(!report.converged);
        assert_eq!(report.iterations, 1);
        assert_eq!(report.residuals.len(), 8);
        assert_eq!(report.params, recorder.0[0].params);
        assert!(report.params.iter().all(|p| p.is_finite()));
        assert_eq!(recorder.1, 1);
    }

    #[test]
    fn test_dimension_checks() {
        let obs = exact_weibull();
        let res = gauss_newton(
            &obs,
            &Weibull,
            &[300.0, 300.0, 0.3],
            &FitSettings::default(),
            None,
        );
        assert!(matches!(res, Err(Error::DimensionMismatch(_))));

        let few = Observations::new(vec![2.0, 5.0, 10.0], vec![124.0, 171.0, 203.0]).unwrap();
        let mut recorder = Recorder::default();
        let res = gauss_newton(
            &few,
            &Weibull,
            &[300.0, 300.0, 0.3, 0.4],
            &FitSettings::default(),
            Some(&mut recorder),
        );
        assert!(matches!(res, Err(Error::DimensionMismatch(_))));
        // rejected before any iteration
        assert!(recorder.0.is_empty());
        assert_eq!(recorder.1, 0);
    }

    #[test]
    fn test_domain_error() {
        let obs = Observations::new(
            vec![-1.0, 2.0, 5.0, 10.0, 15.0],
            vec![100.0, 124.0, 171.0, 203.0, 221.0],
        )
        .unwrap();
        let res = gauss_newton(
            &obs,
            &Weibull,
            &[300.0, 300.0, 0.3, 0.4],
            &FitSettings::default(),
            None,
        );
        assert!(matches!(res, Err(Error::Domain(_))));
    }

    #[test]
    fn test_reference_dataset_singular() {
        // From this guess the first step overshoots and d collapses toward zero, which
        // leaves the a and b columns of the Jacobian nearly parallel.
        let obs = Observations::new(X.to_vec(), Y.to_vec()).unwrap();
        let mut recorder = Recorder::default();
        let res = gauss_newton(
            &obs,
            &Weibull,
            &[300.0, 300.0, 0.3, 0.4],
            &FitSettings::default(),
            Some(&mut recorder),
        );
        let (iteration, params) = match res {
            Err(Error::SingularMatrix { iteration, params }) => (iteration, params),
            other => panic!("Expected a singular matrix, got {other:?}"),
        };
        assert_eq!(iteration, 2);
        let expected = [425.98670291, 576.06850705, 0.70512649, 0.01286470];
        for (p, e) in params.iter().zip(expected) {
            assert!((p - e).abs() < 1e-6 * e.abs(), "{params:?}");
        }
        assert_eq!(recorder.0.len(), 1);
        assert_eq!(recorder.0[0].params, params);
        assert_eq!(recorder.1, 1);
    }
}
