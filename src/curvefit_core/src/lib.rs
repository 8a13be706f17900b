//! # curvefit Core
//! This library contains the computational engine of curvefit, fitting regression
//! models to observations with nonlinear least squares.
//!
//! The engine owns only the computation. Transport of data in and out, whether from
//! files, a user interface or another process, is left to the caller.
//!
//! The main entry point is [`fitting::gauss_newton`], which accepts any model
//! implementing [`models::Model`].
//!
//! ```
//!     use curvefit_core::prelude::*;
//!     let x = vec![2.0, 5.0, 10.0, 15.0, 20.0, 25.0, 50.0, 100.0];
//!     let truth = [350.0, 300.0, 0.25, 0.45];
//!     let y: Vec<f64> = x.iter().map(|x| Weibull.evaluate(*x, &truth).unwrap()).collect();
//!     let obs = Observations::new(x, y).unwrap();
//!
//!     let settings = FitSettings::default().with_tolerance(1e-10);
//!     let report = gauss_newton(&obs, &Weibull, &[340.0, 290.0, 0.24, 0.46], &settings, None)
//!         .unwrap();
//!     assert!(report.converged);
//!     assert!((report.params[0] - 350.0).abs() < 1e-6);
//! ```
//!

pub mod data;
pub mod errors;
pub mod fitting;
pub mod models;

/// Common useful imports
pub mod prelude {
    pub use crate::data::Observations;
    pub use crate::errors::{Error, FitResult};
    pub use crate::fitting::{
        FitReport, FitRequest, FitSettings, IterationState, LogObserver, Observer,
        TraceObserver, fit_many, gauss_newton,
    };
    pub use crate::models::{ClosureModel, Model, SaturationGrowth, Weibull};
}
