//! Statistical utilities for the warlord project.
//!
//! This crate provides the small set of numeric tools the learning stack
//! needs:
//!
//! - [`regression`]: goodness-of-fit metrics (mean squared error, R²) for
//!   holdout evaluation
//! - [`weights`]: weight-vector normalization for feature importances
//!
//! # Examples
//!
//! ```
//! use warlord_stats::regression::{mean_squared_error, r2_score};
//!
//! let actual = [3.0, -0.5, 2.0, 7.0];
//! let predicted = [2.5, 0.0, 2.0, 8.0];
//! let mse = mean_squared_error(&actual, &predicted).unwrap();
//! assert!((mse - 0.375).abs() < 1e-6);
//! let r2 = r2_score(&actual, &predicted).unwrap();
//! assert!(r2 > 0.9);
//! ```

pub mod regression;
pub mod weights;
