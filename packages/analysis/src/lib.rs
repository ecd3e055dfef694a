#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Landfall analysis over storm tracks.
//!
//! Given a [`StormDataset`](landfall_track_models::StormDataset) and a
//! [`RegionBoundary`](landfall_boundary::RegionBoundary), the driver in
//! [`driver`] decides for every storm whether its path reached the region,
//! when it did so, and how strong the storm got:
//!
//! 1. [`filters`] keep storms of the target classification inside the
//!    configured year range.
//! 2. [`detect`] applies the point method (fix containment) or the line
//!    method (segment intersection).
//! 3. [`interpolate`] estimates the crossing time when the line method
//!    finds a crossing between two fixes.
//! 4. [`intensity`] scans the peak wind speed.
//!
//! Everything here is synchronous and free of I/O. Storms are independent,
//! so [`driver::run_parallel`] can spread them over a `rayon` pool.

pub mod detect;
pub mod driver;
pub mod filters;
pub mod intensity;
pub mod interpolate;
pub mod progress;

pub use detect::{DetectError, Detection, LandfallDetector, LineMethod, PointMethod};
pub use driver::{analyze_track, run, run_parallel, trace};
