//! Filter-and-reshape analytics pipeline for spectrum auction dashboards.
//!
//! Loads two pre-computed tables — per-record auction performance and a
//! band/year aggregate summary — and turns them into the exact shapes a
//! dashboard renderer needs:
//!
//! * [`data::filter::select`] — one KPI row for a (band, year, service area)
//!   selector
//! * [`data::reshape::reshape`] — a service-area × band_year heatmap matrix
//! * [`data::project::project`] — an ordered bar-chart series
//!
//! All transforms are pure functions over immutable tables; [`store::TableStore`]
//! shares one consistent snapshot across concurrent readers and swaps it
//! atomically on reload. Rendering is not this crate's job.

pub mod data;
pub mod error;
pub mod store;
