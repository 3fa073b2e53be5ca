//! Bar-chart builders for the Wisteria charting engine.
//!
//! This crate turns the columns of a [`dataset::Dataset`] into bars:
//!
//! - **Histograms**: a continuous column sorted into unique-value or
//!   equal-width range bins, optionally split by a grouping column
//! - **Categorical bar charts**: counts or weighted totals per category,
//!   optionally split by a grouping column
//!
//! Builders write into a [`bar::BarChart`], which holds the bars together with
//! the bar axis and the scaling axis. Drawing the result is left to the caller.
//!
//! # Modules
//!
//! - [`dataset`]: the column-oriented input data
//! - [`rounding`]: rounding applied to observations before binning
//! - [`bar`]: bars, axes and bar-label formatting
//! - [`group`]: mapping of group codes to scheme indices and legends
//! - [`histogram`]: histogram binning
//! - [`categorical`]: categorical aggregation
//! - [`chart`]: the [`chart::Chart`] enum over every chart kind
//! - [`settings`]: limits shared by the builders
//! - [`error`]: the [`ChartError`] type

pub mod bar;
pub mod categorical;
pub mod chart;
pub mod dataset;
pub mod error;
pub mod group;
pub mod histogram;
pub mod rounding;
pub mod settings;

pub use self::error::ChartError;
