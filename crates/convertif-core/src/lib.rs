//! convertif-core: unit conversion table and grading engine.
//!
//! Grades a student's unit-conversion answer against the converted value of
//! an instructor's measurement. The crate holds the conversion table, the
//! grading rules, unit-selection state for input forms, and batch grading of
//! answer sheets into reports.

pub mod config;
pub mod engine;
pub mod error;
pub mod grading;
pub mod model;
pub mod parser;
pub mod report;
pub mod selection;
pub mod statistics;
pub mod table;
pub mod units;

pub use error::ConversionError;
pub use grading::{grade, GradingRequest, GradingResult};
pub use table::ConversionTable;
pub use units::{ConversionCategory, TemperatureUnit, Unit, VolumeUnit};
