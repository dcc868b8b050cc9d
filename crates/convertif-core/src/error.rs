//! Boundary error types.
//!
//! These errors are raised when raw text (category and unit identifiers)
//! is turned into the closed enumerations of [`crate::units`]. The grading
//! engine never surfaces them: it folds every lookup failure into
//! [`GradingResult::Invalid`](crate::grading::GradingResult::Invalid).

use thiserror::Error;

/// Errors that can occur when interpreting category and unit identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The category is not one of the supported categories.
    #[error("unknown conversion category: {0}")]
    UnknownCategory(String),

    /// The unit is not defined within the given category.
    #[error("unknown {category} unit: {unit}")]
    UnknownUnit { category: String, unit: String },

    /// A unit was selected before any category was chosen.
    #[error("no conversion category selected")]
    NoCategorySelected,

    /// The unit is not among the choices currently offered for the category.
    #[error("unit '{unit}' is not offered for {category}")]
    UnitNotOffered { category: String, unit: String },
}

