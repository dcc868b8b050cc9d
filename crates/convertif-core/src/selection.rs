//! Unit choice state for an input form.
//!
//! Changing the category replaces the offered unit list wholesale and drops
//! any selected unit that the new list does not offer.

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;
use crate::grading::GradingRequest;
use crate::units::{ConversionCategory, Unit};

/// A single dropdown choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitOption {
    /// Text shown to the instructor (e.g. "Cubic Inch").
    pub label: String,
    /// Identifier passed to the grading engine (e.g. "cubic-inch").
    pub value: String,
}

impl From<Unit> for UnitOption {
    fn from(unit: Unit) -> Self {
        Self {
            label: unit.label().to_string(),
            value: unit.key().to_string(),
        }
    }
}

/// Choices offered for a category, in display order.
pub fn unit_options(category: ConversionCategory) -> Vec<UnitOption> {
    category.units().into_iter().map(UnitOption::from).collect()
}

/// Current category, offered units and selected source/target units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSelection {
    category: Option<ConversionCategory>,
    choices: Vec<UnitOption>,
    source: Option<Unit>,
    target: Option<Unit>,
}

impl UnitSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> Option<ConversionCategory> {
        self.category
    }

    pub fn choices(&self) -> &[UnitOption] {
        &self.choices
    }

    pub fn source(&self) -> Option<Unit> {
        self.source
    }

    pub fn target(&self) -> Option<Unit> {
        self.target
    }

    /// Switch category, replacing the choice list and clearing stale units.
    pub fn set_category(&mut self, category: ConversionCategory) {
        self.category = Some(category);
        self.choices = unit_options(category);
        self.source = self.source.filter(|u| u.category() == category);
        self.target = self.target.filter(|u| u.category() == category);
    }

    /// Parse and set the category from raw text.
    pub fn select_category(&mut self, text: &str) -> Result<ConversionCategory, ConversionError> {
        let category = text.parse()?;
        self.set_category(category);
        Ok(category)
    }

    pub fn select_source(&mut self, text: &str) -> Result<Unit, ConversionError> {
        let unit = self.offered(text)?;
        self.source = Some(unit);
        Ok(unit)
    }

    pub fn select_target(&mut self, text: &str) -> Result<Unit, ConversionError> {
        let unit = self.offered(text)?;
        self.target = Some(unit);
        Ok(unit)
    }

    fn offered(&self, text: &str) -> Result<Unit, ConversionError> {
        let category = self.category.ok_or(ConversionError::NoCategorySelected)?;
        let unit = Unit::parse(category, text).map_err(|_| ConversionError::UnitNotOffered {
            category: category.to_string(),
            unit: text.trim().to_lowercase(),
        })?;
        if self.choices.iter().any(|c| c.value == unit.key()) {
            Ok(unit)
        } else {
            Err(ConversionError::UnitNotOffered {
                category: category.to_string(),
                unit: unit.key().to_string(),
            })
        }
    }

    /// Build a grading request once category, source and target are chosen.
    pub fn to_request(
        &self,
        measured_value: f64,
        student_response: impl Into<String>,
    ) -> Option<GradingRequest> {
        let category = self.category?;
        let source = self.source?;
        let target = self.target?;
        Some(GradingRequest::new(
            category.key(),
            source.key(),
            target.key(),
            measured_value,
            student_response,
        ))
    }
}
