//! The conversion table.
//!
//! A three-level mapping `category -> source unit -> target unit -> formula`.
//! Only the pairs listed here are convertible: the table is neither
//! symmetric by construction nor closed under composition, and it holds no
//! identity entries.
//!
//! The volume factors are the rounded empirical constants the grading
//! tolerance was calibrated against. They are not mutual reciprocals
//! (liter -> gallon -> liter is only approximately the identity) and must be
//! kept as written.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::units::{ConversionCategory, TemperatureUnit, Unit, VolumeUnit};

/// A pure single-argument conversion formula.
pub type ConvertFn = fn(f64) -> f64;

type TargetMap = BTreeMap<Unit, ConvertFn>;
type SourceMap = BTreeMap<Unit, TargetMap>;

static GLOBAL: Lazy<ConversionTable> = Lazy::new(ConversionTable::build);

/// Immutable conversion table.
#[derive(Debug, Clone)]
pub struct ConversionTable {
    categories: BTreeMap<ConversionCategory, SourceMap>,
}

impl ConversionTable {
    /// The process-wide table, built on first use and never mutated.
    pub fn global() -> &'static ConversionTable {
        &GLOBAL
    }

    /// Build a fresh table holding every supported conversion.
    pub fn build() -> Self {
        let mut table = Self {
            categories: BTreeMap::new(),
        };
        table.add_temperature();
        table.add_volume();
        table
    }

    /// Look up a formula by raw identifiers.
    ///
    /// Identifiers are matched case-insensitively. Returns `None` for an
    /// unknown category, an unknown unit, or a pair the table does not list.
    pub fn lookup(&self, category: &str, source: &str, target: &str) -> Option<ConvertFn> {
        let category: ConversionCategory = category.parse().ok()?;
        let source = Unit::parse(category, source).ok()?;
        let target = Unit::parse(category, target).ok()?;
        self.get(source, target)
    }

    /// Look up a formula by typed units. Cross-category pairs are absent.
    pub fn get(&self, source: Unit, target: Unit) -> Option<ConvertFn> {
        self.categories
            .get(&source.category())?
            .get(&source)?
            .get(&target)
            .copied()
    }

    /// Whether the pair is convertible.
    pub fn contains(&self, source: Unit, target: Unit) -> bool {
        self.get(source, target).is_some()
    }

    /// Every convertible `(category, source, target)` triple, in table order.
    pub fn pairs(&self) -> impl Iterator<Item = (ConversionCategory, Unit, Unit)> + '_ {
        self.categories.iter().flat_map(|(&category, sources)| {
            sources.iter().flat_map(move |(&source, targets)| {
                targets.keys().map(move |&target| (category, source, target))
            })
        })
    }

    /// Number of convertible pairs.
    pub fn len(&self) -> usize {
        self.pairs().count()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    fn insert(&mut self, source: Unit, target: Unit, convert: ConvertFn) {
        debug_assert_ne!(source, target, "identity conversions are not stored");
        debug_assert_eq!(source.category(), target.category());
        self.categories
            .entry(source.category())
            .or_default()
            .entry(source)
            .or_default()
            .insert(target, convert);
    }

    fn add_temperature(&mut self) {
        use TemperatureUnit::{Celsius, Fahrenheit, Kelvin, Rankine};

        let mut rule = |from: TemperatureUnit, to: TemperatureUnit, convert: ConvertFn| {
            self.insert(Unit::Temperature(from), Unit::Temperature(to), convert)
        };

        rule(Celsius, Kelvin, |v| v + 273.15);
        rule(Celsius, Fahrenheit, |v| (v * 9.0) / 5.0 + 32.0);
        rule(Celsius, Rankine, |v| (v + 273.15) * (9.0 / 5.0));

        rule(Kelvin, Celsius, |v| v - 273.15);
        rule(Kelvin, Fahrenheit, |v| (v * 9.0) / 5.0 - 459.67);
        rule(Kelvin, Rankine, |v| v * 1.8);

        rule(Fahrenheit, Celsius, |v| ((v - 32.0) * 5.0) / 9.0);
        rule(Fahrenheit, Kelvin, |v| ((v + 459.67) * 5.0) / 9.0);
        rule(Fahrenheit, Rankine, |v| v + 459.67);

        rule(Rankine, Celsius, |v| ((v - 491.67) * 5.0) / 9.0);
        rule(Rankine, Kelvin, |v| v * (5.0 / 9.0));
        rule(Rankine, Fahrenheit, |v| v - 459.67);
    }

    fn add_volume(&mut self) {
        use VolumeUnit::{CubicFoot, CubicInch, Cup, Gallon, Liter, Tablespoon};

        let mut rule = |from: VolumeUnit, to: VolumeUnit, convert: ConvertFn| {
            self.insert(Unit::Volume(from), Unit::Volume(to), convert)
        };

        rule(Liter, Tablespoon, |v| v * 67.628);
        rule(Liter, CubicInch, |v| v * 61.024);
        rule(Liter, Cup, |v| v * 4.2268);
        rule(Liter, CubicFoot, |v| v * 0.035315);
        rule(Liter, Gallon, |v| v * 0.26417);

        rule(Tablespoon, Liter, |v| v * 0.014787);
        rule(Tablespoon, CubicInch, |v| v * 1.1082);
        rule(Tablespoon, Cup, |v| v * 0.0625);
        rule(Tablespoon, CubicFoot, |v| v * 0.00052219);
        rule(Tablespoon, Gallon, |v| v * 0.0039063);

        rule(CubicInch, Liter, |v| v * 0.016387);
        rule(CubicInch, Tablespoon, |v| v * 0.901);
        rule(CubicInch, Cup, |v| v * 0.069264);
        rule(CubicInch, CubicFoot, |v| v * 0.0005787);
        rule(CubicInch, Gallon, |v| v * 0.004329);

        rule(Cup, Liter, |v| v * 0.23659);
        rule(Cup, Tablespoon, |v| v * 16.0);
        rule(Cup, CubicInch, |v| v * 14.4375);
        rule(Cup, CubicFoot, |v| v * 0.008355);
        rule(Cup, Gallon, |v| v * 0.0625);

        rule(CubicFoot, Liter, |v| v * 28.317);
        rule(CubicFoot, Tablespoon, |v| v * 1915.0);
        rule(CubicFoot, CubicInch, |v| v * 1728.0);
        rule(CubicFoot, Cup, |v| v * 119.69);
        rule(CubicFoot, Gallon, |v| v * 7.4805);

        rule(Gallon, Liter, |v| v * 3.7854);
        rule(Gallon, Tablespoon, |v| v * 256.0);
        rule(Gallon, CubicInch, |v| v * 231.0);
        rule(Gallon, Cup, |v| v * 16.0);
        rule(Gallon, CubicFoot, |v| v * 0.13368);
    }
}

impl Default for ConversionTable {
    fn default() -> Self {
        Self::build()
    }
}
