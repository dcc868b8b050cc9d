//! The `convertif units` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use convertif_core::selection::unit_options;
use convertif_core::units::ConversionCategory;

pub fn execute(category: Option<String>) -> Result<()> {
    let categories = match category {
        Some(c) => vec![c.parse::<ConversionCategory>()?],
        None => ConversionCategory::ALL.to_vec(),
    };

    for category in categories {
        println!("{} ({category})", category.label());

        let mut table = Table::new();
        table.set_header(vec!["Unit", "Key"]);
        for option in unit_options(category) {
            table.add_row(vec![Cell::new(option.label), Cell::new(option.value)]);
        }
        println!("{table}\n");
    }

    Ok(())
}
