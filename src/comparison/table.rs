//! Terminal rendering of a price comparison.

use std::{fmt::Write as _, io};

use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use super::{PriceComparison, RankedPrice};
use crate::chart::DateFormat;

/// Errors raised while printing a comparison.
#[derive(Debug, Error)]
pub enum ComparisonTableError {
    /// Writing to the output failed.
    #[error("failed to write comparison table")]
    Io(#[from] io::Error),
}

impl PriceComparison {
    /// Prints the comparison as a table, cheapest first, with the ranked entries in green.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        format: &DateFormat,
    ) -> Result<(), ComparisonTableError> {
        if self.is_empty() {
            writeln!(out, "No hay precios registrados.")?;

            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["", "Tienda", "Precio", "Fecha"]);

        let mut highlighted_rows: SmallVec<[usize; super::HIGHLIGHTED]> = SmallVec::new();

        for (row, entry) in self.entries().iter().enumerate() {
            if entry.highlighted {
                highlighted_rows.push(row + 1);
            }

            builder.push_record(entry_cells(entry, format));
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..3), Alignment::right());

        for row in highlighted_rows {
            table.modify(Rows::one(row), Color::FG_GREEN);
        }

        writeln!(out, "{}", colorize_borders(&table.to_string()))?;

        Ok(())
    }
}

fn entry_cells(entry: &RankedPrice, format: &DateFormat) -> [String; 4] {
    let rank = entry
        .rank
        .map_or_else(String::new, |rank| format!("#{rank}"));

    let store = entry
        .observation
        .store
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);

    [
        rank,
        store,
        entry.observation.price.to_string(),
        format.label(entry.observation.created_at),
    ]
}

/// Greys out runs of box-drawing characters (U+2500..U+257F), leaving cell text alone.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char != in_run {
            _ = out.write_str(if box_char { "\x1b[90m" } else { "\x1b[0m" });
            in_run = box_char;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}
