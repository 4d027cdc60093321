//! Table rendering utilities for CLI outputs.

use super::formatting::{pad_right, strip_ansi, truncate_to_width, visible_width};

pub struct Column {
    pub header: String,
    /// Upper bound in terminal columns; cells wider than this are cut.
    pub max_width: usize,
}

impl Column {
    pub fn new(header: &str, max_width: usize) -> Self {
        Self {
            header: header.to_string(),
            max_width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn cell(&self, row: &[String], i: usize) -> String {
        let raw = row.get(i).map(String::as_str).unwrap_or("");
        let max = self.columns[i].max_width;
        if visible_width(raw) <= max {
            raw.to_string()
        } else {
            // colour is dropped on cut cells
            truncate_to_width(&strip_ansi(raw), max)
        }
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .map(|r| visible_width(&self.cell(r, i)))
                    .chain(std::iter::once(visible_width(&col.header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();

        // Header
        for (col, w) in self.columns.iter().zip(&widths) {
            out.push_str(&pad_right(&col.header, *w));
            out.push(' ');
        }
        out.push('\n');
        for w in &widths {
            out.push_str(&"-".repeat(*w));
            out.push(' ');
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, w) in widths.iter().enumerate() {
                out.push_str(&pad_right(&self.cell(row, i), *w));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}
