//! Cells and records
//!
//! A `Cell` keeps numbers numeric so typed backends never turn them into
//! text. A `Record` is one row keyed by column name, in header order.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::models::coerce::{parse_flag, parse_number_or_default};

/// A single stored value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// A text cell
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// An empty cell
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Read the cell as a number, or `default` when it is not numeric
    pub fn as_number(&self, default: f64) -> f64 {
        match self {
            Self::Number(n) if n.is_finite() => *n,
            Self::Number(_) => default,
            Self::Text(s) => parse_number_or_default(s, default),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// One row of a table, keyed by column name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: Vec<(String, Cell)>,
}

impl Record {
    /// Pair a header row with a stored row
    ///
    /// Missing trailing cells are left out; surplus cells are dropped.
    pub fn from_row(headers: &[String], cells: &[Cell]) -> Self {
        Self {
            values: headers
                .iter()
                .cloned()
                .zip(cells.iter().cloned())
                .collect(),
        }
    }

    /// Get a cell by column name
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.values
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, cell)| cell)
    }

    /// Column value as text; missing columns read as empty
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(Cell::to_string).unwrap_or_default()
    }

    /// Column value as a number; missing or malformed values read as 0.0
    pub fn number(&self, column: &str) -> f64 {
        self.get(column).map(|c| c.as_number(0.0)).unwrap_or(0.0)
    }

    /// Column value as a boolean flag
    pub fn flag(&self, column: &str) -> bool {
        parse_flag(&self.text(column))
    }

    /// Replace a column's cell, appending the column when the row is short
    pub fn set(&mut self, column: &str, cell: Cell) {
        match self.values.iter_mut().find(|(name, _)| name == column) {
            Some((_, existing)) => *existing = cell,
            None => self.values.push((column.to_string(), cell)),
        }
    }

    /// Cells in `headers` order, as stored
    ///
    /// Columns missing before the last populated one are written empty; the
    /// row is not padded past it.
    pub fn to_row(&self, headers: &[&str]) -> Vec<Cell> {
        let width = headers
            .iter()
            .rposition(|h| self.get(h).is_some())
            .map_or(0, |last| last + 1);

        headers[..width]
            .iter()
            .map(|h| self.get(h).cloned().unwrap_or_else(Cell::empty))
            .collect()
    }

    /// Column names in header order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(name, _)| name.as_str())
    }

    /// Cells in header order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.values.iter().map(|(_, cell)| cell)
    }

    /// Number of populated columns
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no columns
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, cell) in &self.values {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}
