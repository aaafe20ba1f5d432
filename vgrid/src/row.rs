//! Row and cell types.
//!
//! A [`Row`] is an ordered mapping from column key to [`CellValue`]. The
//! grid never mutates rows; for virtualization a row is identified by its
//! index, while [`Row::key`] gives a stable key for hosts that reconcile
//! rendered rows (the `id` cell when present).

use std::fmt;
use std::sync::Arc;

use unicode_width::UnicodeWidthChar;

use crate::columns::ColumnDescriptor;

/// Key of the cell used as a row's reconciliation key.
pub const ID_KEY: &str = "id";

/// A cell value that renders itself, e.g. a progress bar or badge.
pub trait CellRenderer: fmt::Debug + Send + Sync {
    /// Render into at most `width` terminal columns.
    fn render(&self, width: usize) -> String;
}

/// The value stored in one cell.
#[derive(Debug, Clone, Default)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Custom(Arc<dyn CellRenderer>),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Render the value fitted to exactly `width` columns.
    pub fn render(&self, width: usize) -> String {
        let text = match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => (if *b { "yes" } else { "no" }).to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => format!("{f:.2}"),
            CellValue::Text(s) => s.clone(),
            CellValue::Custom(renderer) => renderer.render(width),
        };
        fit_to_width(&text, width)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// Key used by hosts to reconcile rendered rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Id(String),
    Index(usize),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Id(id) => write!(f, "{id}"),
            RowKey::Index(index) => write!(f, "#{index}"),
        }
    }
}

/// An ordered mapping from column key to cell value.
#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Row::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a cell. An existing key keeps its position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        let key = key.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.cells.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reconciliation key: the non-null `id` cell, or the row's index.
    pub fn key(&self, index: usize) -> RowKey {
        match self.get(ID_KEY) {
            Some(CellValue::Text(id)) => RowKey::Id(id.clone()),
            Some(CellValue::Int(id)) => RowKey::Id(id.to_string()),
            _ => RowKey::Index(index),
        }
    }

    /// Render one cell fitted to `width`. Missing keys render blank.
    pub fn cell_text(&self, key: &str, width: usize) -> String {
        match self.get(key) {
            Some(value) => value.render(width),
            None => " ".repeat(width),
        }
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (key, value) in iter {
            row.set(key, value);
        }
        row
    }
}

/// Descriptors for a dataset that was given none: the first row's keys in
/// order, labelled with the key itself. Later rows with other keys show
/// blank cells for the keys they lack.
pub fn derive_descriptors(rows: &[Row]) -> Vec<ColumnDescriptor> {
    rows.first()
        .map(|row| {
            row.keys()
                .map(|key| ColumnDescriptor::new(key, key))
                .collect()
        })
        .unwrap_or_default()
}

/// Truncate or pad `text` to exactly `width` terminal columns.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

/// Skip the first `skip` columns of `text`, then fit the rest to `width`.
/// A wide character cut by the left edge is replaced with a space.
pub fn clip_columns(text: &str, skip: usize, width: usize) -> String {
    let mut out = String::new();
    let mut col = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if col >= skip {
            out.push(c);
        } else if col + w > skip {
            out.extend(std::iter::repeat_n(' ', col + w - skip));
        }
        col += w;
    }
    fit_to_width(&out, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit_to_width("abc", 5), "abc  ");
        assert_eq!(fit_to_width("abcdef", 3), "abc");
        assert_eq!(fit_to_width("", 2), "  ");
    }

    #[test]
    fn fit_does_not_split_wide_chars() {
        // Each CJK char is two columns wide.
        assert_eq!(fit_to_width("日本語", 5), "日本 ");
    }

    #[test]
    fn clip_skips_leading_columns() {
        assert_eq!(clip_columns("abcdef", 2, 3), "cde");
        assert_eq!(clip_columns("日本", 1, 3), " 本");
    }

    #[test]
    fn key_prefers_id_cell() {
        let row = Row::new().with("id", "abc").with("name", "x");
        assert_eq!(row.key(4), RowKey::Id("abc".into()));
        assert_eq!(Row::new().with("id", 7_i64).key(0), RowKey::Id("7".into()));
        assert_eq!(Row::new().with("id", CellValue::Null).key(3), RowKey::Index(3));
    }
}
