//! Column descriptors.

use serde::{Deserialize, Serialize};

/// Describes one column of the caller's data.
///
/// Keys are expected to be unique within a descriptor list; the engine never
/// mutates descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Key of the cell this column shows.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Width in terminal columns. `None` uses the grid's default width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
}

impl ColumnDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            width: None,
        }
    }

    /// Set a fixed width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// The width to lay this column out with.
    pub fn resolved_width(&self, default: u16) -> u16 {
        self.width.unwrap_or(default).max(1)
    }
}
