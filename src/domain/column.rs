//! Column Definition
//!
//! Display columns an entity exposes to renderers. Sortable columns double as
//! the entity's sortable field list.

/// Column width hint for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnWidth {
    /// Fixed width in characters
    Fixed(usize),
    /// Sized to content, up to the renderer's cap
    #[default]
    Flex,
}

/// Column definition for an entity table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Field name passed to the accessor
    pub id: &'static str,
    /// Column header label
    pub label: &'static str,
    pub width: ColumnWidth,
    /// Whether the column is sortable
    pub sortable: bool,
}

impl Column {
    /// Create a new column
    pub const fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            width: ColumnWidth::Flex,
            sortable: false,
        }
    }

    /// Set fixed width
    pub const fn fixed_width(mut self, width: usize) -> Self {
        self.width = ColumnWidth::Fixed(width);
        self
    }

    /// Make the column sortable
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}
