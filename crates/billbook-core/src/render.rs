//! Display formatting for records and the two result regions.

use crate::models::RecordId;

/// Placeholder row shown when the collection is empty.
pub const EMPTY_LIST_PLACEHOLDER: &str = "No items registered";
/// Row shown when a search finds nothing.
pub const NOT_FOUND_MESSAGE: &str = "Item not found";
/// Row shown when a search request fails before reaching the backend.
pub const SEARCH_FAILED_MESSAGE: &str = "Error searching item";

/// One rendered record: its identity plus labelled display values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    pub id: RecordId,
    pub fields: Vec<(&'static str, String)>,
}

impl RecordRow {
    pub const fn new(id: RecordId) -> Self {
        Self {
            id,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((label, value.into()));
        self
    }

    /// Single-line form: `ID: 1 | Name: Monitor | Price: R$ 850.50`.
    pub fn summary(&self) -> String {
        std::iter::once(format!("ID: {}", self.id))
            .chain(
                self.fields
                    .iter()
                    .map(|(label, value)| format!("{label}: {value}")),
            )
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Content of the list region after a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRegion {
    Rows(Vec<RecordRow>),
    /// Rendered as a single placeholder row.
    Empty,
}

impl ListRegion {
    pub fn from_rows(rows: Vec<RecordRow>) -> Self {
        if rows.is_empty() {
            Self::Empty
        } else {
            Self::Rows(rows)
        }
    }
}

/// Content of the search result region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRegion {
    Cleared,
    Found(RecordRow),
    NotFound,
    Failed(String),
}

/// Format an amount as Brazilian reais with two decimals.
pub fn currency(value: f64) -> String {
    format!("R$ {value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_uses_two_decimals() {
        assert_eq!(currency(12.5), "R$ 12.50");
        assert_eq!(currency(0.0), "R$ 0.00");
        assert_eq!(currency(1234.567), "R$ 1234.57");
    }

    #[test]
    fn summary_joins_fields() {
        let row = RecordRow::new(RecordId::parse("1").unwrap())
            .field("Name", "Monitor")
            .field("Price", currency(850.5));
        assert_eq!(row.summary(), "ID: 1 | Name: Monitor | Price: R$ 850.50");
    }

    #[test]
    fn empty_rows_become_placeholder_region() {
        assert_eq!(ListRegion::from_rows(Vec::new()), ListRegion::Empty);
    }
}
