use rowmap_core::driver::Rows;
use rowmap_core::{Error, Result, Value};

/// Result rows buffered out of a finished statement.
///
/// SQLite statements are stepped to completion inside the command, so the
/// forward-only cursor contract is served from memory here. Statements that
/// produced no result set carry the affected-row count instead.
pub(crate) struct RowSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    cursor: Option<usize>,
    records_affected: i64,
}

impl RowSet {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows,
            cursor: None,
            records_affected: -1,
        }
    }

    pub(crate) fn from_affected(count: i64) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            cursor: None,
            records_affected: count,
        }
    }
}

impl Rows for RowSet {
    fn advance(&mut self) -> Result<bool> {
        let next = self.cursor.map_or(0, |cursor| cursor.saturating_add(1));
        self.cursor = Some(next.min(self.rows.len()));
        Ok(next < self.rows.len())
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    fn get(&self, index: usize) -> Result<Value> {
        let row = self
            .cursor
            .and_then(|cursor| self.rows.get(cursor))
            .ok_or_else(|| Error::usage("cursor is not positioned on a row"))?;
        row.get(index)
            .cloned()
            .ok_or_else(|| Error::usage(format!("no column at ordinal {index}")))
    }

    fn records_affected(&self) -> i64 {
        self.records_affected
    }
}
