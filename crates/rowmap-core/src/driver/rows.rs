use crate::value::Value;
use crate::{Error, Result};

/// A forward-only cursor over the rows produced by a command.
///
/// Columns are addressable by ordinal or by name; name lookup is exact
/// first, then ASCII case-insensitive. When the statement produced no
/// result set, [`records_affected`](Rows::records_affected) reports the
/// provider's affected-row count instead.
pub trait Rows {
    /// Advances to the next row; `false` at the end of the cursor.
    fn advance(&mut self) -> Result<bool>;

    fn column_count(&self) -> usize;

    fn column_name(&self, index: usize) -> Option<&str>;

    fn column_index(&self, name: &str) -> Option<usize> {
        let mut fallback = None;
        for index in 0..self.column_count() {
            let column = self.column_name(index)?;
            if column == name {
                return Some(index);
            }
            if fallback.is_none() && column.eq_ignore_ascii_case(name) {
                fallback = Some(index);
            }
        }
        fallback
    }

    /// Reads a column of the current row by ordinal.
    fn get(&self, index: usize) -> Result<Value>;

    fn get_named(&self, name: &str) -> Result<Value> {
        match self.column_index(name) {
            Some(index) => self.get(index),
            None => Err(Error::usage(format!("no column named {name}"))),
        }
    }

    /// The provider-reported affected-row count; `-1` when the statement
    /// produced a result set.
    fn records_affected(&self) -> i64;
}
