use super::{CommandBehavior, Connection, TransactionHandle};
use crate::param::ParameterSet;
use crate::Result;

/// The vendor-specific pieces of query execution.
///
/// One implementation per database engine. The execution pipeline is
/// engine-agnostic and delegates here for connection construction and for
/// the two statement shapes that have no portable SQL: restricting a query
/// to a row window, and inserting a row while retrieving the generated
/// primary key.
pub trait Dialect: Send + Sync {
    /// Opens a connection for the given connection string.
    fn connect(&self, connection_string: &str) -> Result<Box<dyn Connection>>;

    /// Returns a statement equivalent to `query` restricted to the given
    /// row window. `first_row` is a zero-based offset; `total_rows` caps
    /// the number of rows returned. At least one of the two is set when
    /// this is called.
    fn query_for_rows(
        &self,
        query: &str,
        first_row: Option<u64>,
        total_rows: Option<u64>,
    ) -> Result<String>;

    /// Executes an insert statement and returns the generated primary-key
    /// value.
    fn insert_returning_id(
        &self,
        connection: &mut dyn Connection,
        sql: &str,
        params: &ParameterSet,
        transaction: Option<&TransactionHandle>,
        behavior: CommandBehavior,
    ) -> Result<i64>;
}
