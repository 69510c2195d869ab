//! SQLite dialect adapter, backed by `rusqlite`.
//!
//! Connection strings are URLs: `sqlite::memory:` for an in-memory
//! database, `sqlite:path/to/file.db` for a file. Parameters bind by their
//! `@name` directly; SQLite understands the marker natively.

mod connection;
pub use connection::SqliteConnection;

mod rows;
mod value;

use rowmap_core::driver::{CommandBehavior, CommandKind, Connection, Dialect, TransactionHandle};
use rowmap_core::param::ParameterSet;
use rowmap_core::{Error, Result};
use rowmap_sql::assemble;

use rusqlite::Connection as RusqliteConnection;
use tracing::debug;
use url::Url;

/// The SQLite dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sqlite;

impl Sqlite {
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for Sqlite {
    fn connect(&self, connection_string: &str) -> Result<Box<dyn Connection>> {
        let url = Url::parse(connection_string)
            .map_err(|err| Error::usage(format!("invalid connection URL: {err}")))?;

        if url.scheme() != "sqlite" {
            return Err(Error::usage(format!(
                "connection URL does not have a `sqlite` scheme; url={connection_string}"
            )));
        }

        let connection = if url.path() == ":memory:" {
            RusqliteConnection::open_in_memory().map_err(Error::provider)?
        } else {
            RusqliteConnection::open(url.path()).map_err(Error::provider)?
        };

        debug!(path = url.path(), "opened sqlite connection");
        Ok(Box::new(SqliteConnection::new(connection)))
    }

    fn query_for_rows(
        &self,
        query: &str,
        first_row: Option<u64>,
        total_rows: Option<u64>,
    ) -> Result<String> {
        let offset = first_row.unwrap_or(0);
        let limit = total_rows
            .map(|total| total.to_string())
            .unwrap_or_else(|| "-1".to_string());
        Ok(format!("SELECT * FROM ({query}) q LIMIT {limit} OFFSET {offset}"))
    }

    fn insert_returning_id(
        &self,
        connection: &mut dyn Connection,
        sql: &str,
        params: &ParameterSet,
        transaction: Option<&TransactionHandle>,
        behavior: CommandBehavior,
    ) -> Result<i64> {
        {
            let mut assembled = assemble(connection, sql, params, transaction, CommandKind::Text)?;
            let result = assembled.command.execute_rows(behavior);
            assembled.command.clear_parameters();
            result?;
        }

        let mut assembled = assemble(
            connection,
            "SELECT last_insert_rowid()",
            &ParameterSet::new(),
            transaction,
            CommandKind::Text,
        )?;
        let mut rows = assembled.command.execute_rows(CommandBehavior::SingleRow)?;
        if rows.advance()? {
            rows.get(0)?.to_i64()
        } else {
            Err(anyhow::anyhow!("last_insert_rowid() returned no row").into())
        }
    }
}
