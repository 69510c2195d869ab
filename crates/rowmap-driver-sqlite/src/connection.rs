use crate::rows::RowSet;
use crate::value::Value as SqliteValue;

use rowmap_core::driver::{
    self, Command, CommandBehavior, CommandKind, Connection, Rows, TransactionHandle,
};
use rowmap_core::param::{DbType, ParamDirection, QueryParameter};
use rowmap_core::{Error, Result, Value};

use rusqlite::Connection as RusqliteConnection;
use std::any::Any;
use std::sync::Arc;

/// An open SQLite connection.
pub struct SqliteConnection {
    connection: RusqliteConnection,
    next_transaction_id: u64,
    active_transaction: Option<u64>,
}

impl SqliteConnection {
    pub(crate) fn new(connection: RusqliteConnection) -> Self {
        Self {
            connection,
            next_transaction_id: 0,
            active_transaction: None,
        }
    }
}

impl Connection for SqliteConnection {
    fn create_command<'a>(&'a mut self, text: &str) -> Result<Box<dyn Command + 'a>> {
        Ok(Box::new(SqliteCommand {
            connection: &self.connection,
            text: text.to_string(),
            kind: CommandKind::Text,
            parameters: Vec::new(),
        }))
    }

    fn begin_transaction(&mut self) -> Result<TransactionHandle> {
        if self.active_transaction.is_some() {
            return Err(Error::usage(
                "a transaction is already active on this connection",
            ));
        }
        self.connection.execute("BEGIN", []).map_err(Error::provider)?;
        self.next_transaction_id += 1;
        let handle = TransactionHandle::new(self.next_transaction_id);
        self.active_transaction = Some(handle.id());
        Ok(handle)
    }

    fn commit(&mut self, transaction: TransactionHandle) -> Result<()> {
        self.end_transaction(transaction, "COMMIT")
    }

    fn rollback(&mut self, transaction: TransactionHandle) -> Result<()> {
        self.end_transaction(transaction, "ROLLBACK")
    }
}

impl SqliteConnection {
    fn end_transaction(&mut self, transaction: TransactionHandle, sql: &str) -> Result<()> {
        match self.active_transaction {
            Some(id) if id == transaction.id() => {}
            _ => {
                return Err(Error::usage(
                    "the transaction handle is not active on this connection",
                ))
            }
        }
        self.connection.execute(sql, []).map_err(Error::provider)?;
        self.active_transaction = None;
        Ok(())
    }
}

struct SqliteCommand<'conn> {
    connection: &'conn RusqliteConnection,
    text: String,
    kind: CommandKind,
    parameters: Vec<Arc<dyn driver::Parameter>>,
}

impl Command for SqliteCommand<'_> {
    fn set_kind(&mut self, kind: CommandKind) {
        self.kind = kind;
    }

    // SQLite statements implicitly run inside the connection's active
    // transaction; there is nothing to attach per command.
    fn join_transaction(&mut self, _transaction: &TransactionHandle) -> Result<()> {
        Ok(())
    }

    fn create_parameter(&self, spec: &QueryParameter) -> Result<Arc<dyn driver::Parameter>> {
        Ok(Arc::new(SqliteParameter { spec: spec.clone() }))
    }

    fn add_parameter(&mut self, parameter: Arc<dyn driver::Parameter>) {
        self.parameters.push(parameter);
    }

    fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    fn clear_parameters(&mut self) {
        self.parameters.clear();
    }

    fn execute_rows(&mut self, _behavior: CommandBehavior) -> Result<Box<dyn Rows>> {
        if self.kind == CommandKind::StoredProcedure {
            return Err(Error::provider(StoredProceduresUnsupported));
        }

        let mut stmt = self.connection.prepare(&self.text).map_err(Error::provider)?;

        for parameter in &self.parameters {
            let index = stmt
                .parameter_index(parameter.name())
                .map_err(Error::provider)?;
            let Some(index) = index else { continue };
            stmt.raw_bind_parameter(index, SqliteValue::from(parameter.value()))
                .map_err(Error::provider)?;
        }

        if stmt.column_count() == 0 {
            let affected = stmt.raw_execute().map_err(Error::provider)?;
            return Ok(Box::new(RowSet::from_affected(affected as i64)));
        }

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut buffered = Vec::new();
        let mut rows = stmt.raw_query();
        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut record = Vec::with_capacity(columns.len());
                    for index in 0..columns.len() {
                        let value: rusqlite::types::Value =
                            row.get(index).map_err(Error::provider)?;
                        record.push(SqliteValue::from_sql(value));
                    }
                    buffered.push(record);
                }
                Ok(None) => break,
                Err(err) => return Err(Error::provider(err)),
            }
        }

        Ok(Box::new(RowSet::new(columns, buffered)))
    }
}

#[derive(Debug)]
struct StoredProceduresUnsupported;

impl std::error::Error for StoredProceduresUnsupported {}

impl std::fmt::Display for StoredProceduresUnsupported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SQLite has no stored procedures")
    }
}

struct SqliteParameter {
    spec: QueryParameter,
}

impl driver::Parameter for SqliteParameter {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn value(&self) -> Value {
        self.spec.value.clone()
    }

    fn db_type(&self) -> DbType {
        self.spec.db_type
    }

    fn direction(&self) -> ParamDirection {
        self.spec.direction
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
