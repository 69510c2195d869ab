//! The query execution pipeline.
//!
//! [`Executor`] orchestrates row-paging rewrites, literal substitution,
//! command assembly, and execution against a provider connection. It is
//! engine-agnostic: everything vendor-specific is delegated to the
//! [`Dialect`] it was built with.

mod hooks;
pub use hooks::{ExecutionHooks, QueryTrace};

use rowmap_core::driver::{
    CommandBehavior, CommandKind, Connection, Dialect, Rows, TransactionHandle,
};
use rowmap_core::param::ParameterSet;
use rowmap_core::{Error, Result};
use rowmap_sql::{assemble, count_query, substitute_literals};

use std::sync::{Arc, Mutex};
use tracing::debug;

/// Per-call execution options.
#[derive(Default)]
pub struct QueryOptions<'a> {
    /// Zero-based index of the first row to return.
    pub first_row: Option<u64>,

    /// Maximum number of rows to return.
    pub total_rows: Option<u64>,

    pub transaction: Option<&'a TransactionHandle>,

    pub behavior: CommandBehavior,
}

impl<'a> QueryOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options restricted to a row window.
    pub fn rows(first_row: Option<u64>, total_rows: Option<u64>) -> Self {
        Self {
            first_row,
            total_rows,
            ..Self::default()
        }
    }

    pub fn in_transaction(mut self, transaction: &'a TransactionHandle) -> Self {
        self.transaction = Some(transaction);
        self
    }

    fn wants_window(&self) -> bool {
        self.first_row.is_some() || self.total_rows.is_some()
    }
}

/// The synchronous query execution pipeline.
///
/// An `Executor` owns no connection; every operation takes the connection
/// it should run on. The executor itself is safe to share across threads,
/// with one documented exception: [`last_trace`](Executor::last_trace)
/// reports the most recent execution through *this* executor, so reading
/// it while other threads execute races against them. Callers needing
/// per-call diagnostics under concurrency should use
/// [`ExecutionHooks::on_query_complete`], which receives the trace of
/// exactly the completed execution.
pub struct Executor {
    dialect: Arc<dyn Dialect>,
    hooks: Arc<dyn ExecutionHooks>,
    last_trace: Mutex<Option<QueryTrace>>,
}

impl Executor {
    pub fn new(dialect: Arc<dyn Dialect>) -> Self {
        Self::with_hooks(dialect, Arc::new(hooks::PassthroughHooks))
    }

    pub fn with_hooks(dialect: Arc<dyn Dialect>, hooks: Arc<dyn ExecutionHooks>) -> Self {
        Self {
            dialect,
            hooks,
            last_trace: Mutex::new(None),
        }
    }

    pub fn dialect(&self) -> &dyn Dialect {
        &*self.dialect
    }

    /// Opens a connection through the dialect.
    pub fn connect(&self, connection_string: &str) -> Result<Box<dyn Connection>> {
        self.dialect.connect(connection_string)
    }

    /// Executes a query and returns a forward-only row cursor.
    ///
    /// When the options carry a row window the statement is first rewritten
    /// by the dialect to a page-restricted equivalent. Literal-substitution
    /// tokens (`@@name`) are then inlined from the binding set, the command
    /// is assembled with the parameters the final text references, and the
    /// provider call runs inside the execution hook.
    pub fn run_query(
        &self,
        connection: &mut dyn Connection,
        query: &str,
        params: &ParameterSet,
        options: &QueryOptions<'_>,
    ) -> Result<Box<dyn Rows>> {
        let sql = if options.wants_window() {
            self.dialect
                .query_for_rows(query, options.first_row, options.total_rows)?
        } else {
            query.to_string()
        };
        let sql = substitute_literals(&sql, params);

        self.execute(
            connection,
            &sql,
            params,
            options.transaction,
            CommandKind::Text,
            options.behavior,
        )
    }

    /// Like [`run_query`](Executor::run_query), but first derives the total
    /// row count of the unrestricted query.
    ///
    /// Two round-trips to the database; they are only atomic with respect
    /// to each other when the options carry a shared transaction.
    pub fn run_query_counted(
        &self,
        connection: &mut dyn Connection,
        query: &str,
        params: &ParameterSet,
        options: &QueryOptions<'_>,
    ) -> Result<(Box<dyn Rows>, i64)> {
        let total = self.count(connection, query, params, options)?;
        let rows = self.run_query(connection, query, params, options)?;
        Ok((rows, total))
    }

    /// Derives the total row count of a select statement.
    ///
    /// Fails with a usage error when `query` is not a select.
    pub fn count(
        &self,
        connection: &mut dyn Connection,
        query: &str,
        params: &ParameterSet,
        options: &QueryOptions<'_>,
    ) -> Result<i64> {
        let sql = count_query(query)?;
        self.run_query_scalar(connection, &sql, params, options)
    }

    /// Executes a query and returns the first column of the first row as an
    /// integer; when no row comes back, returns the provider-reported
    /// affected-row count instead.
    ///
    /// Which of the two semantics applies depends on the statement shape;
    /// the caller knows which one it asked for. Row windows in the options
    /// are ignored here.
    pub fn run_query_scalar(
        &self,
        connection: &mut dyn Connection,
        query: &str,
        params: &ParameterSet,
        options: &QueryOptions<'_>,
    ) -> Result<i64> {
        let scalar_options = QueryOptions {
            first_row: None,
            total_rows: None,
            transaction: options.transaction,
            behavior: options.behavior,
        };
        let mut rows = self.run_query(connection, query, params, &scalar_options)?;
        if rows.advance()? {
            rows.get(0)?.to_i64()
        } else {
            Ok(rows.records_affected())
        }
    }

    /// Executes an insert statement and returns the generated primary-key
    /// value, using the dialect's insert-and-fetch-id form.
    pub fn run_query_insert(
        &self,
        connection: &mut dyn Connection,
        sql: &str,
        params: &ParameterSet,
        transaction: Option<&TransactionHandle>,
        behavior: CommandBehavior,
    ) -> Result<i64> {
        let trace = QueryTrace {
            sql: sql.to_string(),
            parameters: params.iter().map(|entry| entry.descriptor()).collect(),
        };
        *self.last_trace.lock().unwrap() = Some(trace);

        self.dialect
            .insert_returning_id(connection, sql, params, transaction, behavior)
    }

    /// Invokes a stored procedure through the same assembly and execution
    /// path as a query.
    ///
    /// Row windows are not supported for stored-procedure results;
    /// requesting one is a usage error, raised before any provider work.
    pub fn run_stored_procedure(
        &self,
        connection: &mut dyn Connection,
        name: &str,
        params: &ParameterSet,
        options: &QueryOptions<'_>,
    ) -> Result<Box<dyn Rows>> {
        if options.wants_window() {
            return Err(Error::usage(
                "row windows are not supported for stored procedure results",
            ));
        }

        self.execute(
            connection,
            name,
            params,
            options.transaction,
            CommandKind::StoredProcedure,
            options.behavior,
        )
    }

    /// The statement text and parameters of the most recent execution
    /// through this executor. See the type-level note on concurrent use.
    pub fn last_trace(&self) -> Option<QueryTrace> {
        self.last_trace.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_trace().map(|trace| trace.sql)
    }

    fn execute(
        &self,
        connection: &mut dyn Connection,
        sql: &str,
        params: &ParameterSet,
        transaction: Option<&TransactionHandle>,
        kind: CommandKind,
        behavior: CommandBehavior,
    ) -> Result<Box<dyn Rows>> {
        let mut assembled = assemble(connection, sql, params, transaction, kind)?;
        let trace = QueryTrace {
            sql: assembled.sql.clone(),
            parameters: assembled.parameters.clone(),
        };
        *self.last_trace.lock().unwrap() = Some(trace.clone());
        debug!(sql = %assembled.sql, parameters = assembled.parameters.len(), "executing");

        let mut rows = None;
        let result = {
            let command = &mut assembled.command;
            self.hooks.around_execute(&mut || {
                rows = Some(command.execute_rows(behavior)?);
                Ok(())
            })
        };
        // Parameter objects must not leak into a later reuse of the
        // provider command; detach them on the failure path as well.
        assembled.command.clear_parameters();
        result?;

        let rows = rows
            .ok_or_else(|| Error::usage("execution hook returned without running the command"))?;
        self.hooks.on_query_complete(&trace);
        Ok(rows)
    }
}
