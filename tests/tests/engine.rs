use tests::prelude::*;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn setup() -> (Arc<RecordingDialect>, Executor, Box<dyn Connection>) {
    init_logging();
    let dialect = Arc::new(RecordingDialect::new());
    let executor = Executor::new(dialect.clone());
    let connection = executor.connect("recording:").unwrap();
    (dialect, executor, connection)
}

#[test]
fn runs_queries_unmodified_without_a_row_window() {
    let (dialect, executor, mut connection) = setup();

    executor
        .run_query(
            &mut *connection,
            "select * from t where a=@a",
            &bind("select * from t where a=@a", args![1], BindMode::Strict).unwrap(),
            &QueryOptions::new(),
        )
        .unwrap();

    let command = dialect.last_command().unwrap();
    assert_eq!(command.sql, "select * from t where a=@a");
    assert_eq!(command.kind, CommandKind::Text);
    assert_eq!(command.parameters.len(), 1);
    assert_eq!(command.parameters[0].name, "@a");
}

#[test]
fn row_windows_are_rewritten_by_the_dialect() {
    let (dialect, executor, mut connection) = setup();

    executor
        .run_query(
            &mut *connection,
            "select * from t",
            &ParameterSet::new(),
            &QueryOptions::rows(Some(10), Some(5)),
        )
        .unwrap();

    assert_eq!(
        dialect.last_command().unwrap().sql,
        "select * from t LIMIT 5 OFFSET 10"
    );
}

#[test]
fn literal_tokens_are_inlined_not_bound() {
    let (dialect, executor, mut connection) = setup();

    let sql = "select * from t where id in (@@ids) and n=@n";
    let mut params = ParameterSet::new();
    params.insert_value(
        "@ids",
        Value::List(vec![Value::I64(1), Value::I64(2), Value::I64(3)]),
    );
    params.insert_value("@n", 5);

    executor
        .run_query(&mut *connection, sql, &params, &QueryOptions::new())
        .unwrap();

    let command = dialect.last_command().unwrap();
    assert_eq!(command.sql, "select * from t where id in (1, 2, 3) and n=@n");
    assert_eq!(command.parameters.len(), 1);
    assert_eq!(command.parameters[0].name, "@n");
}

#[test]
fn null_valued_literal_tokens_stay_in_the_text() {
    let (dialect, executor, mut connection) = setup();

    let mut params = ParameterSet::new();
    params.insert_value("@x", Value::Null);

    executor
        .run_query(
            &mut *connection,
            "select * from t where a = @@x",
            &params,
            &QueryOptions::new(),
        )
        .unwrap();

    assert_eq!(
        dialect.last_command().unwrap().sql,
        "select * from t where a = @@x"
    );
}

#[test]
fn null_parameters_are_shipped_not_dropped() {
    let (dialect, executor, mut connection) = setup();

    let sql = "someField=@p1 and someField2=@p2";
    let params = bind(sql, args![Value::Null, Value::Null], BindMode::Strict).unwrap();

    executor
        .run_query(&mut *connection, sql, &params, &QueryOptions::new())
        .unwrap();

    let command = dialect.last_command().unwrap();
    assert_eq!(command.parameters.len(), 2);
    assert!(command.parameters.iter().all(|p| p.value.is_null()));
}

#[test]
fn unreferenced_parameters_are_filtered_out() {
    let (dialect, executor, mut connection) = setup();

    let mut params = ParameterSet::new();
    params.insert_value("@a", 1);
    params.insert_value("@b", 2);

    executor
        .run_query(
            &mut *connection,
            "select * from t where a=@a",
            &params,
            &QueryOptions::new(),
        )
        .unwrap();

    let command = dialect.last_command().unwrap();
    assert_eq!(command.parameters.len(), 1);
    assert_eq!(command.parameters[0].name, "@a");
}

#[test]
fn parameters_are_cleared_after_success() {
    let (dialect, executor, mut connection) = setup();

    executor
        .run_query(
            &mut *connection,
            "select * from t where a=@a",
            &bind("select * from t where a=@a", args![1], BindMode::Strict).unwrap(),
            &QueryOptions::new(),
        )
        .unwrap();

    assert!(dialect.last_command().unwrap().parameters_cleared);
}

#[test]
fn parameters_are_cleared_when_the_provider_fails() {
    let (dialect, executor, mut connection) = setup();
    dialect.enqueue(CannedResponse::Fail("disk I/O error".into()));

    let err = executor
        .run_query(
            &mut *connection,
            "select * from t where a=@a",
            &bind("select * from t where a=@a", args![1], BindMode::Strict).unwrap(),
            &QueryOptions::new(),
        )
        .err()
        .unwrap();

    assert!(err.is_provider());
    assert!(err.to_string().contains("disk I/O error"));
    assert!(dialect.last_command().unwrap().parameters_cleared);
}

#[test]
fn scalar_returns_first_column_of_first_row() {
    let (dialect, executor, mut connection) = setup();
    dialect.enqueue(CannedResponse::Rows(MemoryRows::new(
        &["c"],
        vec![vec![Value::I64(7)]],
    )));

    let scalar = executor
        .run_query_scalar(
            &mut *connection,
            "select c from t",
            &ParameterSet::new(),
            &QueryOptions::new(),
        )
        .unwrap();

    assert_eq!(scalar, 7);
}

#[test]
fn scalar_falls_back_to_records_affected() {
    let (dialect, executor, mut connection) = setup();
    dialect.enqueue(CannedResponse::Affected(3));

    let scalar = executor
        .run_query_scalar(
            &mut *connection,
            "update t set x=1",
            &ParameterSet::new(),
            &QueryOptions::new(),
        )
        .unwrap();

    assert_eq!(scalar, 3);
}

#[test]
fn count_wraps_the_query_and_reads_a_scalar() {
    let (dialect, executor, mut connection) = setup();
    dialect.enqueue(CannedResponse::Rows(MemoryRows::new(
        &["count"],
        vec![vec![Value::I64(42)]],
    )));

    let count = executor
        .count(
            &mut *connection,
            "select * from t",
            &ParameterSet::new(),
            &QueryOptions::new(),
        )
        .unwrap();

    assert_eq!(count, 42);
    assert_eq!(
        dialect.last_command().unwrap().sql,
        "SELECT COUNT(*) FROM (select * from t) q"
    );
}

#[test]
fn count_rejects_non_select_statements() {
    let (dialect, executor, mut connection) = setup();

    let err = executor
        .count(
            &mut *connection,
            "update t set x=1",
            &ParameterSet::new(),
            &QueryOptions::new(),
        )
        .unwrap_err();

    assert!(err.is_usage());
    assert!(dialect.commands().is_empty());
}

#[test]
fn counted_query_issues_two_round_trips() {
    let (dialect, executor, mut connection) = setup();
    dialect.enqueue(CannedResponse::Rows(MemoryRows::new(
        &["count"],
        vec![vec![Value::I64(2)]],
    )));
    dialect.enqueue(CannedResponse::Rows(MemoryRows::new(
        &["n"],
        vec![vec![Value::I64(10)], vec![Value::I64(20)]],
    )));

    let (mut rows, total) = executor
        .run_query_counted(
            &mut *connection,
            "select n from t",
            &ParameterSet::new(),
            &QueryOptions::new(),
        )
        .unwrap();

    assert_eq!(total, 2);
    assert!(rows.advance().unwrap());
    assert_eq!(rows.get(0).unwrap(), Value::I64(10));
    assert_eq!(dialect.commands().len(), 2);
}

#[test]
fn insert_delegates_to_the_dialect_and_reports_generated_ids() {
    let (dialect, executor, mut connection) = setup();

    let sql = "insert into t (n) values (@n)";
    let first = executor
        .run_query_insert(
            &mut *connection,
            sql,
            &bind(sql, args![1], BindMode::Strict).unwrap(),
            None,
            CommandBehavior::Default,
        )
        .unwrap();
    let second = executor
        .run_query_insert(
            &mut *connection,
            sql,
            &bind(sql, args![2], BindMode::Strict).unwrap(),
            None,
            CommandBehavior::Default,
        )
        .unwrap();

    assert_eq!((first, second), (1, 2));
    assert_eq!(executor.last_query().unwrap(), sql);
}

#[test]
fn stored_procedures_use_the_stored_procedure_command_kind() {
    let (dialect, executor, mut connection) = setup();

    executor
        .run_stored_procedure(
            &mut *connection,
            "refresh_totals @mode",
            &bind("refresh_totals @mode", args!["fast"], BindMode::Strict).unwrap(),
            &QueryOptions::new(),
        )
        .unwrap();

    let command = dialect.last_command().unwrap();
    assert_eq!(command.kind, CommandKind::StoredProcedure);
    assert_eq!(command.parameters.len(), 1);
}

#[test]
fn stored_procedures_reject_row_windows_without_touching_the_provider() {
    let (dialect, executor, mut connection) = setup();

    let err = executor
        .run_stored_procedure(
            &mut *connection,
            "refresh_totals",
            &ParameterSet::new(),
            &QueryOptions::rows(Some(0), Some(10)),
        )
        .err()
        .unwrap();

    assert!(err.is_usage());
    assert!(dialect.commands().is_empty());
}

#[test]
fn transactions_are_joined_to_assembled_commands() {
    let (dialect, executor, mut connection) = setup();

    let tx = connection.begin_transaction().unwrap();
    let options = QueryOptions::new().in_transaction(&tx);
    executor
        .run_query(&mut *connection, "select 1", &ParameterSet::new(), &options)
        .unwrap();

    assert_eq!(dialect.last_command().unwrap().transaction, Some(tx.id()));
}

#[test]
fn last_trace_reports_the_effective_statement() {
    let (_dialect, executor, mut connection) = setup();

    let mut params = ParameterSet::new();
    params.insert_value("@ids", Value::List(vec![Value::I64(4), Value::I64(5)]));

    executor
        .run_query(
            &mut *connection,
            "select * from t where id in (@@ids)",
            &params,
            &QueryOptions::new(),
        )
        .unwrap();

    let trace = executor.last_trace().unwrap();
    assert_eq!(trace.sql, "select * from t where id in (4, 5)");
    assert!(trace.parameters.is_empty());
}

struct CountingHooks {
    around: AtomicUsize,
    completed: AtomicUsize,
}

impl ExecutionHooks for CountingHooks {
    fn around_execute(
        &self,
        run: &mut dyn FnMut() -> rowmap::Result<()>,
    ) -> rowmap::Result<()> {
        self.around.fetch_add(1, Ordering::SeqCst);
        run()
    }

    fn on_query_complete(&self, _trace: &QueryTrace) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn hooks_wrap_the_provider_call_and_fire_on_success_only() {
    let dialect = Arc::new(RecordingDialect::new());
    let hooks = Arc::new(CountingHooks {
        around: AtomicUsize::new(0),
        completed: AtomicUsize::new(0),
    });
    let executor = Executor::with_hooks(dialect.clone(), hooks.clone());
    let mut connection = executor.connect("recording:").unwrap();

    executor
        .run_query(
            &mut *connection,
            "select 1",
            &ParameterSet::new(),
            &QueryOptions::new(),
        )
        .unwrap();
    assert_eq!(hooks.around.load(Ordering::SeqCst), 1);
    assert_eq!(hooks.completed.load(Ordering::SeqCst), 1);

    dialect.enqueue(CannedResponse::Fail("boom".into()));
    let _ = executor
        .run_query(
            &mut *connection,
            "select 1",
            &ParameterSet::new(),
            &QueryOptions::new(),
        )
        .err()
        .unwrap();

    assert_eq!(hooks.around.load(Ordering::SeqCst), 2);
    assert_eq!(hooks.completed.load(Ordering::SeqCst), 1);
}
