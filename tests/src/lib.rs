//! Shared support for the integration tests: an in-memory recording
//! provider that logs every assembled command and serves canned responses.

pub use recording::{CannedResponse, RecordedCommand, RecordingDialect};

pub use rows::MemoryRows;

/// Installs a tracing subscriber honoring `RUST_LOG`, once per process.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub mod prelude {
    pub use super::{init_logging, CannedResponse, MemoryRows, RecordedCommand, RecordingDialect};
    pub use rowmap::driver::{CommandBehavior, CommandKind, Connection, Dialect, Rows};
    pub use rowmap::{
        args, bind, BindArg, BindMode, Entity, EntityDescriptor, ExecutionHooks, Executor,
        FieldSpec, ParameterSet, QueryOptions, QueryParameter, QueryTrace, Tracked, Value,
    };
}
