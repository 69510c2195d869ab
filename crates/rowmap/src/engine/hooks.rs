use rowmap_core::param::QueryParameter;
use rowmap_core::Result;

/// The statement text and parameters of one assembled execution, kept for
/// diagnostic rendering after the fact.
#[derive(Debug, Clone)]
pub struct QueryTrace {
    pub sql: String,
    pub parameters: Vec<QueryParameter>,
}

/// Cross-cutting extension points of the execution pipeline.
///
/// Both methods have passthrough defaults; implementations override what
/// they need (tracing, metrics, retry wrappers) without touching the
/// pipeline's control flow.
pub trait ExecutionHooks: Send + Sync {
    /// Wraps the single provider call of an execution. The default invokes
    /// `run` directly; an override must call it exactly once for the
    /// execution to produce a result.
    fn around_execute(&self, run: &mut dyn FnMut() -> Result<()>) -> Result<()> {
        run()
    }

    /// Invoked once per execution, on the success path, after the cursor or
    /// scalar has been obtained and before it is returned to the caller.
    fn on_query_complete(&self, _trace: &QueryTrace) {}
}

pub(super) struct PassthroughHooks;

impl ExecutionHooks for PassthroughHooks {}
