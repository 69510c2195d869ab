use super::{Parameter, Rows, TransactionHandle};
use crate::param::QueryParameter;
use crate::Result;

use std::sync::Arc;

/// How the command text is interpreted by the provider.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Plain statement text.
    #[default]
    Text,

    /// The text names a stored procedure to invoke.
    StoredProcedure,
}

/// Execution hints passed through to the provider. Advisory: an adapter may
/// ignore behaviors its engine has no use for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CommandBehavior {
    #[default]
    Default,
    SingleResult,
    SingleRow,
}

/// A provider command: statement text plus attached parameters.
pub trait Command {
    fn set_kind(&mut self, kind: CommandKind);

    /// Enlists this command in a transaction previously started on the
    /// owning connection.
    fn join_transaction(&mut self, transaction: &TransactionHandle) -> Result<()>;

    /// Materializes a provider-native parameter from a generic descriptor.
    fn create_parameter(&self, spec: &QueryParameter) -> Result<Arc<dyn Parameter>>;

    /// Attaches a parameter object to this command as-is.
    fn add_parameter(&mut self, parameter: Arc<dyn Parameter>);

    fn parameter_count(&self) -> usize;

    /// Detaches every parameter from the command so the objects are not
    /// leaked into a later reuse of the provider command.
    fn clear_parameters(&mut self);

    /// Executes the command, returning a forward-only row cursor.
    fn execute_rows(&mut self, behavior: CommandBehavior) -> Result<Box<dyn Rows>>;
}
