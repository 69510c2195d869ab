use rowmap_core::driver::{Command, CommandKind, Connection, TransactionHandle};
use rowmap_core::param::{ParameterEntry, ParameterSet, QueryParameter};
use rowmap_core::Result;

use std::sync::Arc;

/// A provider command ready to execute, plus the effective statement text
/// and a generic view of every attached parameter for diagnostics.
pub struct AssembledCommand<'a> {
    pub command: Box<dyn Command + 'a>,
    pub sql: String,
    pub parameters: Vec<QueryParameter>,
}

/// Builds a provider command from statement text and a binding set.
///
/// A parameter is attached only when its name occurs textually in `sql`;
/// providers that reject unused parameters never see them. Generic entries
/// are materialized through the command; pre-built provider-native entries
/// are attached as the same object, so provider-specific settings survive.
pub fn assemble<'a>(
    connection: &'a mut dyn Connection,
    sql: &str,
    params: &ParameterSet,
    transaction: Option<&TransactionHandle>,
    kind: CommandKind,
) -> Result<AssembledCommand<'a>> {
    let mut command = connection.create_command(sql)?;
    command.set_kind(kind);

    let mut attached = Vec::new();
    for entry in params.iter() {
        if !sql.contains(entry.name()) {
            continue;
        }
        let native = match entry {
            ParameterEntry::Native(param) => Arc::clone(param),
            ParameterEntry::Query(spec) => command.create_parameter(spec)?,
        };
        attached.push(QueryParameter {
            name: native.name().to_string(),
            value: native.value(),
            db_type: native.db_type(),
            direction: native.direction(),
        });
        command.add_parameter(native);
    }

    if let Some(tx) = transaction {
        command.join_transaction(tx)?;
    }

    Ok(AssembledCommand {
        command,
        sql: sql.to_string(),
        parameters: attached,
    })
}
