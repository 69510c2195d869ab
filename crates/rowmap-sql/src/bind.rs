use crate::token::{self, TokenScan};

use rowmap_core::driver;
use rowmap_core::param::{ParameterEntry, ParameterSet, QueryParameter};
use rowmap_core::{Error, Result, Value};

use std::iter::Peekable;
use std::sync::Arc;
use tracing::warn;

/// How the binder treats a values-sequence element that resolves to no
/// scanned token.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BindMode {
    /// Excess values are dropped with a warning. The historical behavior;
    /// partial parameterization does not fail.
    #[default]
    Lenient,

    /// Excess values raise [`Error::binding`].
    Strict,
}

/// One element of a values sequence handed to [`bind`].
pub enum BindArg {
    /// A plain value: bound positionally, unless it is a string equal to a
    /// scanned token name and followed by another element, in which case
    /// the pair binds by name.
    Value(Value),

    /// A self-named generic parameter; consumes its token directly.
    Param(QueryParameter),

    /// A pre-built provider-native parameter; consumes its token directly
    /// and is attached to the command untouched at assembly time.
    Native(Arc<dyn driver::Parameter>),
}

impl BindArg {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }
}

impl From<Value> for BindArg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<QueryParameter> for BindArg {
    fn from(param: QueryParameter) -> Self {
        Self::Param(param)
    }
}

impl From<Arc<dyn driver::Parameter>> for BindArg {
    fn from(param: Arc<dyn driver::Parameter>) -> Self {
        Self::Native(param)
    }
}

/// Builds a vector of positional [`BindArg`]s from plain values.
#[macro_export]
macro_rules! args {
    () => { Vec::<$crate::BindArg>::new() };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::BindArg::value($value)),+]
    };
}

/// Correlates a values sequence with the parameter tokens scanned from
/// `sql`, producing an ordered, unique-by-name [`ParameterSet`].
///
/// Elements bind positionally to unconsumed tokens in first-appearance
/// order; a string element equal to a token name followed by another
/// element binds that pair by name, regardless of token position. Null
/// values are bound as the explicit null marker, never dropped. When a
/// name is supplied twice the first occurrence wins.
///
/// The resulting set is ordered by token first appearance in `sql`;
/// entries whose names occur in no token follow in arrival order (command
/// assembly filters those out unless the final statement text references
/// them).
pub fn bind(sql: &str, args: Vec<BindArg>, mode: BindMode) -> Result<ParameterSet> {
    let scan = token::scan(sql);
    let names: Vec<String> = scan.names().map(str::to_string).collect();

    let mut resolved: Vec<Option<ParameterEntry>> = names.iter().map(|_| None).collect();
    let mut extras: Vec<ParameterEntry> = Vec::new();
    let mut cursor = 0usize;

    let mut args = args.into_iter().peekable();
    while let Some(arg) = args.next() {
        let value = match arg {
            BindArg::Param(param) => {
                place_named(&names, &mut resolved, &mut extras, ParameterEntry::Query(param));
                continue;
            }
            BindArg::Native(param) => {
                place_named(&names, &mut resolved, &mut extras, ParameterEntry::Native(param));
                continue;
            }
            BindArg::Value(value) => value,
        };

        if let Some(name) = explicit_name(&value, &scan, &mut args) {
            if let Some(BindArg::Value(paired)) = args.next() {
                place_named(
                    &names,
                    &mut resolved,
                    &mut extras,
                    ParameterEntry::Query(QueryParameter::new(name, paired)),
                );
            }
            continue;
        }

        // Positional: the next token not yet consumed by name or position.
        while cursor < names.len() && resolved[cursor].is_some() {
            cursor += 1;
        }
        if cursor < names.len() {
            let param = QueryParameter::new(names[cursor].clone(), value);
            resolved[cursor] = Some(ParameterEntry::Query(param));
            cursor += 1;
        } else {
            match mode {
                BindMode::Strict => {
                    return Err(Error::binding(format!(
                        "value {value:?} does not resolve to any parameter token"
                    )));
                }
                BindMode::Lenient => {
                    warn!(?value, "dropping excess value with no matching parameter token");
                }
            }
        }
    }

    let mut set = ParameterSet::new();
    for entry in resolved.into_iter().flatten() {
        set.insert(entry);
    }
    for entry in extras {
        set.insert(entry);
    }
    Ok(set)
}

/// Detects the explicit name/value form: a string element equal to a
/// scanned token name, with a value element following it.
fn explicit_name(
    value: &Value,
    scan: &TokenScan,
    args: &mut Peekable<impl Iterator<Item = BindArg>>,
) -> Option<String> {
    let name = value.as_str()?;
    if !scan.contains(name) {
        return None;
    }
    match args.peek() {
        Some(BindArg::Value(_)) => Some(name.to_string()),
        _ => None,
    }
}

fn place_named(
    names: &[String],
    resolved: &mut [Option<ParameterEntry>],
    extras: &mut Vec<ParameterEntry>,
    entry: ParameterEntry,
) {
    match names.iter().position(|name| name == entry.name()) {
        // First occurrence wins; a duplicate is dropped here.
        Some(index) => {
            if resolved[index].is_none() {
                resolved[index] = Some(entry);
            }
        }
        None => extras.push(entry),
    }
}
