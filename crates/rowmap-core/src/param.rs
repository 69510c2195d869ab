use crate::driver;
use crate::value::Value;

use indexmap::IndexMap;
use std::sync::Arc;

/// Type tag attached to a bound parameter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DbType {
    /// No type information; providers fall back to value inspection.
    #[default]
    Unknown,
    Bool,
    Int,
    Float,
    Text,
    Bytes,
    List,
}

/// Direction of a command parameter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ParamDirection {
    #[default]
    Input,
    Output,
    InputOutput,
}

/// A provider-independent description of one bound parameter.
///
/// The name is case-sensitive and always carries its leading `@` marker.
/// A null value is stored as [`Value::Null`], the explicit database-null
/// marker; it is shipped to the provider, never dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParameter {
    pub name: String,
    pub value: Value,
    pub db_type: DbType,
    pub direction: ParamDirection,
}

impl QueryParameter {
    /// Creates an input parameter, deriving the type tag from the value.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        Self {
            name: name.into(),
            db_type: value.infer_ty(),
            direction: ParamDirection::Input,
            value,
        }
    }

    pub fn with_direction(mut self, direction: ParamDirection) -> Self {
        self.direction = direction;
        self
    }
}

/// One entry of a [`ParameterSet`].
///
/// Generic entries are materialized into provider-native parameters at
/// command-assembly time. A `Native` entry is a fully-constructed provider
/// parameter supplied by the caller; assembly attaches the same object
/// untouched so provider-specific settings (output bindings, type
/// overrides) survive the trip.
pub enum ParameterEntry {
    Query(QueryParameter),
    Native(Arc<dyn driver::Parameter>),
}

impl ParameterEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Query(param) => &param.name,
            Self::Native(param) => param.name(),
        }
    }

    /// A generic view of this entry, used for diagnostics.
    pub fn descriptor(&self) -> QueryParameter {
        match self {
            Self::Query(param) => param.clone(),
            Self::Native(param) => QueryParameter {
                name: param.name().to_string(),
                value: param.value(),
                db_type: param.db_type(),
                direction: param.direction(),
            },
        }
    }

    pub fn value(&self) -> Value {
        match self {
            Self::Query(param) => param.value.clone(),
            Self::Native(param) => param.value(),
        }
    }
}

impl std::fmt::Debug for ParameterEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query(param) => f.debug_tuple("Query").field(param).finish(),
            Self::Native(param) => f
                .debug_struct("Native")
                .field("name", &param.name())
                .field("value", &param.value())
                .finish(),
        }
    }
}

/// An ordered sequence of bound parameters, unique by name.
///
/// The first entry inserted under a name wins; later duplicates are
/// ignored. Iteration order is insertion order.
#[derive(Debug, Default)]
pub struct ParameterSet {
    entries: IndexMap<String, ParameterEntry>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, keeping the first occurrence on duplicate names.
    ///
    /// Returns `false` when the name was already present and the entry was
    /// ignored.
    pub fn insert(&mut self, entry: ParameterEntry) -> bool {
        let name = entry.name().to_string();
        if self.entries.contains_key(&name) {
            return false;
        }
        self.entries.insert(name, entry);
        true
    }

    pub fn insert_value(&mut self, name: impl Into<String>, value: impl Into<Value>) -> bool {
        self.insert(ParameterEntry::Query(QueryParameter::new(name, value)))
    }

    pub fn get(&self, name: &str) -> Option<&ParameterEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterEntry> {
        self.entries.values()
    }
}

impl FromIterator<ParameterEntry> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = ParameterEntry>>(iter: I) -> Self {
        let mut set = Self::new();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}
