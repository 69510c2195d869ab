use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use rowmap_core::Value as CoreValue;

#[derive(Debug)]
pub(crate) struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts a SQLite value read from a row into a core value.
    pub(crate) fn from_sql(value: SqlValue) -> CoreValue {
        match value {
            SqlValue::Null => CoreValue::Null,
            SqlValue::Integer(value) => CoreValue::I64(value),
            SqlValue::Real(value) => CoreValue::F64(value),
            SqlValue::Text(value) => CoreValue::Text(value),
            SqlValue::Blob(value) => CoreValue::Bytes(value),
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match &self.0 {
            CoreValue::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
            CoreValue::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            CoreValue::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            CoreValue::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            CoreValue::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            CoreValue::Text(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            CoreValue::Bytes(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Blob(&v[..]))),
            CoreValue::List(_) => Err(rusqlite::Error::ToSqlConversionFailure(
                "list values cannot be bound; inline them with a literal-substitution token"
                    .into(),
            )),
        }
    }
}
