use crate::param::DbType;
use crate::{Error, Result};

/// A database value, as shipped to and read back from a provider.
///
/// `Value::Null` is the explicit database-null marker: a `None` converted
/// through [`From<Option<T>>`] lands here, and providers receive it as their
/// native SQL `NULL`. There is no other null representation in the crate.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit float
    F64(f64),

    /// String value
    Text(String),

    /// Raw byte blob
    Bytes(Vec<u8>),

    /// A list of values, rendered comma-separated when inlined as a literal
    List(Vec<Value>),
}

impl Value {
    /// Returns the null marker.
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Derives the type tag for this value.
    pub fn infer_ty(&self) -> DbType {
        match self {
            Self::Null => DbType::Unknown,
            Self::Bool(_) => DbType::Bool,
            Self::I64(_) => DbType::Int,
            Self::F64(_) => DbType::Float,
            Self::Text(_) => DbType::Text,
            Self::Bytes(_) => DbType::Bytes,
            Self::List(_) => DbType::List,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn to_i64(self) -> Result<i64> {
        match self {
            Self::I64(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "i64")),
        }
    }

    pub fn to_text(self) -> Result<String> {
        match self {
            Self::Text(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "String")),
        }
    }

    pub fn to_option_i64(self) -> Result<Option<i64>> {
        match self {
            Self::Null => Ok(None),
            Self::I64(v) => Ok(Some(v)),
            _ => Err(Error::type_conversion(self, "i64")),
        }
    }

    /// Renders this value as a raw SQL text fragment, for inlining into a
    /// statement in place of a literal-substitution token.
    ///
    /// Returns `None` for the null marker: null values are never inlined.
    /// Text renders without quoting or escaping; the call sites that inline
    /// it into SQL document the injection hazard this carries.
    pub fn literal_fragment(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(true) => Some("1".to_string()),
            Self::Bool(false) => Some("0".to_string()),
            Self::I64(v) => Some(v.to_string()),
            Self::F64(v) => Some(v.to_string()),
            Self::Text(v) => Some(v.clone()),
            Self::Bytes(v) => {
                let mut out = String::with_capacity(v.len() * 2 + 3);
                out.push_str("X'");
                for byte in v {
                    out.push_str(&format!("{byte:02X}"));
                }
                out.push('\'');
                Some(out)
            }
            Self::List(items) => {
                let fragments: Vec<String> =
                    items.iter().filter_map(Value::literal_fragment).collect();
                Some(fragments.join(", "))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::Text(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::Text(src)
    }
}

impl From<Vec<u8>> for Value {
    fn from(src: Vec<u8>) -> Self {
        Self::Bytes(src)
    }
}

impl From<Vec<Value>> for Value {
    fn from(src: Vec<Value>) -> Self {
        Self::List(src)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
