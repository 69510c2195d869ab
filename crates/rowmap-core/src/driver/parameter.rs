use crate::param::{DbType, ParamDirection};
use crate::value::Value;

use std::any::Any;

/// A provider-native command parameter.
///
/// Adapters implement this for their own parameter objects. A caller may
/// construct one directly (for output/return parameters or other
/// provider-specific settings) and hand it through the binding set; command
/// assembly attaches it untouched, and the owning adapter can recover the
/// concrete type through [`as_any`](Parameter::as_any).
pub trait Parameter: Send + Sync {
    fn name(&self) -> &str;

    fn value(&self) -> Value;

    fn db_type(&self) -> DbType;

    fn direction(&self) -> ParamDirection;

    fn as_any(&self) -> &dyn Any;
}
