//! A micro object-relational mapper.
//!
//! rowmap binds application structs to relational rows, tracks field-level
//! mutation through [`Tracked`], and builds and executes parameterized SQL
//! text against the generic provider abstraction in [`rowmap_core::driver`].
//! Vendor specifics (row-paging syntax, insert-and-fetch-generated-id,
//! connection construction) live behind [`driver::Dialect`] implementations
//! such as `rowmap-driver-sqlite`.

pub mod engine;
pub use engine::{ExecutionHooks, Executor, QueryOptions, QueryTrace};

pub mod entity;
pub use entity::{Entity, EntityDescriptor, FieldDescriptor, FieldSpec, Tracked};

pub use rowmap_core::driver;
pub use rowmap_core::param::{self, ParameterSet, QueryParameter};
pub use rowmap_core::{Error, Result, Value};

pub use rowmap_sql as sql;
pub use rowmap_sql::{args, bind, BindArg, BindMode};
