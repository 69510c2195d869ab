//! The generic database provider abstraction the mapper rides on.
//!
//! Everything vendor-specific lives behind these traits: a [`Dialect`]
//! produces connections and supplies the two statement rewrites that differ
//! per engine (row paging, insert-and-fetch-generated-id); a
//! [`Connection`] creates [`Command`]s; executing a command yields a
//! forward-only [`Rows`] cursor. Connections, commands, and cursors are
//! owned by one call path at a time and are never shared across threads.

mod command;
pub use command::{Command, CommandBehavior, CommandKind};

mod connection;
pub use connection::{Connection, TransactionHandle};

mod dialect;
pub use dialect::Dialect;

mod parameter;
pub use parameter::Parameter;

mod rows;
pub use rows::Rows;
