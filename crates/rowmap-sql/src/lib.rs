//! The SQL-text subsystem: parameter token scanning, binding-set
//! construction, statement rewrites, and command assembly.
//!
//! Everything here operates on free-form SQL text. Parameter placeholders
//! are `@name` tokens; `@@name` tokens are literal-substitution tokens
//! whose resolved value is inlined into the text instead of being bound.

mod assemble;
pub use assemble::{assemble, AssembledCommand};

mod bind;
pub use bind::{bind, BindArg, BindMode};

mod rewrite;
pub use rewrite::{count_query, substitute_literals, validate_query_type};

mod token;
pub use token::{scan, ParamToken, TokenKind, TokenScan};
