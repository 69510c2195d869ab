pub mod driver;
pub use driver::Connection;

mod error;
pub use error::Error;

pub mod param;
pub use param::{ParameterSet, QueryParameter};

pub mod value;
pub use value::Value;

/// A Result type alias that uses rowmap's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
