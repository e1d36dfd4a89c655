pub mod driver;
pub use driver::{Capability, Connection, Driver};

mod error;
pub use error::{Error, IntoError};

mod value;
pub use value::Value;

/// A Result type alias that uses inspectdb's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
