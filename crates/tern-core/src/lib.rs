#[macro_use]
mod macros;

mod error;
pub use error::Error;

pub mod expr;
pub use expr::Expr;

pub mod provider;
pub use provider::Provider;

pub mod schema;

/// A Result type alias that uses Tern's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
