//! Error types and result extensions for pagewarm operations

mod builders;
mod conversions;
mod display;
mod kind;
mod types;

pub use kind::ErrorKind;
pub use types::{Error, Result};
