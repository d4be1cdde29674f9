#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

mod convert;
mod error;
mod kind;
mod optional;
mod utils;
mod value;
mod zero;

pub use convert::{FromValue, ToValue};
pub use error::CoerceError;
pub use kind::Kind;
pub use optional::Optional;
pub use value::Value;
pub use zero::IsZero;
