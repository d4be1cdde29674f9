use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::CoerceError;
use crate::kind::Kind;

/// A dynamically-typed driver value.
///
/// This is the closed set of primitive wire-level kinds a database driver
/// exchanges with the application: every parameter bound outbound is
/// normalized into one of these, and every scanned column arrives as one.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
	/// The no-value signal.
	#[default]
	Null,
	/// A boolean value.
	Bool(bool),
	/// A 64-bit signed integer value.
	Int(i64),
	/// A 64-bit floating point value.
	Float(f64),
	/// A text value.
	Text(String),
	/// A raw byte sequence.
	Bytes(Vec<u8>),
	/// A timestamp value.
	Datetime(DateTime<Utc>),
}

impl Value {
	/// Check if this value is the no-value signal.
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// The structural kind of this value.
	pub fn kind(&self) -> Kind {
		match self {
			Value::Null => Kind::Null,
			Value::Bool(_) => Kind::Bool,
			Value::Int(_) => Kind::I64,
			Value::Float(_) => Kind::F64,
			Value::Text(_) => Kind::String,
			Value::Bytes(_) => Kind::Bytes,
			Value::Datetime(_) => Kind::Datetime,
		}
	}

	/// The canonical string form of this value.
	///
	/// This is the intermediate representation used by the coercion
	/// engine's string-mediated conversions: scalars render in their
	/// shortest decimal / literal form, timestamps in round-trippable
	/// RFC 3339 with `Z` and automatic sub-second precision.
	pub fn as_string(&self) -> String {
		match self {
			Value::Null => "NULL".to_string(),
			Value::Bool(v) => v.to_string(),
			Value::Int(v) => v.to_string(),
			Value::Float(v) => v.to_string(),
			Value::Text(v) => v.clone(),
			Value::Bytes(v) => String::from_utf8_lossy(v).into_owned(),
			Value::Datetime(v) => v.to_rfc3339_opts(SecondsFormat::AutoSi, true),
		}
	}

	/// The driver's boolean normalization.
	///
	/// Booleans pass through; text and bytes must spell one of the strict
	/// boolean literals; integers must be exactly `0` or `1`. Everything
	/// else is rejected.
	pub fn coerce_bool(&self) -> Result<bool, CoerceError> {
		match self {
			Value::Bool(v) => Ok(*v),
			Value::Text(s) => match parse_bool_literal(s) {
				Some(v) => Ok(v),
				None => Err(CoerceError::bool(format!("{s:?}"))),
			},
			Value::Bytes(b) => {
				let s = String::from_utf8_lossy(b);
				match parse_bool_literal(&s) {
					Some(v) => Ok(v),
					None => Err(CoerceError::bool(format!("{s:?}"))),
				}
			}
			Value::Int(v) if *v == 0 || *v == 1 => Ok(*v == 1),
			Value::Int(v) => Err(CoerceError::bool(v.to_string())),
			other => Err(CoerceError::bool(format!("{} ({})", other, other.kind()))),
		}
	}
}

/// The strict boolean literal set accepted by [`Value::coerce_bool`].
fn parse_bool_literal(s: &str) -> Option<bool> {
	match s {
		"1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
		"0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
		_ => None,
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Value::Null => f.write_str("NULL"),
			Value::Bool(v) => write!(f, "{v}"),
			Value::Int(v) => write!(f, "{v}"),
			Value::Float(v) => write!(f, "{v}"),
			Value::Text(v) => write!(f, "{v:?}"),
			Value::Bytes(v) => write!(f, "b\"{}\"", hex::encode_upper(v)),
			Value::Datetime(v) => {
				write!(f, "d{:?}", v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
			}
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

macro_rules! impl_value_from_int {
	($($t:ty),*) => {$(
		impl From<$t> for Value {
			fn from(v: $t) -> Self {
				Value::Int(v as i64)
			}
		}
	)*};
}

impl_value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
	fn from(v: f32) -> Self {
		Value::Float(v as f64)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Text(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Text(v)
	}
}

impl From<Vec<u8>> for Value {
	fn from(v: Vec<u8>) -> Self {
		Value::Bytes(v)
	}
}

impl From<&[u8]> for Value {
	fn from(v: &[u8]) -> Self {
		Value::Bytes(v.to_vec())
	}
}

impl From<bytes::Bytes> for Value {
	fn from(v: bytes::Bytes) -> Self {
		Value::Bytes(v.into())
	}
}

impl From<DateTime<Utc>> for Value {
	fn from(v: DateTime<Utc>) -> Self {
		Value::Datetime(v)
	}
}

impl<T> From<Option<T>> for Value
where
	Value: From<T>,
{
	fn from(v: Option<T>) -> Self {
		match v {
			Some(v) => Value::from(v),
			None => Value::Null,
		}
	}
}
