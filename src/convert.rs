use std::error::Error as StdError;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::CoerceError;
use crate::kind::Kind;
use crate::utils::short_type_name;
use crate::value::Value;

/// The scan-destination capability.
///
/// A type implementing `FromValue` can be the target of a database scan:
/// the impl receives the dynamically-typed driver value and either produces
/// a value of the destination type or fails with a [`CoerceError`].
///
/// The impls this crate provides for the primitive types form the
/// value-coercion engine, replicating the reference protocol's conversion
/// rules. A manual impl on a user type is the custom-scan capability: it
/// replaces the structural conversions entirely for that type, and its
/// errors propagate to the caller verbatim.
pub trait FromValue: Sized {
	/// Coerce a driver value into this type.
	fn from_value(src: Value) -> Result<Self, CoerceError>;
}

/// The value-production capability.
///
/// A type implementing `ToValue` can be bound as a database parameter: the
/// impl normalizes the value into one of the driver's primitive wire kinds
/// or fails. The impls for the primitive types form the driver's parameter
/// converter.
pub trait ToValue {
	/// Normalize this value into a driver value.
	fn to_value(&self) -> Result<Value, CoerceError>;
}

// ----------------------------------------
// Scanning: the coercion engine
// ----------------------------------------

/// The string-mediated structural fallback shared by every numeric
/// destination: format the source in its canonical string form, then parse
/// sized to the destination. A failed parse reports the offending string,
/// both kinds involved, and the underlying parse error.
fn parse_via_string<T>(src: Value, kind: Kind) -> Result<T, CoerceError>
where
	T: FromStr,
	T::Err: StdError + Send + Sync + 'static,
{
	if src.is_null() {
		return Err(CoerceError::null_into(kind));
	}
	let s = src.as_string();
	match s.parse::<T>() {
		Ok(v) => Ok(v),
		Err(e) => Err(CoerceError::parse(&src, s, kind, e)),
	}
}

macro_rules! impl_from_value_parsed {
	($($t:ty => $kind:expr),* $(,)?) => {$(
		impl FromValue for $t {
			fn from_value(src: Value) -> Result<Self, CoerceError> {
				parse_via_string(src, $kind)
			}
		}
	)*};
}

// Narrower-than-wire numeric destinations never assign directly: the
// reference protocol routes every width change through the canonical
// string form so that out-of-range sources fail with a parse error
// instead of truncating.
impl_from_value_parsed! {
	i8 => Kind::I8,
	i16 => Kind::I16,
	i32 => Kind::I32,
	isize => Kind::Isize,
	u8 => Kind::U8,
	u16 => Kind::U16,
	u32 => Kind::U32,
	u64 => Kind::U64,
	usize => Kind::Usize,
	f32 => Kind::F32,
}

impl FromValue for i64 {
	fn from_value(src: Value) -> Result<Self, CoerceError> {
		match src {
			Value::Int(v) => Ok(v),
			src => parse_via_string(src, Kind::I64),
		}
	}
}

impl FromValue for f64 {
	fn from_value(src: Value) -> Result<Self, CoerceError> {
		match src {
			Value::Float(v) => Ok(v),
			src => parse_via_string(src, Kind::F64),
		}
	}
}

impl FromValue for bool {
	fn from_value(src: Value) -> Result<Self, CoerceError> {
		src.coerce_bool()
	}
}

impl FromValue for String {
	fn from_value(src: Value) -> Result<Self, CoerceError> {
		match src {
			Value::Text(s) => Ok(s),
			Value::Bytes(b) => Ok(String::from_utf8_lossy(&b).into_owned()),
			Value::Null => Err(CoerceError::null_into(Kind::String)),
			src => Ok(src.as_string()),
		}
	}
}

impl FromValue for Vec<u8> {
	fn from_value(src: Value) -> Result<Self, CoerceError> {
		match src {
			Value::Bytes(b) => Ok(b),
			Value::Null => Err(CoerceError::unsupported(&Value::Null, short_type_name::<Self>())),
			src => Ok(src.as_string().into_bytes()),
		}
	}
}

impl FromValue for DateTime<Utc> {
	fn from_value(src: Value) -> Result<Self, CoerceError> {
		match src {
			Value::Datetime(v) => Ok(v),
			src => Err(CoerceError::unsupported(&src, short_type_name::<Self>())),
		}
	}
}

// The "any"-typed destination: identity, including the no-value signal.
impl FromValue for Value {
	fn from_value(src: Value) -> Result<Self, CoerceError> {
		Ok(src)
	}
}

// The pointer-kind destination: a null source becomes the zero (absent)
// state, anything else allocates a fresh slot and recurses.
impl<T: FromValue> FromValue for Option<T> {
	fn from_value(src: Value) -> Result<Self, CoerceError> {
		match src {
			Value::Null => Ok(None),
			src => T::from_value(src).map(Some),
		}
	}
}

// ----------------------------------------
// Binding: the parameter converter
// ----------------------------------------

impl ToValue for bool {
	fn to_value(&self) -> Result<Value, CoerceError> {
		Ok(Value::Bool(*self))
	}
}

macro_rules! impl_to_value_int {
	($($t:ty),*) => {$(
		impl ToValue for $t {
			fn to_value(&self) -> Result<Value, CoerceError> {
				Ok(Value::Int(*self as i64))
			}
		}
	)*};
}

impl_to_value_int!(i8, i16, i32, i64, isize, u8, u16, u32);

macro_rules! impl_to_value_uint_checked {
	($($t:ty),*) => {$(
		impl ToValue for $t {
			fn to_value(&self) -> Result<Value, CoerceError> {
				if *self as u64 > i64::MAX as u64 {
					return Err(CoerceError::UintOverflow);
				}
				Ok(Value::Int(*self as i64))
			}
		}
	)*};
}

impl_to_value_uint_checked!(u64, usize);

impl ToValue for f32 {
	fn to_value(&self) -> Result<Value, CoerceError> {
		Ok(Value::Float(*self as f64))
	}
}

impl ToValue for f64 {
	fn to_value(&self) -> Result<Value, CoerceError> {
		Ok(Value::Float(*self))
	}
}

impl ToValue for str {
	fn to_value(&self) -> Result<Value, CoerceError> {
		Ok(Value::Text(self.to_string()))
	}
}

impl ToValue for String {
	fn to_value(&self) -> Result<Value, CoerceError> {
		Ok(Value::Text(self.clone()))
	}
}

impl ToValue for [u8] {
	fn to_value(&self) -> Result<Value, CoerceError> {
		Ok(Value::Bytes(self.to_vec()))
	}
}

impl ToValue for Vec<u8> {
	fn to_value(&self) -> Result<Value, CoerceError> {
		Ok(Value::Bytes(self.clone()))
	}
}

impl ToValue for bytes::Bytes {
	fn to_value(&self) -> Result<Value, CoerceError> {
		Ok(Value::Bytes(self.to_vec()))
	}
}

impl ToValue for DateTime<Utc> {
	fn to_value(&self) -> Result<Value, CoerceError> {
		Ok(Value::Datetime(*self))
	}
}

impl ToValue for Value {
	fn to_value(&self) -> Result<Value, CoerceError> {
		Ok(self.clone())
	}
}

// The pointer/interface unwrapping of the reference converter: references
// and boxes delegate to their target, a null reference is the no-value
// signal.
impl<T: ToValue + ?Sized> ToValue for &T {
	fn to_value(&self) -> Result<Value, CoerceError> {
		(**self).to_value()
	}
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
	fn to_value(&self) -> Result<Value, CoerceError> {
		(**self).to_value()
	}
}

impl<T: ToValue> ToValue for Option<T> {
	fn to_value(&self) -> Result<Value, CoerceError> {
		match self {
			Some(v) => v.to_value(),
			None => Ok(Value::Null),
		}
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case::int(Value::Int(1), 1)]
	#[case::int_negative(Value::Int(-1), -1)]
	#[case::float_whole(Value::Float(1.0), 1)]
	#[case::text(Value::Text("123".to_string()), 123)]
	#[case::bytes(Value::Bytes(b"-7".to_vec()), -7)]
	fn test_i64_ok(#[case] src: Value, #[case] expected: i64) {
		assert_eq!(i64::from_value(src).unwrap(), expected);
	}

	#[rstest]
	#[case::float_fraction(
		Value::Float(1.1),
		"converting driver value type f64 (\"1.1\") to a i64: invalid digit found in string"
	)]
	#[case::bool(
		Value::Bool(true),
		"converting driver value type bool (\"true\") to a i64: invalid digit found in string"
	)]
	#[case::text(
		Value::Text("hello".to_string()),
		"converting driver value type string (\"hello\") to a i64: invalid digit found in string"
	)]
	#[case::text_empty(
		Value::Text(String::new()),
		"converting driver value type string (\"\") to a i64: cannot parse integer from empty string"
	)]
	#[case::null(Value::Null, "converting NULL to i64 is unsupported")]
	fn test_i64_err(#[case] src: Value, #[case] expected: &str) {
		assert_eq!(i64::from_value(src).unwrap_err().to_string(), expected);
	}

	#[rstest]
	#[case::in_range(Value::Int(127), 127)]
	#[case::text(Value::Text("-128".to_string()), -128)]
	fn test_i8_ok(#[case] src: Value, #[case] expected: i8) {
		assert_eq!(i8::from_value(src).unwrap(), expected);
	}

	#[test]
	fn test_i8_out_of_range() {
		assert_eq!(
			i8::from_value(Value::Int(300)).unwrap_err().to_string(),
			"converting driver value type i64 (\"300\") to a i8: number too large to fit in target type"
		);
	}

	#[test]
	fn test_u64_rejects_negative() {
		assert_eq!(
			u64::from_value(Value::Int(-1)).unwrap_err().to_string(),
			"converting driver value type i64 (\"-1\") to a u64: invalid digit found in string"
		);
	}

	#[rstest]
	#[case::float(Value::Float(1.1), 1.1)]
	#[case::int(Value::Int(1), 1.0)]
	#[case::text(Value::Text("2.5".to_string()), 2.5)]
	fn test_f64_ok(#[case] src: Value, #[case] expected: f64) {
		assert_eq!(f64::from_value(src).unwrap(), expected);
	}

	#[test]
	fn test_f64_err_unwraps_parse_reason() {
		assert_eq!(
			f64::from_value(Value::Bool(true)).unwrap_err().to_string(),
			"converting driver value type bool (\"true\") to a f64: invalid float literal"
		);
	}

	#[rstest]
	#[case::text(Value::Text("hello".to_string()), "hello")]
	#[case::bytes(Value::Bytes(b"hello".to_vec()), "hello")]
	#[case::int(Value::Int(1), "1")]
	#[case::float(Value::Float(1.1), "1.1")]
	#[case::bool(Value::Bool(false), "false")]
	fn test_string_ok(#[case] src: Value, #[case] expected: &str) {
		assert_eq!(String::from_value(src).unwrap(), expected);
	}

	#[test]
	fn test_string_from_null() {
		assert_eq!(
			String::from_value(Value::Null).unwrap_err().to_string(),
			"converting NULL to string is unsupported"
		);
	}

	#[rstest]
	#[case::bytes(Value::Bytes(b"raw".to_vec()), b"raw".to_vec())]
	#[case::text(Value::Text("text".to_string()), b"text".to_vec())]
	#[case::int(Value::Int(42), b"42".to_vec())]
	#[case::bool(Value::Bool(true), b"true".to_vec())]
	fn test_bytes_ok(#[case] src: Value, #[case] expected: Vec<u8>) {
		assert_eq!(Vec::<u8>::from_value(src).unwrap(), expected);
	}

	#[test]
	fn test_datetime_only_from_datetime() {
		let dt = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
		assert_eq!(DateTime::<Utc>::from_value(Value::Datetime(dt)).unwrap(), dt);
		assert_eq!(
			DateTime::<Utc>::from_value(Value::Text("1970-01-01T00:00:00Z".to_string()))
				.unwrap_err()
				.to_string(),
			"unsupported scan, storing driver value type string into type DateTime<Utc>"
		);
	}

	#[test]
	fn test_any_destination_is_identity() {
		assert_eq!(Value::from_value(Value::Null).unwrap(), Value::Null);
		assert_eq!(
			Value::from_value(Value::Bytes(b"x".to_vec())).unwrap(),
			Value::Bytes(b"x".to_vec())
		);
	}

	#[test]
	fn test_option_destination() {
		assert_eq!(Option::<i64>::from_value(Value::Null).unwrap(), None);
		assert_eq!(Option::<i64>::from_value(Value::Int(3)).unwrap(), Some(3));
		assert!(Option::<i64>::from_value(Value::Text("x".to_string())).is_err());
	}

	#[test]
	fn test_to_value_primitives() {
		assert_eq!(7_i32.to_value().unwrap(), Value::Int(7));
		assert_eq!(true.to_value().unwrap(), Value::Bool(true));
		assert_eq!("s".to_value().unwrap(), Value::Text("s".to_string()));
		assert_eq!(1.5_f64.to_value().unwrap(), Value::Float(1.5));
		assert_eq!(vec![1_u8].to_value().unwrap(), Value::Bytes(vec![1]));
	}

	#[test]
	fn test_to_value_u64_high_bit() {
		assert_eq!(u64::MAX.to_value().unwrap_err().to_string(),
			"u64 values with high bit set are not supported");
		assert_eq!((i64::MAX as u64).to_value().unwrap(), Value::Int(i64::MAX));
	}

	#[test]
	fn test_to_value_unwraps_references() {
		let v = 9_i64;
		assert_eq!((&v).to_value().unwrap(), Value::Int(9));
		assert_eq!(Box::new(v).to_value().unwrap(), Value::Int(9));
		assert_eq!(None::<i64>.to_value().unwrap(), Value::Null);
		assert_eq!(Some(9_i64).to_value().unwrap(), Value::Int(9));
	}
}
