use std::fmt::{self, Display, Formatter};

/// The structural kind of a driver value or of a scan destination.
///
/// Kinds name the shape of data travelling through the coercion engine and
/// appear verbatim in coercion error messages, which is why destination
/// kinds carry their bit width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
	/// The no-value signal.
	Null,
	/// Boolean kind.
	Bool,
	/// 8-bit signed integer kind.
	I8,
	/// 16-bit signed integer kind.
	I16,
	/// 32-bit signed integer kind.
	I32,
	/// 64-bit signed integer kind.
	I64,
	/// Pointer-sized signed integer kind.
	Isize,
	/// 8-bit unsigned integer kind.
	U8,
	/// 16-bit unsigned integer kind.
	U16,
	/// 32-bit unsigned integer kind.
	U32,
	/// 64-bit unsigned integer kind.
	U64,
	/// Pointer-sized unsigned integer kind.
	Usize,
	/// 32-bit floating point kind.
	F32,
	/// 64-bit floating point kind.
	F64,
	/// Text kind.
	String,
	/// Raw byte sequence kind.
	Bytes,
	/// Timestamp kind.
	Datetime,
	/// The most generic kind, can hold any driver value.
	Any,
}

impl Display for Kind {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Kind::Null => f.write_str("null"),
			Kind::Bool => f.write_str("bool"),
			Kind::I8 => f.write_str("i8"),
			Kind::I16 => f.write_str("i16"),
			Kind::I32 => f.write_str("i32"),
			Kind::I64 => f.write_str("i64"),
			Kind::Isize => f.write_str("isize"),
			Kind::U8 => f.write_str("u8"),
			Kind::U16 => f.write_str("u16"),
			Kind::U32 => f.write_str("u32"),
			Kind::U64 => f.write_str("u64"),
			Kind::Usize => f.write_str("usize"),
			Kind::F32 => f.write_str("f32"),
			Kind::F64 => f.write_str("f64"),
			Kind::String => f.write_str("string"),
			Kind::Bytes => f.write_str("bytes"),
			Kind::Datetime => f.write_str("datetime"),
			Kind::Any => f.write_str("any"),
		}
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case::null(Kind::Null, "null")]
	#[case::bool(Kind::Bool, "bool")]
	#[case::i64(Kind::I64, "i64")]
	#[case::u32(Kind::U32, "u32")]
	#[case::f64(Kind::F64, "f64")]
	#[case::string(Kind::String, "string")]
	#[case::bytes(Kind::Bytes, "bytes")]
	#[case::datetime(Kind::Datetime, "datetime")]
	fn test_kind_display(#[case] kind: Kind, #[case] expected: &str) {
		assert_eq!(kind.to_string(), expected);
	}
}
