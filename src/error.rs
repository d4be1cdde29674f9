use std::error::Error as StdError;

use thiserror::Error;

use crate::kind::Kind;
use crate::value::Value;

/// An error produced while coercing a driver value into a destination type,
/// or while normalizing a value for parameter binding.
///
/// Message texts follow the reference coercion protocol so that scanning
/// through an [`Optional`](crate::Optional) is indistinguishable, error for
/// error, from scanning through the protocol's own nullable types.
#[derive(Debug, Error)]
pub enum CoerceError {
	/// A NULL source reached a destination that cannot represent absence.
	#[error("converting NULL to {kind} is unsupported")]
	NullInto {
		/// The destination kind.
		kind: Kind,
	},

	/// A string-mediated numeric conversion failed to parse.
	///
	/// `reason` is the underlying parse failure, embedded directly so the
	/// rendered message ends with the parse-failure reason itself.
	#[error("converting driver value type {src} ({text:?}) to a {kind}: {reason}")]
	Parse {
		/// The source value's kind.
		src: Kind,
		/// The canonical string form that failed to parse.
		text: String,
		/// The destination kind.
		kind: Kind,
		/// The underlying parse failure.
		reason: Box<dyn StdError + Send + Sync>,
	},

	/// The driver's boolean normalization rejected the source value.
	#[error("couldn't convert {value} into type bool")]
	Bool {
		/// Rendering of the rejected value.
		value: String,
	},

	/// No conversion exists between the source and destination types.
	#[error("unsupported scan, storing driver value type {src} into type {dest}")]
	Unsupported {
		/// The source value's kind.
		src: Kind,
		/// The destination type name.
		dest: String,
	},

	/// An unsigned 64-bit value too large for the driver's integer kind.
	#[error("u64 values with high bit set are not supported")]
	UintOverflow,

	/// A failure reported by a custom scan or value-production capability,
	/// carried verbatim.
	#[error("{0}")]
	Custom(Box<dyn StdError + Send + Sync>),
}

impl CoerceError {
	/// A NULL source reaching a non-nullable destination kind.
	pub fn null_into(kind: Kind) -> Self {
		Self::NullInto {
			kind,
		}
	}

	/// A failed string-mediated numeric parse.
	pub fn parse(
		src: &Value,
		text: impl Into<String>,
		kind: Kind,
		reason: impl StdError + Send + Sync + 'static,
	) -> Self {
		Self::Parse {
			src: src.kind(),
			text: text.into(),
			kind,
			reason: Box::new(reason),
		}
	}

	/// A source value the boolean normalization cannot represent.
	pub fn bool(value: impl Into<String>) -> Self {
		Self::Bool {
			value: value.into(),
		}
	}

	/// A source/destination pair with no defined conversion.
	pub fn unsupported(src: &Value, dest: impl Into<String>) -> Self {
		Self::Unsupported {
			src: src.kind(),
			dest: dest.into(),
		}
	}

	/// Wrap a custom capability failure without altering its message.
	pub fn custom(err: impl StdError + Send + Sync + 'static) -> Self {
		Self::Custom(Box::new(err))
	}
}
