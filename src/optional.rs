use std::fmt::{self, Display, Formatter};
use std::marker::PhantomData;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::convert::{FromValue, ToValue};
use crate::error::CoerceError;
use crate::utils::{is_trait_object, short_type_name};
use crate::value::Value;
use crate::zero::IsZero;

/// A generic optional value.
///
/// `Optional<T>` holds a value of `T` and a presence flag, and participates
/// in database parameter binding and scanning, JSON marshalling, and XML
/// marshalling so that its wire behaviour is indistinguishable from the
/// nullable approach those protocols already support (`Option<T>`, SQL
/// `NULL`, an absent element).
///
/// Presence and zero-ness are orthogonal: a present container may hold the
/// zero value of `T`, and an absent container always holds exactly the zero
/// value (`T::default()`), never a stale one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Optional<T> {
	value: T,
	present: bool,
}

impl<T: Default> Optional<T> {
	/// Create a new absent `Optional<T>` holding the zero value of `T`.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create an `Optional<T>` from a nullable reference: absent if the
	/// reference is `None`, otherwise present with a copy of the referenced
	/// value. The container never aliases the caller's reference.
	pub fn from_ref(r: Option<&T>) -> Self
	where
		T: Clone,
	{
		match r {
			Some(v) => Self::from(v.clone()),
			None => Self::new(),
		}
	}

	/// Create an `Optional<T>` from an `Option<T>`: absent for `None`,
	/// present for `Some` — even when the wrapped value is zero.
	pub fn from_option(o: Option<T>) -> Self {
		match o {
			Some(v) => Self::from(v),
			None => Self::new(),
		}
	}

	/// Reset to absent, then scan a driver value into the container.
	///
	/// The no-value signal leaves the container absent and succeeds. Any
	/// other source marks the container present and delegates to the
	/// value-coercion engine; on failure the error propagates verbatim and
	/// the container stays present holding the zero value.
	pub fn scan(&mut self, src: Value) -> Result<(), CoerceError>
	where
		T: FromValue,
	{
		*self = Self::new();
		if src.is_null() {
			return Ok(());
		}
		self.present = true;
		self.value = T::from_value(src)?;
		Ok(())
	}
}

impl<T> Optional<T> {
	/// Check if the container is absent.
	pub fn is_absent(&self) -> bool {
		!self.present
	}

	/// Check if the container is present.
	pub fn is_present(&self) -> bool {
		self.present
	}

	/// Check if the container is absent, or present with a structurally
	/// zero value.
	pub fn is_absent_or_zero(&self) -> bool
	where
		T: IsZero,
	{
		!self.present || self.value.is_zero()
	}

	/// A reference to the held value: `Some` when present, `None` when
	/// absent.
	pub fn get(&self) -> Option<&T> {
		match self.present {
			true => Some(&self.value),
			false => None,
		}
	}

	/// A reference to the held value slot; the zero value when absent.
	pub fn value(&self) -> &T {
		&self.value
	}

	/// Convert into an `Option<T>`, consuming the container.
	pub fn into_option(self) -> Option<T> {
		match self.present {
			true => Some(self.value),
			false => None,
		}
	}

	/// A fresh copy of the held value as an `Option<T>`. Mutating the
	/// returned value never affects the container.
	pub fn to_option(&self) -> Option<T>
	where
		T: Clone,
	{
		match self.present {
			true => Some(self.value.clone()),
			false => None,
		}
	}
}

impl<T> From<T> for Optional<T> {
	/// Create a present `Optional<T>`, even when `v` is the zero value.
	fn from(v: T) -> Self {
		Self {
			value: v,
			present: true,
		}
	}
}

impl<T: Default> Default for Optional<T> {
	fn default() -> Self {
		Self {
			value: T::default(),
			present: false,
		}
	}
}

impl<T: Display> Display for Optional<T> {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self.present {
			true => Display::fmt(&self.value, f),
			false => f.write_str("null"),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for Optional<T> {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		if !self.present {
			return write!(f, "Optional::<{}>::new()", short_type_name::<T>());
		}
		// Trait-object payloads cannot reveal the type parameter through
		// their own rendering, so it is spelled out explicitly.
		if is_trait_object::<T>() {
			write!(f, "Optional::<{}>::from({:?})", short_type_name::<T>(), self.value)
		} else {
			write!(f, "Optional::from({:?})", self.value)
		}
	}
}

impl<T: IsZero> IsZero for Optional<T> {
	fn is_zero(&self) -> bool {
		!self.present && self.value.is_zero()
	}
}

impl<T: ToValue> ToValue for Optional<T> {
	fn to_value(&self) -> Result<Value, CoerceError> {
		match self.present {
			true => self.value.to_value(),
			false => Ok(Value::Null),
		}
	}
}

impl<T: FromValue + Default> FromValue for Optional<T> {
	fn from_value(src: Value) -> Result<Self, CoerceError> {
		let mut opt = Self::new();
		opt.scan(src)?;
		Ok(opt)
	}
}

impl<T: Serialize> Serialize for Optional<T> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self.present {
			true => serializer.serialize_some(&self.value),
			false => serializer.serialize_none(),
		}
	}
}

impl<'de, T> Deserialize<'de> for Optional<T>
where
	T: Deserialize<'de> + Default,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct OptionalVisitor<T>(PhantomData<T>);

		impl<'de, T> Visitor<'de> for OptionalVisitor<T>
		where
			T: Deserialize<'de> + Default,
		{
			type Value = Optional<T>;

			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				formatter.write_str("optional value")
			}

			fn visit_unit<E>(self) -> Result<Self::Value, E>
			where
				E: de::Error,
			{
				Ok(Optional::new())
			}

			fn visit_none<E>(self) -> Result<Self::Value, E>
			where
				E: de::Error,
			{
				Ok(Optional::new())
			}

			fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
			where
				D: Deserializer<'de>,
			{
				T::deserialize(deserializer).map(Optional::from)
			}
		}

		deserializer.deserialize_option(OptionalVisitor(PhantomData))
	}
}
