//! Type-name helpers for diagnostics.

/// The name of `T` with module paths stripped from every segment.
///
/// `std::any::type_name` spells fully-qualified paths
/// (`alloc::boxed::Box<dyn optval::convert::ToValue>`); error messages and
/// debug renderings want the short spelling (`Box<dyn ToValue>`). Generics,
/// `dyn`, references and punctuation are preserved.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
	shorten(std::any::type_name::<T>())
}

/// Whether `T` is a trait object type (its name contains a `dyn` path).
///
/// Trait object values cannot reveal their static type parameter through
/// their own rendering, so debug output must spell it explicitly.
pub(crate) fn is_trait_object<T: ?Sized>() -> bool {
	std::any::type_name::<T>().contains("dyn ")
}

fn shorten(name: &str) -> String {
	let mut out = String::with_capacity(name.len());
	let mut segment = String::new();
	for c in name.chars() {
		if c.is_alphanumeric() || c == '_' || c == ':' {
			segment.push(c);
		} else {
			flush(&mut out, &mut segment);
			out.push(c);
		}
	}
	flush(&mut out, &mut segment);
	out
}

// Drops every `path::` prefix from one accumulated path segment.
fn flush(out: &mut String, segment: &mut String) {
	if !segment.is_empty() {
		out.push_str(segment.rsplit("::").next().unwrap_or(segment));
		segment.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	trait Marker {}

	#[test]
	fn test_short_type_name_primitives() {
		assert_eq!(short_type_name::<i64>(), "i64");
		assert_eq!(short_type_name::<String>(), "String");
	}

	#[test]
	fn test_short_type_name_generics() {
		assert_eq!(short_type_name::<Vec<u8>>(), "Vec<u8>");
		assert_eq!(short_type_name::<Option<Vec<String>>>(), "Option<Vec<String>>");
	}

	#[test]
	fn test_short_type_name_trait_object() {
		assert_eq!(short_type_name::<Box<dyn Marker>>(), "Box<dyn Marker>");
		assert!(is_trait_object::<Box<dyn Marker>>());
		assert!(!is_trait_object::<Vec<u8>>());
	}
}
