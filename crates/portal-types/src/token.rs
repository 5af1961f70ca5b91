//! Secure wrapper for the session bearer token.
//!
//! `SecretString` keeps the token out of logs and debug output and zeroes
//! the backing memory when dropped.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

/// An opaque credential proving the current user's identity to the backend.
///
/// The value never appears in `Debug` or `Display` output and is redacted
/// when serialized. Code that genuinely needs the raw token, such as the
/// `Authorization` header builder or the persistence layer, calls
/// [`SecretString::expose_secret`].
#[derive(Clone)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
	/// Wraps a token value.
	pub fn new(s: String) -> Self {
		Self(Zeroizing::new(s))
	}

	/// Exposes the raw token.
	pub fn expose_secret(&self) -> &str {
		&self.0
	}

	/// Returns true if the wrapped value is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SecretString(***REDACTED***)")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "***REDACTED***")
	}
}

impl From<String> for SecretString {
	fn from(s: String) -> Self {
		Self::new(s)
	}
}

impl From<&str> for SecretString {
	fn from(s: &str) -> Self {
		Self::new(s.to_string())
	}
}

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		self.0.as_str() == other.0.as_str()
	}
}

impl Eq for SecretString {}

// Serialization always redacts; persistence goes through expose_secret
// explicitly so a token can never leak through a stray to_string.
impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("***REDACTED***")
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		Ok(SecretString::new(s))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_debug_and_display_redact() {
		let token = SecretString::from("tok-12345");

		assert_eq!(format!("{:?}", token), "SecretString(***REDACTED***)");
		assert_eq!(format!("{}", token), "***REDACTED***");
	}

	#[test]
	fn test_expose_secret() {
		let token = SecretString::from("tok-12345");
		assert_eq!(token.expose_secret(), "tok-12345");
		assert!(!token.is_empty());
	}

	#[test]
	fn test_deserialize_reads_value_serialize_redacts() {
		let token: SecretString = serde_json::from_str("\"tok-abc\"").unwrap();
		assert_eq!(token.expose_secret(), "tok-abc");

		let encoded = serde_json::to_string(&token).unwrap();
		assert!(!encoded.contains("tok-abc"));
	}

	#[test]
	fn test_eq() {
		assert_eq!(SecretString::from("a"), SecretString::from("a"));
		assert_ne!(SecretString::from("a"), SecretString::from("b"));
	}
}
