//! Session context passed to backend-facing operations.

use crate::SecretString;

/// Authorization context for one authenticated session.
///
/// Store and API operations receive this explicitly instead of reading
/// token state from ambient globals. Construction happens on login or
/// startup hydration, teardown on logout; both are owned by the session
/// holder.
#[derive(Debug, Clone)]
pub struct SessionContext {
	token: SecretString,
}

impl SessionContext {
	/// Builds a context around a bearer token.
	pub fn new(token: SecretString) -> Self {
		Self { token }
	}

	/// The bearer token used for the `Authorization` header.
	pub fn bearer_token(&self) -> &SecretString {
		&self.token
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_context_exposes_token_for_headers() {
		let context = SessionContext::new(SecretString::from("tok-9"));
		assert_eq!(context.bearer_token().expose_secret(), "tok-9");
	}

	#[test]
	fn test_context_debug_redacts_token() {
		let context = SessionContext::new(SecretString::from("tok-9"));
		assert!(!format!("{:?}", context).contains("tok-9"));
	}
}
