//! Session holder for the portal client.
//!
//! Owns the single bearer token: hydrates it from durable storage at
//! startup, persists it on login, and removes it on logout. Exactly one
//! session is live per client instance; callers receive an explicit
//! [`SessionContext`] rather than reading token state from globals.

use portal_storage::{StorageError, StorageService};
use portal_types::{SecretString, SessionContext};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Storage namespace holding session state.
const SESSION_NAMESPACE: &str = "session";
/// Storage id of the persisted token entry.
const TOKEN_ID: &str = "token";

/// Persisted form of the token.
///
/// `SecretString` redacts itself when serialized, so persistence goes
/// through this struct with an explicitly exposed value.
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
	token: String,
}

/// Service owning the bearer token lifecycle.
///
/// Mirror-write failures are logged and swallowed: the in-memory session
/// still works for the current run, it just will not survive a restart.
pub struct SessionService {
	storage: Arc<StorageService>,
}

impl SessionService {
	/// Creates a session holder over the given storage.
	pub fn new(storage: Arc<StorageService>) -> Self {
		Self { storage }
	}

	/// Reads a previously persisted token, if any.
	///
	/// Called once at startup; a `Some` result means the user is still
	/// logged in from a prior run and the order collection should be
	/// loaded immediately.
	pub async fn hydrate(&self) -> Option<SessionContext> {
		match self
			.storage
			.retrieve::<StoredToken>(SESSION_NAMESPACE, TOKEN_ID)
			.await
		{
			Ok(stored) => Some(SessionContext::new(SecretString::new(stored.token))),
			Err(StorageError::NotFound) => None,
			Err(err) => {
				tracing::warn!("failed to read persisted session: {}", err);
				None
			}
		}
	}

	/// Persists the token and returns the context for subsequent requests.
	///
	/// The caller follows a successful `set` with a store load so the
	/// order collection reflects the new session.
	pub async fn set(&self, token: SecretString) -> SessionContext {
		let stored = StoredToken {
			token: token.expose_secret().to_string(),
		};
		if let Err(err) = self.storage.store(SESSION_NAMESPACE, TOKEN_ID, &stored).await {
			tracing::warn!("failed to persist session token: {}", err);
		}
		SessionContext::new(token)
	}

	/// Removes the persisted token.
	///
	/// Logout invalidates the cached client view only; the backend is not
	/// asked to revoke the token itself. The caller clears the order
	/// collection.
	pub async fn clear(&self) {
		if let Err(err) = self.storage.remove(SESSION_NAMESPACE, TOKEN_ID).await {
			tracing::warn!("failed to clear persisted session token: {}", err);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use portal_storage::implementations::memory::MemoryStorage;

	fn service() -> SessionService {
		SessionService::new(Arc::new(StorageService::new(Box::new(MemoryStorage::new()))))
	}

	#[tokio::test]
	async fn test_hydrate_without_persisted_token() {
		assert!(service().hydrate().await.is_none());
	}

	#[tokio::test]
	async fn test_set_then_hydrate_restores_token() {
		let service = service();

		let context = service.set(SecretString::from("tok-1")).await;
		assert_eq!(context.bearer_token().expose_secret(), "tok-1");

		let restored = service.hydrate().await.unwrap();
		assert_eq!(restored.bearer_token().expose_secret(), "tok-1");
	}

	#[tokio::test]
	async fn test_clear_removes_persisted_token() {
		let service = service();

		service.set(SecretString::from("tok-1")).await;
		service.clear().await;

		assert!(service.hydrate().await.is_none());
	}

	#[tokio::test]
	async fn test_set_overwrites_previous_token() {
		let service = service();

		service.set(SecretString::from("tok-old")).await;
		service.set(SecretString::from("tok-new")).await;

		let restored = service.hydrate().await.unwrap();
		assert_eq!(restored.bearer_token().expose_secret(), "tok-new");
	}
}
