//! Durable local storage for the portal client.
//!
//! The client mirrors its session token to a small key-value store so a
//! session survives restarts. This module provides the storage abstraction
//! and a typed wrapper; backends are selected by name from configuration.

use async_trait::async_trait;
use portal_types::ConfigSchema;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod file;
	pub mod memory;
}

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
	/// Error that occurs when a requested entry is not found.
	#[error("Not found")]
	NotFound,
	/// Error that occurs during serialization/deserialization.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs in the storage backend.
	#[error("Backend error: {0}")]
	Backend(String),
	/// Error that occurs during configuration validation.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the low-level interface for storage backends.
///
/// Entries live until deleted; there is no expiration. The persisted
/// session token in particular stays put until an explicit logout.
#[async_trait]
pub trait StorageInterface: Send + Sync {
	/// Retrieves raw bytes for the given key.
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError>;

	/// Stores raw bytes under the given key, overwriting any prior value.
	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

	/// Deletes the value associated with the given key.
	async fn delete(&self, key: &str) -> Result<(), StorageError>;

	/// Checks if a key exists in storage.
	async fn exists(&self, key: &str) -> Result<bool, StorageError>;

	/// Returns the configuration schema for validation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;
}

/// Type alias for storage factory functions.
///
/// Every backend provides one of these so the binary can build the
/// configured implementation from its TOML section.
pub type StorageFactory = fn(&toml::Value) -> Result<Box<dyn StorageInterface>, StorageError>;

/// High-level storage service that provides typed operations.
///
/// Wraps a byte-level backend with JSON serialization; keys are formed
/// from a namespace and an id.
pub struct StorageService {
	/// The underlying storage backend implementation.
	backend: Box<dyn StorageInterface>,
}

impl StorageService {
	/// Creates a new StorageService with the specified backend.
	pub fn new(backend: Box<dyn StorageInterface>) -> Self {
		Self { backend }
	}

	/// Stores a serializable value under `namespace:id`.
	pub async fn store<T: Serialize>(
		&self,
		namespace: &str,
		id: &str,
		data: &T,
	) -> Result<(), StorageError> {
		let key = format!("{}:{}", namespace, id);
		let bytes =
			serde_json::to_vec(data).map_err(|e| StorageError::Serialization(e.to_string()))?;
		self.backend.set_bytes(&key, bytes).await
	}

	/// Retrieves and deserializes a value from storage.
	pub async fn retrieve<T: DeserializeOwned>(
		&self,
		namespace: &str,
		id: &str,
	) -> Result<T, StorageError> {
		let key = format!("{}:{}", namespace, id);
		let bytes = self.backend.get_bytes(&key).await?;
		serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
	}

	/// Removes a value from storage.
	pub async fn remove(&self, namespace: &str, id: &str) -> Result<(), StorageError> {
		let key = format!("{}:{}", namespace, id);
		self.backend.delete(&key).await
	}

	/// Checks if a value exists in storage.
	pub async fn exists(&self, namespace: &str, id: &str) -> Result<bool, StorageError> {
		let key = format!("{}:{}", namespace, id);
		self.backend.exists(&key).await
	}
}

#[cfg(test)]
mod tests {
	use super::implementations::memory::MemoryStorage;
	use super::*;
	use serde::Deserialize;

	#[derive(Debug, PartialEq, Serialize, Deserialize)]
	struct Entry {
		value: String,
	}

	#[tokio::test]
	async fn test_typed_roundtrip() {
		let service = StorageService::new(Box::new(MemoryStorage::new()));
		let entry = Entry {
			value: "tok-1".to_string(),
		};

		service.store("session", "token", &entry).await.unwrap();
		let loaded: Entry = service.retrieve("session", "token").await.unwrap();
		assert_eq!(loaded, entry);
	}

	#[tokio::test]
	async fn test_remove_then_retrieve_is_not_found() {
		let service = StorageService::new(Box::new(MemoryStorage::new()));
		let entry = Entry {
			value: "tok-1".to_string(),
		};

		service.store("session", "token", &entry).await.unwrap();
		service.remove("session", "token").await.unwrap();

		let result: Result<Entry, _> = service.retrieve("session", "token").await;
		assert!(matches!(result, Err(StorageError::NotFound)));
		assert!(!service.exists("session", "token").await.unwrap());
	}

	#[tokio::test]
	async fn test_namespaces_do_not_collide() {
		let service = StorageService::new(Box::new(MemoryStorage::new()));
		let a = Entry {
			value: "a".to_string(),
		};
		let b = Entry {
			value: "b".to_string(),
		};

		service.store("session", "token", &a).await.unwrap();
		service.store("profile", "token", &b).await.unwrap();

		let loaded: Entry = service.retrieve("session", "token").await.unwrap();
		assert_eq!(loaded, a);
	}
}
