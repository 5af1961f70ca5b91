//! Backend HTTP contract for the Order Portal.
//!
//! The contract lives behind traits so the store can be exercised against
//! in-process fakes; the reqwest-backed implementation is the only one
//! used in production.

use async_trait::async_trait;
use portal_types::{CreateOrderRequest, Credentials, Order, Priority, SecretString, SessionContext};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod http;
}

/// Errors that can occur while talking to the backend.
///
/// Transport and decode problems are distinct variants here; callers that
/// follow the portal's failure policy collapse them into one logged,
/// swallowed outcome.
#[derive(Debug, Error)]
pub enum BackendError {
	/// The request never produced a response.
	#[error("Network error: {0}")]
	Network(String),
	/// The backend answered with a non-success status.
	#[error("Unexpected status: {status}")]
	Status { status: u16 },
	/// The response body could not be decoded.
	#[error("Decode error: {0}")]
	Decode(String),
}

/// Trait defining the order endpoints of the backend.
///
/// Every call carries the bearer token of the given session. Each method
/// performs exactly one network exchange; there are no retries and no
/// client-side timeout beyond the transport default.
#[async_trait]
pub trait OrderApi: Send + Sync {
	/// Fetches the full order collection for the session.
	///
	/// Both known response shapes (bare array and wrapped object) are
	/// normalized to a plain sequence before returning.
	async fn fetch_orders(&self, session: &SessionContext) -> Result<Vec<Order>, BackendError>;

	/// Creates an order and returns it with the backend-assigned id.
	async fn create_order(
		&self,
		session: &SessionContext,
		request: CreateOrderRequest,
	) -> Result<Order, BackendError>;

	/// Deletes the order with the given id. The response body is ignored.
	async fn delete_order(&self, session: &SessionContext, id: &str)
		-> Result<(), BackendError>;

	/// Updates only the priority of the order with the given id.
	async fn update_priority(
		&self,
		session: &SessionContext,
		id: &str,
		priority: Priority,
	) -> Result<(), BackendError>;

	/// Updates only the message of the order with the given id.
	async fn update_message(
		&self,
		session: &SessionContext,
		id: &str,
		message: &str,
	) -> Result<(), BackendError>;
}

/// Trait defining the credential exchange endpoints.
///
/// A successful exchange yields the bearer token; everything else about
/// session issuance is owned by the backend.
#[async_trait]
pub trait AuthApi: Send + Sync {
	/// Exchanges credentials for a bearer token.
	async fn login(&self, credentials: &Credentials) -> Result<SecretString, BackendError>;

	/// Registers a new account and returns its bearer token.
	async fn signup(&self, credentials: &Credentials) -> Result<SecretString, BackendError>;
}
