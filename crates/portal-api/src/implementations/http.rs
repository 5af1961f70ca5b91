//! reqwest-backed implementation of the backend contract.

use crate::{AuthApi, BackendError, OrderApi};
use async_trait::async_trait;
use portal_types::{
	AuthResponse, CreateOrderRequest, Credentials, Order, OrdersResponse, Priority, SecretString,
	SessionContext, UpdateMessageRequest, UpdatePriorityRequest,
};
use reqwest::{Client, RequestBuilder, Response};

/// HTTP client for a portal backend instance.
pub struct HttpBackend {
	client: Client,
	base_url: String,
}

impl HttpBackend {
	/// Creates a client for the backend at `base_url`.
	pub fn new(base_url: impl Into<String>) -> Self {
		let base_url: String = base_url.into();
		Self {
			client: Client::new(),
			base_url: base_url.trim_end_matches('/').to_string(),
		}
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	fn authorize(request: RequestBuilder, session: &SessionContext) -> RequestBuilder {
		request.header(
			"Authorization",
			format!("Bearer {}", session.bearer_token().expose_secret()),
		)
	}

	/// Sends a request and maps transport failures and non-success
	/// statuses to their error variants.
	async fn send(request: RequestBuilder) -> Result<Response, BackendError> {
		let response = request
			.send()
			.await
			.map_err(|e| BackendError::Network(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			return Err(BackendError::Status {
				status: status.as_u16(),
			});
		}
		Ok(response)
	}
}

#[async_trait]
impl OrderApi for HttpBackend {
	async fn fetch_orders(&self, session: &SessionContext) -> Result<Vec<Order>, BackendError> {
		let request = Self::authorize(self.client.get(self.url("/orders")), session);
		let response = Self::send(request).await?;

		let body = response
			.json::<OrdersResponse>()
			.await
			.map_err(|e| BackendError::Decode(e.to_string()))?;
		Ok(body.into_orders())
	}

	async fn create_order(
		&self,
		session: &SessionContext,
		request: CreateOrderRequest,
	) -> Result<Order, BackendError> {
		let request =
			Self::authorize(self.client.post(self.url("/orders")), session).json(&request);
		let response = Self::send(request).await?;

		response
			.json::<Order>()
			.await
			.map_err(|e| BackendError::Decode(e.to_string()))
	}

	async fn delete_order(
		&self,
		session: &SessionContext,
		id: &str,
	) -> Result<(), BackendError> {
		let request = Self::authorize(
			self.client.delete(self.url(&format!("/orders/{}", id))),
			session,
		);

		// Success body, if any, is ignored.
		Self::send(request).await.map(|_| ())
	}

	async fn update_priority(
		&self,
		session: &SessionContext,
		id: &str,
		priority: Priority,
	) -> Result<(), BackendError> {
		let request = Self::authorize(
			self.client.patch(self.url(&format!("/orders/{}/priority", id))),
			session,
		)
		.json(&UpdatePriorityRequest { priority });

		Self::send(request).await.map(|_| ())
	}

	async fn update_message(
		&self,
		session: &SessionContext,
		id: &str,
		message: &str,
	) -> Result<(), BackendError> {
		let request = Self::authorize(
			self.client.patch(self.url(&format!("/orders/{}/message", id))),
			session,
		)
		.json(&UpdateMessageRequest {
			message: message.to_string(),
		});

		Self::send(request).await.map(|_| ())
	}
}

#[async_trait]
impl AuthApi for HttpBackend {
	async fn login(&self, credentials: &Credentials) -> Result<SecretString, BackendError> {
		let response =
			Self::send(self.client.post(self.url("/login")).json(credentials)).await?;

		let body = response
			.json::<AuthResponse>()
			.await
			.map_err(|e| BackendError::Decode(e.to_string()))?;
		Ok(body.token)
	}

	async fn signup(&self, credentials: &Credentials) -> Result<SecretString, BackendError> {
		let response =
			Self::send(self.client.post(self.url("/signup")).json(credentials)).await?;

		let body = response
			.json::<AuthResponse>()
			.await
			.map_err(|e| BackendError::Decode(e.to_string()))?;
		Ok(body.token)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_base_url_trailing_slash_is_trimmed() {
		let backend = HttpBackend::new("https://portal.example.com/");
		assert_eq!(backend.url("/orders"), "https://portal.example.com/orders");
	}

	#[test]
	fn test_url_builds_nested_paths() {
		let backend = HttpBackend::new("https://portal.example.com");
		assert_eq!(
			backend.url(&format!("/orders/{}/priority", "abc")),
			"https://portal.example.com/orders/abc/priority"
		);
	}
}
