//! Request and response payloads for the backend HTTP contract.

use crate::{Order, Priority, SecretString};
use serde::{Deserialize, Serialize};

/// Body of the order creation request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
	/// Product being ordered, already trimmed and non-empty.
	#[serde(rename = "productName")]
	pub product_name: String,
	/// Number of units, already validated positive.
	pub quantity: u32,
	/// Urgency of the order.
	pub priority: Priority,
	/// Free-text note, possibly empty.
	pub message: String,
}

/// Body of the priority update request.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePriorityRequest {
	pub priority: Priority,
}

/// Body of the message update request.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateMessageRequest {
	pub message: String,
}

/// Credentials submitted to the login and signup endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
	pub username: String,
	pub password: String,
}

/// Successful response from the auth endpoints.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
	/// Bearer token for subsequent requests.
	pub token: SecretString,
}

/// The two shapes the listing endpoint is known to return.
///
/// Deployments differ: some return the collection as a bare JSON array,
/// others wrap it under an `orders` key. Both collapse to the same
/// sequence through [`OrdersResponse::into_orders`], so shape probing
/// never leaks past the deserialization boundary.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OrdersResponse {
	/// A bare array of orders.
	Bare(Vec<Order>),
	/// An object wrapping the array under `orders`.
	Wrapped { orders: Vec<Order> },
}

impl OrdersResponse {
	/// Normalizes either shape into the plain order sequence.
	pub fn into_orders(self) -> Vec<Order> {
		match self {
			OrdersResponse::Bare(orders) => orders,
			OrdersResponse::Wrapped { orders } => orders,
		}
	}
}
