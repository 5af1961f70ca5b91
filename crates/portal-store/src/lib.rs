//! Client Order Store.
//!
//! Maintains the client's view of the order collection and keeps it
//! consistent with the backend after every mutation. The collection is a
//! local cache of server state, unique-keyed by id, ordered as returned by
//! the last successful fetch with newly created orders appended.
//!
//! Failure policy: transport and decode failures collapse into one
//! "operation failed" outcome at the operation boundary, logged and
//! swallowed. The collection is never mutated on failure, nothing
//! propagates to the presentation layer, and no operation retries. Each
//! operation issues exactly one network exchange; two operations racing on
//! the same id are not sequenced, the last response to land wins.

use portal_api::OrderApi;
use portal_types::{CreateOrderRequest, Order, Priority, SessionContext};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Pending inline edit of one order's priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityDraft {
	/// Id of the order being edited.
	pub order_id: String,
	/// The value pending dispatch.
	pub value: Priority,
}

/// Pending inline edit of one order's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
	/// Id of the order being edited.
	pub order_id: String,
	/// The value pending dispatch.
	pub value: String,
}

/// Collection plus transient edit state, mutated in one shot under the
/// write lock.
#[derive(Debug, Default)]
struct StoreState {
	orders: Vec<Order>,
	// The two drafts are independent: a priority edit and a message edit
	// may be open at the same time, even on the same order.
	priority_draft: Option<PriorityDraft>,
	message_draft: Option<MessageDraft>,
}

/// The client-side order collection and its synchronization operations.
pub struct OrderStore {
	api: Arc<dyn OrderApi>,
	state: RwLock<StoreState>,
}

impl OrderStore {
	/// Creates a store backed by the given API.
	pub fn new(api: Arc<dyn OrderApi>) -> Self {
		Self {
			api,
			state: RwLock::new(StoreState::default()),
		}
	}

	/// Returns a snapshot of the current collection.
	pub async fn orders(&self) -> Vec<Order> {
		self.state.read().await.orders.clone()
	}

	/// Returns the open priority draft, if any.
	pub async fn priority_draft(&self) -> Option<PriorityDraft> {
		self.state.read().await.priority_draft.clone()
	}

	/// Returns the open message draft, if any.
	pub async fn message_draft(&self) -> Option<MessageDraft> {
		self.state.read().await.message_draft.clone()
	}

	/// Replaces the collection with the backend's current state.
	///
	/// Called whenever a session becomes available, including startup
	/// hydration. On failure the previous collection stays untouched.
	pub async fn load(&self, session: &SessionContext) {
		match self.api.fetch_orders(session).await {
			Ok(orders) => {
				let mut state = self.state.write().await;
				state.orders = orders;
				tracing::debug!(count = state.orders.len(), "order collection refreshed");
			}
			Err(err) => tracing::warn!("failed to fetch orders: {}", err),
		}
	}

	/// Creates an order and appends the backend's returned record.
	///
	/// A blank product name (after trimming) or a zero quantity never
	/// reaches the backend; the backend stays authoritative for
	/// everything else.
	pub async fn create(
		&self,
		session: &SessionContext,
		product_name: &str,
		quantity: u32,
		priority: Priority,
		message: &str,
	) {
		let product_name = product_name.trim();
		if product_name.is_empty() {
			tracing::warn!("rejected order with blank product name");
			return;
		}
		if quantity == 0 {
			tracing::warn!("rejected order with zero quantity");
			return;
		}

		let request = CreateOrderRequest {
			product_name: product_name.to_string(),
			quantity,
			priority,
			message: message.trim().to_string(),
		};

		match self.api.create_order(session, request).await {
			Ok(order) => {
				let mut state = self.state.write().await;
				tracing::debug!(id = %order.id, "order created");
				state.orders.push(order);
			}
			Err(err) => tracing::warn!("failed to create order: {}", err),
		}
	}

	/// Deletes an order and removes it from the collection.
	///
	/// On failure the stale entry remains visible.
	pub async fn delete(&self, session: &SessionContext, id: &str) {
		match self.api.delete_order(session, id).await {
			Ok(()) => {
				let mut state = self.state.write().await;
				state.orders.retain(|order| order.id != id);
				tracing::debug!(%id, "order deleted");
			}
			Err(err) => tracing::warn!(%id, "failed to delete order: {}", err),
		}
	}

	/// Sends a priority update and patches the matching entry on success.
	///
	/// The inline editor closes however the request ends; a failed save
	/// silently discards the draft.
	pub async fn update_priority(
		&self,
		session: &SessionContext,
		id: &str,
		new_priority: Priority,
	) {
		let result = self.api.update_priority(session, id, new_priority).await;

		let mut state = self.state.write().await;
		state.priority_draft = None;
		match result {
			Ok(()) => {
				if let Some(order) = state.orders.iter_mut().find(|o| o.id == id) {
					order.priority = new_priority;
				}
				tracing::debug!(%id, priority = %new_priority, "order priority updated");
			}
			Err(err) => tracing::warn!(%id, "failed to update priority: {}", err),
		}
	}

	/// Sends a message update and patches the matching entry on success.
	///
	/// Same editor-closing contract as [`OrderStore::update_priority`].
	pub async fn update_message(&self, session: &SessionContext, id: &str, new_message: &str) {
		let result = self.api.update_message(session, id, new_message).await;

		let mut state = self.state.write().await;
		state.message_draft = None;
		match result {
			Ok(()) => {
				if let Some(order) = state.orders.iter_mut().find(|o| o.id == id) {
					order.message = new_message.to_string();
				}
				tracing::debug!(%id, "order message updated");
			}
			Err(err) => tracing::warn!(%id, "failed to update message: {}", err),
		}
	}

	/// Opens a priority edit seeded with the order's current value.
	pub async fn begin_priority_edit(&self, id: &str) {
		let mut state = self.state.write().await;
		let current = state.orders.iter().find(|o| o.id == id).map(|o| o.priority);
		match current {
			Some(value) => {
				state.priority_draft = Some(PriorityDraft {
					order_id: id.to_string(),
					value,
				});
			}
			None => tracing::warn!(%id, "cannot edit priority of unknown order"),
		}
	}

	/// Replaces the pending priority value of the open draft.
	pub async fn set_priority_draft(&self, value: Priority) {
		let mut state = self.state.write().await;
		if let Some(draft) = state.priority_draft.as_mut() {
			draft.value = value;
		}
	}

	/// Discards the open priority draft without dispatching.
	pub async fn cancel_priority_edit(&self) {
		self.state.write().await.priority_draft = None;
	}

	/// Dispatches the open priority draft, if any.
	pub async fn save_priority_edit(&self, session: &SessionContext) {
		let draft = self.state.read().await.priority_draft.clone();
		match draft {
			Some(draft) => {
				self.update_priority(session, &draft.order_id, draft.value)
					.await
			}
			None => tracing::warn!("no priority edit in progress"),
		}
	}

	/// Opens a message edit seeded with the order's current value.
	pub async fn begin_message_edit(&self, id: &str) {
		let mut state = self.state.write().await;
		let current = state
			.orders
			.iter()
			.find(|o| o.id == id)
			.map(|o| o.message.clone());
		match current {
			Some(value) => {
				state.message_draft = Some(MessageDraft {
					order_id: id.to_string(),
					value,
				});
			}
			None => tracing::warn!(%id, "cannot edit message of unknown order"),
		}
	}

	/// Replaces the pending message value of the open draft.
	pub async fn set_message_draft(&self, value: impl Into<String>) {
		let mut state = self.state.write().await;
		if let Some(draft) = state.message_draft.as_mut() {
			draft.value = value.into();
		}
	}

	/// Discards the open message draft without dispatching.
	pub async fn cancel_message_edit(&self) {
		self.state.write().await.message_draft = None;
	}

	/// Dispatches the open message draft, if any.
	pub async fn save_message_edit(&self, session: &SessionContext) {
		let draft = self.state.read().await.message_draft.clone();
		match draft {
			Some(draft) => {
				self.update_message(session, &draft.order_id, &draft.value)
					.await
			}
			None => tracing::warn!("no message edit in progress"),
		}
	}

	/// Empties the collection and discards both drafts.
	///
	/// The logout path: the cached view is invalid once the session is
	/// gone.
	pub async fn clear(&self) {
		let mut state = self.state.write().await;
		state.orders.clear();
		state.priority_draft = None;
		state.message_draft = None;
	}
}
