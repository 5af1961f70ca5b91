//! Order wire types for the portal client.
//!
//! Field names follow the backend contract exactly so the structs can be
//! used both for decoding responses and for local state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single product request record, the central entity of the portal.
///
/// The identifier travels on the wire as `_id`; it is assigned by the
/// backend on creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
	/// Backend-assigned unique identifier.
	#[serde(rename = "_id")]
	pub id: String,
	/// Name of the ordered product, non-empty.
	#[serde(rename = "productName")]
	pub product_name: String,
	/// Number of units, always positive.
	pub quantity: u32,
	/// Urgency attached to the order.
	#[serde(default)]
	pub priority: Priority,
	/// Free-text note; empty when the user supplied none.
	#[serde(default)]
	pub message: String,
}

/// Urgency of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
	/// Default for new orders.
	#[default]
	Low,
	Medium,
	High,
}

impl fmt::Display for Priority {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Priority::Low => write!(f, "low"),
			Priority::Medium => write!(f, "medium"),
			Priority::High => write!(f, "high"),
		}
	}
}

/// Error returned when a priority label cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown priority '{0}', expected low, medium or high")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
	type Err = ParsePriorityError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"low" => Ok(Priority::Low),
			"medium" => Ok(Priority::Medium),
			"high" => Ok(Priority::High),
			other => Err(ParsePriorityError(other.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_order_decodes_backend_field_names() {
		let json = r#"{"_id":"1","productName":"Widget","quantity":3,"priority":"high","message":""}"#;
		let order: Order = serde_json::from_str(json).unwrap();

		assert_eq!(order.id, "1");
		assert_eq!(order.product_name, "Widget");
		assert_eq!(order.quantity, 3);
		assert_eq!(order.priority, Priority::High);
		assert_eq!(order.message, "");
	}

	#[test]
	fn test_order_defaults_for_missing_fields() {
		// Older backend records omit priority and message entirely.
		let json = r#"{"_id":"2","productName":"Bolt","quantity":10}"#;
		let order: Order = serde_json::from_str(json).unwrap();

		assert_eq!(order.priority, Priority::Low);
		assert_eq!(order.message, "");
	}

	#[test]
	fn test_order_encodes_backend_field_names() {
		let order = Order {
			id: "7".to_string(),
			product_name: "Gasket".to_string(),
			quantity: 2,
			priority: Priority::Medium,
			message: "urgent-ish".to_string(),
		};
		let value = serde_json::to_value(&order).unwrap();

		assert_eq!(value["_id"], "7");
		assert_eq!(value["productName"], "Gasket");
		assert_eq!(value["priority"], "medium");
	}

	#[test]
	fn test_priority_parse_and_display() {
		assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
		assert_eq!("medium".parse::<Priority>().unwrap(), Priority::Medium);
		assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
		assert!("urgent".parse::<Priority>().is_err());

		assert_eq!(Priority::High.to_string(), "high");
		assert_eq!(Priority::default(), Priority::Low);
	}
}
