//! TOML configuration validation helpers.
//!
//! Storage backends declare the fields they accept through a small schema
//! so configuration mistakes surface at startup instead of at first use.

use thiserror::Error;

/// Errors produced while validating a TOML configuration section.
#[derive(Debug, Error)]
pub enum ValidationError {
	/// A required field is missing from the section.
	#[error("Missing required field: {0}")]
	MissingField(String),
	/// A field is present but its value is rejected.
	#[error("Invalid value for field '{field}': {message}")]
	InvalidValue { field: String, message: String },
	/// A field is present with the wrong TOML type.
	#[error("Type mismatch for field '{field}': expected {expected}")]
	TypeMismatch { field: String, expected: String },
}

/// Expected type of a configuration field.
#[derive(Debug)]
pub enum FieldType {
	/// A string value.
	String,
	/// An integer value with optional inclusive bounds.
	Integer {
		min: Option<i64>,
		max: Option<i64>,
	},
	/// A boolean value.
	Boolean,
}

/// A named field within a schema.
#[derive(Debug)]
pub struct Field {
	pub name: String,
	pub field_type: FieldType,
}

impl Field {
	/// Creates a field with the given name and expected type.
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
		}
	}
}

/// Required and optional fields for one configuration section.
#[derive(Debug)]
pub struct Schema {
	required: Vec<Field>,
	optional: Vec<Field>,
}

impl Schema {
	/// Creates a schema from required and optional field lists.
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Validates a TOML section against this schema.
	pub fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		for field in &self.required {
			let value = config
				.get(&field.name)
				.ok_or_else(|| ValidationError::MissingField(field.name.clone()))?;
			Self::check_type(&field.name, &field.field_type, value)?;
		}
		for field in &self.optional {
			if let Some(value) = config.get(&field.name) {
				Self::check_type(&field.name, &field.field_type, value)?;
			}
		}
		Ok(())
	}

	fn check_type(
		name: &str,
		expected: &FieldType,
		value: &toml::Value,
	) -> Result<(), ValidationError> {
		match expected {
			FieldType::String => {
				value.as_str().ok_or_else(|| ValidationError::TypeMismatch {
					field: name.to_string(),
					expected: "string".to_string(),
				})?;
				Ok(())
			}
			FieldType::Integer { min, max } => {
				let n = value
					.as_integer()
					.ok_or_else(|| ValidationError::TypeMismatch {
						field: name.to_string(),
						expected: "integer".to_string(),
					})?;
				if min.is_some_and(|m| n < m) || max.is_some_and(|m| n > m) {
					return Err(ValidationError::InvalidValue {
						field: name.to_string(),
						message: format!("{} is out of range", n),
					});
				}
				Ok(())
			}
			FieldType::Boolean => {
				value
					.as_bool()
					.ok_or_else(|| ValidationError::TypeMismatch {
						field: name.to_string(),
						expected: "boolean".to_string(),
					})?;
				Ok(())
			}
		}
	}
}

/// Validation hook implemented by each configurable backend.
pub trait ConfigSchema: Send + Sync {
	/// Validates the backend's TOML section.
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError>;
}
