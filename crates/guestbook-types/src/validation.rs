//! Input schema and validation for new guestbook entries.
//!
//! Rules are applied in a fixed order so callers always see the same
//! message for the same input:
//!
//! 1. both fields present and non-empty after trimming
//! 2. `name` at most [`MAX_NAME_LENGTH`] characters
//! 3. `message` at most [`MAX_MESSAGE_LENGTH`] characters
//!
//! Lengths are counted in characters of the trimmed text.

use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;
use validator::Validate;

/// Maximum length of an author name.
pub const MAX_NAME_LENGTH: usize = 100;
/// Maximum length of a message body.
pub const MAX_MESSAGE_LENGTH: usize = 500;

/// Reasons a create request is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field is missing, empty, or whitespace only.
    #[error("Name and message are required")]
    Required,
    /// The trimmed name exceeds [`MAX_NAME_LENGTH`].
    #[error("Name must be 100 characters or less")]
    NameTooLong,
    /// The trimmed message exceeds [`MAX_MESSAGE_LENGTH`].
    #[error("Message must be 500 characters or less")]
    MessageTooLong,
}

/// Wire schema for `POST /api/guestbook`.
///
/// Both fields are optional here so that an absent field is reported as
/// [`ValidationError::Required`] instead of a parse failure. Only a JSON
/// object is accepted: unknown fields and the positional (array) form are
/// rejected.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateEntryRequest {
    /// Author display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Message body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Field layout of [`CreateEntryRequest`], read from a map only.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateEntryFields {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl<'de> Deserialize<'de> for CreateEntryRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ObjectVisitor;

        impl<'de> Visitor<'de> for ObjectVisitor {
            type Value = CreateEntryRequest;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object with `name` and `message`")
            }

            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let fields = CreateEntryFields::deserialize(MapAccessDeserializer::new(map))?;
                Ok(CreateEntryRequest {
                    name: fields.name,
                    message: fields.message,
                })
            }
        }

        deserializer.deserialize_map(ObjectVisitor)
    }
}

impl CreateEntryRequest {
    /// Builds a request from raw form values.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            message: Some(message.into()),
        }
    }
}

/// A validated, trimmed entry ready to be stored.
///
/// The only way to obtain one is [`NewEntry::parse`], so holding a
/// `NewEntry` means the bounds already hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct NewEntry {
    #[validate(length(max = 100))]
    name: String,
    #[validate(length(max = 500))]
    message: String,
}

impl NewEntry {
    /// Validates a create request.
    pub fn parse(request: CreateEntryRequest) -> Result<Self, ValidationError> {
        let name = request.name.as_deref().map(str::trim).unwrap_or_default();
        let message = request.message.as_deref().map(str::trim).unwrap_or_default();

        if name.is_empty() || message.is_empty() {
            return Err(ValidationError::Required);
        }

        let entry = Self {
            name: name.to_string(),
            message: message.to_string(),
        };

        if let Err(errors) = entry.validate() {
            let fields = errors.field_errors();
            if fields.contains_key("name") {
                return Err(ValidationError::NameTooLong);
            }
            return Err(ValidationError::MessageTooLong);
        }

        Ok(entry)
    }

    /// Validates raw name and message values.
    pub fn from_parts(
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::parse(CreateEntryRequest::new(name, message))
    }

    /// The trimmed author name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The trimmed message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Splits into `(name, message)`.
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_trims_fields() {
        let entry = NewEntry::from_parts("  Ana ", "\tHi!\n").unwrap();
        assert_eq!(entry.name(), "Ana");
        assert_eq!(entry.message(), "Hi!");
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(
            NewEntry::parse(CreateEntryRequest::default()),
            Err(ValidationError::Required)
        );
        assert_eq!(
            NewEntry::from_parts("", "hello"),
            Err(ValidationError::Required)
        );
        assert_eq!(
            NewEntry::from_parts("Ana", "   "),
            Err(ValidationError::Required)
        );
    }

    #[test]
    fn test_length_bounds() {
        let name = "n".repeat(MAX_NAME_LENGTH);
        let message = "m".repeat(MAX_MESSAGE_LENGTH);
        assert!(NewEntry::from_parts(&name, &message).is_ok());

        assert_eq!(
            NewEntry::from_parts(format!("{name}n"), "hi"),
            Err(ValidationError::NameTooLong)
        );
        assert_eq!(
            NewEntry::from_parts("Ana", format!("{message}m")),
            Err(ValidationError::MessageTooLong)
        );
    }

    #[test]
    fn test_name_checked_before_message() {
        assert_eq!(
            NewEntry::from_parts("n".repeat(101), "m".repeat(501)),
            Err(ValidationError::NameTooLong)
        );
        // Emptiness wins over length.
        assert_eq!(
            NewEntry::from_parts("n".repeat(101), ""),
            Err(ValidationError::Required)
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let name = "é".repeat(MAX_NAME_LENGTH);
        assert!(NewEntry::from_parts(name, "ok").is_ok());
    }

    #[test]
    fn test_padding_does_not_count() {
        let name = format!("   {}   ", "n".repeat(MAX_NAME_LENGTH));
        assert!(NewEntry::from_parts(name, "ok").is_ok());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::Required.to_string(),
            "Name and message are required"
        );
        assert_eq!(
            ValidationError::NameTooLong.to_string(),
            "Name must be 100 characters or less"
        );
        assert_eq!(
            ValidationError::MessageTooLong.to_string(),
            "Message must be 500 characters or less"
        );
    }

    #[test]
    fn test_request_rejects_unknown_fields() {
        let result: Result<CreateEntryRequest, _> =
            serde_json::from_str(r#"{"name":"a","message":"b","admin":true}"#);
        assert!(result.is_err());

        let partial: CreateEntryRequest = serde_json::from_str(r#"{"name":"a"}"#).unwrap();
        assert!(partial.message.is_none());
    }

    #[test]
    fn test_request_must_be_an_object() {
        for body in [r#"["Mallory","positional"]"#, "null", r#""Ana""#, "42"] {
            let result: Result<CreateEntryRequest, _> = serde_json::from_str(body);
            assert!(result.is_err(), "accepted {body}");
        }

        let request: CreateEntryRequest =
            serde_json::from_str(r#"{"name":"Ana","message":null}"#).unwrap();
        assert_eq!(request.name.as_deref(), Some("Ana"));
        assert!(request.message.is_none());
    }

    proptest! {
        #[test]
        fn prop_valid_inputs_accepted(
            name in "[a-zA-Z0-9]{1,100}",
            message in "[a-zA-Z0-9 ]{0,499}[a-z]",
        ) {
            let entry = NewEntry::from_parts(name.clone(), message.clone()).unwrap();
            prop_assert_eq!(entry.name(), name.trim());
            prop_assert_eq!(entry.message(), message.trim());
        }

        #[test]
        fn prop_whitespace_only_rejected(name in "[ \t\n]{0,20}") {
            prop_assert_eq!(
                NewEntry::from_parts(name, "hello"),
                Err(ValidationError::Required)
            );
        }

        #[test]
        fn prop_long_names_rejected(extra in 1usize..50) {
            let name = "x".repeat(MAX_NAME_LENGTH + extra);
            prop_assert_eq!(
                NewEntry::from_parts(name, "hello"),
                Err(ValidationError::NameTooLong)
            );
        }
    }
}
