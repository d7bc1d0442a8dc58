// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire model of the pre-sign-up lifecycle event.
//!
//! The identity provider sends a camelCase JSON document and expects the same
//! document back. Only `triggerSource`, `request.userAttributes` and the two
//! `response` flags are interpreted; every other key is carried through the
//! `extra` maps untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

const SIGN_UP: &str = "PreSignUp_SignUp";
const EXTERNAL_PROVIDER: &str = "PreSignUp_ExternalProvider";
const ADMIN_CREATE_USER: &str = "PreSignUp_AdminCreateUser";

/// Sub-kind of a pre-sign-up event.
///
/// Unknown values are kept verbatim in [`TriggerSource::Other`] so that a
/// trigger kind introduced later round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TriggerSource {
	/// Native credential-based registration.
	SignUp,
	/// First sign-in through a federated identity broker.
	ExternalProvider,
	/// Account created through the administrative API.
	AdminCreateUser,
	Other(String),
}

impl TriggerSource {
	pub fn as_str(&self) -> &str {
		match self {
			TriggerSource::SignUp => SIGN_UP,
			TriggerSource::ExternalProvider => EXTERNAL_PROVIDER,
			TriggerSource::AdminCreateUser => ADMIN_CREATE_USER,
			TriggerSource::Other(raw) => raw,
		}
	}
}

impl From<String> for TriggerSource {
	fn from(raw: String) -> Self {
		match raw.as_str() {
			SIGN_UP => TriggerSource::SignUp,
			EXTERNAL_PROVIDER => TriggerSource::ExternalProvider,
			ADMIN_CREATE_USER => TriggerSource::AdminCreateUser,
			_ => TriggerSource::Other(raw),
		}
	}
}

impl From<TriggerSource> for String {
	fn from(source: TriggerSource) -> Self {
		match source {
			TriggerSource::Other(raw) => raw,
			known => known.as_str().to_string(),
		}
	}
}

impl fmt::Display for TriggerSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
	#[serde(default)]
	pub user_attributes: Map<String, Value>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
	#[serde(default)]
	pub auto_confirm_user: bool,
	#[serde(default)]
	pub auto_verify_email: bool,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// One pre-sign-up dispatch from the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleEvent {
	pub trigger_source: TriggerSource,
	#[serde(default)]
	pub request: SignUpRequest,
	#[serde(default)]
	pub response: SignUpResponse,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl LifecycleEvent {
	/// Minimal event carrying only a trigger source and an email attribute.
	pub fn new(trigger_source: TriggerSource, email: impl Into<String>) -> Self {
		let mut user_attributes = Map::new();
		user_attributes.insert("email".to_string(), Value::String(email.into()));
		Self {
			trigger_source,
			request: SignUpRequest {
				user_attributes,
				extra: Map::new(),
			},
			response: SignUpResponse::default(),
			extra: Map::new(),
		}
	}

	/// The `email` user attribute, if present and non-empty.
	pub fn email(&self) -> Option<&str> {
		self
			.request
			.user_attributes
			.get("email")
			.and_then(Value::as_str)
			.filter(|email| !email.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn known_trigger_sources_parse() {
		assert_eq!(
			TriggerSource::from(SIGN_UP.to_string()),
			TriggerSource::SignUp
		);
		assert_eq!(
			TriggerSource::from(EXTERNAL_PROVIDER.to_string()),
			TriggerSource::ExternalProvider
		);
		assert_eq!(
			TriggerSource::from(ADMIN_CREATE_USER.to_string()),
			TriggerSource::AdminCreateUser
		);
	}

	#[test]
	fn unknown_trigger_source_is_retained() {
		let source = TriggerSource::from("PreSignUp_Passkey".to_string());
		assert_eq!(source, TriggerSource::Other("PreSignUp_Passkey".to_string()));
		assert_eq!(String::from(source), "PreSignUp_Passkey");
	}

	#[test]
	fn unmodelled_fields_survive_round_trip() {
		let input = json!({
			"version": "1",
			"region": "ap-southeast-2",
			"userPoolId": "ap-southeast-2_abc",
			"userName": "google_1234",
			"callerContext": { "awsSdkVersion": "aws-sdk-unknown", "clientId": "client" },
			"triggerSource": "PreSignUp_ExternalProvider",
			"request": {
				"userAttributes": { "email": "alice@example.com", "given_name": "Alice" },
				"validationData": null,
				"clientMetadata": { "tenant": "lab-1" }
			},
			"response": {
				"autoConfirmUser": false,
				"autoVerifyEmail": false,
				"autoVerifyPhone": false
			}
		});

		let event: LifecycleEvent = serde_json::from_value(input.clone()).unwrap();
		assert_eq!(event.trigger_source, TriggerSource::ExternalProvider);
		assert_eq!(event.email(), Some("alice@example.com"));
		assert_eq!(serde_json::to_value(&event).unwrap(), input);
	}

	#[test]
	fn empty_email_is_treated_as_missing() {
		let event = LifecycleEvent::new(TriggerSource::ExternalProvider, "");
		assert_eq!(event.email(), None);
	}

	#[test]
	fn missing_request_and_response_default() {
		let event: LifecycleEvent =
			serde_json::from_value(json!({ "triggerSource": "PreSignUp_SignUp" })).unwrap();
		assert_eq!(event.email(), None);
		assert!(!event.response.auto_confirm_user);
		assert!(!event.response.auto_verify_email);
	}
}
