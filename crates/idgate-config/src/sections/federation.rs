// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Federated OIDC broker configuration section.

use crate::error::ConfigError;
use idgate_common_config::SecretString;
use serde::{Deserialize, Serialize};

fn default_provider_name() -> String {
	"oidc".to_string()
}

fn default_attribute_request_method() -> String {
	"POST".to_string()
}

/// Configuration layer for the OIDC broker (all fields optional for layering).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FederationConfigLayer {
	pub provider_name: Option<String>,
	pub client_id: Option<String>,
	/// Loaded from the environment only.
	#[serde(skip)]
	pub client_secret: Option<SecretString>,
	pub issuer_url: Option<String>,
	/// `GET` or `POST`.
	pub attribute_request_method: Option<String>,
}

impl FederationConfigLayer {
	pub fn merge(&mut self, other: FederationConfigLayer) {
		if other.provider_name.is_some() {
			self.provider_name = other.provider_name;
		}
		if other.client_id.is_some() {
			self.client_id = other.client_id;
		}
		if other.client_secret.is_some() {
			self.client_secret = other.client_secret;
		}
		if other.issuer_url.is_some() {
			self.issuer_url = other.issuer_url;
		}
		if other.attribute_request_method.is_some() {
			self.attribute_request_method = other.attribute_request_method;
		}
	}

	pub fn is_configured(&self) -> bool {
		self.client_id.as_ref().is_some_and(|s| !s.is_empty())
	}

	/// Build the final config, returning None if not configured.
	pub fn build(self) -> Result<Option<FederationConfig>, ConfigError> {
		let Some(client_id) = self.client_id.filter(|s| !s.is_empty()) else {
			return Ok(None);
		};

		let client_secret = self.client_secret.ok_or_else(|| {
			ConfigError::Validation(
				"federation client_secret is required when client_id is set".to_string(),
			)
		})?;

		if client_secret.is_empty() {
			return Err(ConfigError::Validation(
				"federation client_secret cannot be empty".to_string(),
			));
		}

		let issuer_url = self
			.issuer_url
			.filter(|s| !s.is_empty())
			.ok_or_else(|| {
				ConfigError::Validation(
					"federation issuer_url is required when client_id is set".to_string(),
				)
			})?;

		let attribute_request_method = self
			.attribute_request_method
			.map(|m| m.to_ascii_uppercase())
			.unwrap_or_else(default_attribute_request_method);
		if attribute_request_method != "GET" && attribute_request_method != "POST" {
			return Err(ConfigError::InvalidValue {
				key: "federation.attribute_request_method".to_string(),
				message: format!("expected GET or POST, got '{attribute_request_method}'"),
			});
		}

		Ok(Some(FederationConfig {
			provider_name: self.provider_name.unwrap_or_else(default_provider_name),
			client_id,
			client_secret,
			issuer_url,
			attribute_request_method,
		}))
	}
}

/// Validated broker configuration.
#[derive(Debug, Clone)]
pub struct FederationConfig {
	pub provider_name: String,
	pub client_id: String,
	pub client_secret: SecretString,
	pub issuer_url: String,
	pub attribute_request_method: String,
}
