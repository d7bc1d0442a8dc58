// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Federated identity broker credentials.

use idgate_common_secret::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::ProvisioningError;

/// How the identity pool fetches user attributes from the broker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttributeRequestMethod {
	Get,
	#[default]
	Post,
}

impl fmt::Display for AttributeRequestMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AttributeRequestMethod::Get => write!(f, "GET"),
			AttributeRequestMethod::Post => write!(f, "POST"),
		}
	}
}

impl FromStr for AttributeRequestMethod {
	type Err = ProvisioningError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_uppercase().as_str() {
			"GET" => Ok(AttributeRequestMethod::Get),
			"POST" => Ok(AttributeRequestMethod::Post),
			other => Err(ProvisioningError::InvalidFederation(format!(
				"unknown attribute request method '{other}'"
			))),
		}
	}
}

/// Broker claim names copied into the pool's standard attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMapping {
	pub email: String,
	pub given_name: String,
	pub family_name: String,
}

impl Default for AttributeMapping {
	fn default() -> Self {
		Self {
			email: "email".to_string(),
			given_name: "given_name".to_string(),
			family_name: "family_name".to_string(),
		}
	}
}

/// Credentials enabling an OIDC identity broker.
///
/// Presence of this config switches the pool client to the federated shape.
#[derive(Debug, Clone)]
pub struct FederationConfig {
	/// Name the provider is advertised under (e.g. "corp-oidc").
	pub provider_name: String,
	pub client_id: String,
	pub client_secret: SecretString,
	pub issuer_url: String,
	pub attribute_mapping: AttributeMapping,
	pub attribute_request_method: AttributeRequestMethod,
}

impl FederationConfig {
	pub fn new(
		provider_name: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: SecretString,
		issuer_url: impl Into<String>,
	) -> Self {
		Self {
			provider_name: provider_name.into(),
			client_id: client_id.into(),
			client_secret,
			issuer_url: issuer_url.into(),
			attribute_mapping: AttributeMapping::default(),
			attribute_request_method: AttributeRequestMethod::default(),
		}
	}

	pub fn with_attribute_request_method(mut self, method: AttributeRequestMethod) -> Self {
		self.attribute_request_method = method;
		self
	}

	pub(crate) fn validate(&self) -> Result<Url, ProvisioningError> {
		if self.provider_name.trim().is_empty() {
			return Err(ProvisioningError::InvalidFederation(
				"provider_name cannot be empty".to_string(),
			));
		}
		if self.client_id.trim().is_empty() {
			return Err(ProvisioningError::InvalidFederation(
				"client_id cannot be empty".to_string(),
			));
		}
		if self.client_secret.is_empty() {
			return Err(ProvisioningError::InvalidFederation(
				"client_secret cannot be empty".to_string(),
			));
		}
		parse_url(&self.issuer_url)
	}
}

pub(crate) fn parse_url(raw: &str) -> Result<Url, ProvisioningError> {
	Url::parse(raw).map_err(|source| ProvisioningError::InvalidUrl {
		url: raw.to_string(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config() -> FederationConfig {
		FederationConfig::new(
			"corp-oidc",
			"client-123",
			SecretString::new("shh".to_string()),
			"https://idp.example.com/realms/corp",
		)
	}

	#[test]
	fn valid_config_returns_issuer() {
		let issuer = config().validate().unwrap();
		assert_eq!(issuer.host_str(), Some("idp.example.com"));
	}

	#[test]
	fn defaults_request_attributes_by_post() {
		assert_eq!(
			config().attribute_request_method,
			AttributeRequestMethod::Post
		);
		assert_eq!(config().attribute_mapping.email, "email");
	}

	#[test]
	fn empty_secret_is_rejected() {
		let mut config = config();
		config.client_secret = SecretString::new(String::new());
		assert!(matches!(
			config.validate(),
			Err(ProvisioningError::InvalidFederation(msg)) if msg.contains("client_secret")
		));
	}

	#[test]
	fn relative_issuer_is_rejected() {
		let mut config = config();
		config.issuer_url = "idp.example.com".to_string();
		assert!(matches!(
			config.validate(),
			Err(ProvisioningError::InvalidUrl { .. })
		));
	}

	#[test]
	fn request_method_parses_case_insensitively() {
		assert_eq!(
			"get".parse::<AttributeRequestMethod>().unwrap(),
			AttributeRequestMethod::Get
		);
		assert!("PUT".parse::<AttributeRequestMethod>().is_err());
	}

	#[test]
	fn debug_does_not_leak_secret() {
		assert!(!format!("{:?}", config()).contains("shh"));
	}
}
