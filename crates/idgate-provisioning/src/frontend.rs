// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration handed to the front-end auth plugin.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendAuthConfig {
	pub region: String,
	pub user_pool_id: String,
	pub user_pool_web_client_id: String,
	/// Present only when a federated broker is configured.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub oauth: Option<FrontendOAuth>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendOAuth {
	pub domain: String,
	pub scope: Vec<String>,
	pub redirect_sign_in: String,
	pub redirect_sign_out: String,
	pub response_type: String,
}

#[cfg(test)]
mod tests {
	use crate::{FederationConfig, ProvisioningPlanBuilder};
	use idgate_common_secret::SecretString;
	use serde_json::json;

	#[test]
	fn native_export_has_no_oauth_block() {
		let plan = ProvisioningPlanBuilder::new("acme").build().unwrap();
		let json = serde_json::to_value(plan.frontend_config(
			"eu-west-1",
			"eu-west-1_abc",
			"client-1",
		))
		.unwrap();

		assert_eq!(
			json,
			json!({
				"region": "eu-west-1",
				"userPoolId": "eu-west-1_abc",
				"userPoolWebClientId": "client-1",
			})
		);
	}

	#[test]
	fn federated_export_includes_hosted_domain() {
		let plan = ProvisioningPlanBuilder::new("acme")
			.federation(Some(FederationConfig::new(
				"corp-oidc",
				"client-123",
				SecretString::new("s3cret".to_string()),
				"https://idp.example.com",
			)))
			.callback_urls(vec![
				"https://app.example.com/callback".to_string(),
				"http://localhost:3000/callback".to_string(),
			])
			.logout_urls(vec!["https://app.example.com/".to_string()])
			.build()
			.unwrap();

		let json = serde_json::to_value(plan.frontend_config(
			"eu-west-1",
			"eu-west-1_abc",
			"client-1",
		))
		.unwrap();

		assert_eq!(
			json["oauth"],
			json!({
				"domain": "acme.auth.eu-west-1.amazoncognito.com",
				"scope": ["openid", "email", "profile"],
				"redirectSignIn": "https://app.example.com/callback,http://localhost:3000/callback",
				"redirectSignOut": "https://app.example.com/",
				"responseType": "code",
			})
		);
	}
}
