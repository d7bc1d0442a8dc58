// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use idgate_common_secret::SecretString;
use idgate_event_router::{EventRouterBuilder, RoutingTable, SenderKeyRef};
use serde::Serialize;
use tracing::info;

use crate::error::ProvisioningError;
use crate::federation::{
	parse_url, AttributeMapping, AttributeRequestMethod, FederationConfig,
};
use crate::frontend::{FrontendAuthConfig, FrontendOAuth};

/// Provider name of the identity pool's own username/password flow.
pub const NATIVE_PROVIDER: &str = "COGNITO";

pub const OAUTH_SCOPES: [&str; 3] = ["openid", "email", "profile"];

pub const SYSTEM_ADMIN_GROUP: &str = "SystemAdmin";

const PRODUCTION_ENVIRONMENT: &str = "prod";
const MAX_NAMESPACE_LEN: usize = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
	Destroy,
	Retain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPoolDescriptor {
	pub name: String,
	pub self_sign_up_enabled: bool,
	pub sign_in_case_sensitive: bool,
	pub sign_in_aliases: Vec<String>,
	pub auto_verify_email: bool,
	pub account_recovery: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub custom_sender_key: Option<SenderKeyRef>,
	pub removal_policy: RemovalPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainDescriptor {
	pub domain_prefix: String,
}

impl DomainDescriptor {
	/// Hosted UI domain in `region`.
	pub fn hosted_domain(&self, region: &str) -> String {
		format!("{}.auth.{region}.amazoncognito.com", self.domain_prefix)
	}
}

/// The OIDC identity broker attached to the pool.
#[derive(Debug, Clone, Serialize)]
pub struct BrokerDescriptor {
	pub provider_name: String,
	pub client_id: String,
	pub client_secret: SecretString,
	pub issuer_url: String,
	pub attribute_mapping: AttributeMapping,
	pub attribute_request_method: AttributeRequestMethod,
}

impl BrokerDescriptor {
	fn declare(config: &FederationConfig) -> Self {
		Self {
			provider_name: config.provider_name.clone(),
			client_id: config.client_id.clone(),
			client_secret: config.client_secret.clone(),
			issuer_url: config.issuer_url.clone(),
			attribute_mapping: config.attribute_mapping.clone(),
			attribute_request_method: config.attribute_request_method,
		}
	}

	fn reference(&self) -> BrokerRef {
		BrokerRef {
			resource_id: ResourceKind::Broker.id().to_string(),
			provider_name: self.provider_name.clone(),
		}
	}
}

/// Handle to a declared broker. Only obtainable by declaring one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokerRef {
	resource_id: String,
	provider_name: String,
}

impl BrokerRef {
	pub fn resource_id(&self) -> &str {
		&self.resource_id
	}

	pub fn provider_name(&self) -> &str {
		&self.provider_name
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OAuthFlow {
	AuthorizationCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OAuthSettings {
	pub flows: Vec<OAuthFlow>,
	pub scopes: Vec<String>,
	pub callback_urls: Vec<String>,
	pub logout_urls: Vec<String>,
}

/// Sign-in providers advertised by the pool client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ClientProviders {
	Native,
	Federated { broker: BrokerRef, oauth: OAuthSettings },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientDescriptor {
	pub name: String,
	pub generate_secret: bool,
	pub prevent_user_existence_errors: bool,
	pub auth_flows: Vec<String>,
	pub providers: ClientProviders,
}

impl ClientDescriptor {
	pub fn supported_providers(&self) -> Vec<&str> {
		match &self.providers {
			ClientProviders::Native => vec![NATIVE_PROVIDER],
			ClientProviders::Federated { broker, .. } => {
				vec![NATIVE_PROVIDER, broker.provider_name()]
			}
		}
	}

	pub fn oauth(&self) -> Option<&OAuthSettings> {
		match &self.providers {
			ClientProviders::Native => None,
			ClientProviders::Federated { oauth, .. } => Some(oauth),
		}
	}

	pub fn depends_on(&self) -> Option<&BrokerRef> {
		match &self.providers {
			ClientProviders::Native => None,
			ClientProviders::Federated { broker, .. } => Some(broker),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupDescriptor {
	pub name: String,
	pub precedence: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
	UserPool,
	Domain,
	Broker,
	Client,
	Group,
}

impl ResourceKind {
	pub fn id(&self) -> &'static str {
		match self {
			ResourceKind::UserPool => "user-pool",
			ResourceKind::Domain => "domain",
			ResourceKind::Broker => "federated-oidc",
			ResourceKind::Client => "client",
			ResourceKind::Group => "system-admin-group",
		}
	}
}

/// Resource descriptions in creation order, plus the event routing table.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisioningPlan {
	namespace: String,
	environment: String,
	user_pool: UserPoolDescriptor,
	domain: DomainDescriptor,
	#[serde(skip_serializing_if = "Option::is_none")]
	broker: Option<BrokerDescriptor>,
	client: ClientDescriptor,
	group: GroupDescriptor,
	routing: RoutingTable,
}

impl ProvisioningPlan {
	pub fn builder(namespace: impl Into<String>) -> ProvisioningPlanBuilder {
		ProvisioningPlanBuilder::new(namespace)
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	pub fn user_pool(&self) -> &UserPoolDescriptor {
		&self.user_pool
	}

	pub fn domain(&self) -> &DomainDescriptor {
		&self.domain
	}

	pub fn broker(&self) -> Option<&BrokerDescriptor> {
		self.broker.as_ref()
	}

	pub fn client(&self) -> &ClientDescriptor {
		&self.client
	}

	pub fn group(&self) -> &GroupDescriptor {
		&self.group
	}

	pub fn routing(&self) -> &RoutingTable {
		&self.routing
	}

	pub fn is_federated(&self) -> bool {
		self.broker.is_some()
	}

	/// Resource kinds in the order they must be created.
	pub fn creation_order(&self) -> Vec<ResourceKind> {
		let mut order = vec![ResourceKind::UserPool, ResourceKind::Domain];
		if self.broker.is_some() {
			order.push(ResourceKind::Broker);
		}
		order.push(ResourceKind::Client);
		order.push(ResourceKind::Group);
		order
	}

	/// Front-end auth plugin configuration for the deployed pool.
	pub fn frontend_config(
		&self,
		region: &str,
		user_pool_id: &str,
		client_id: &str,
	) -> FrontendAuthConfig {
		let oauth = self.client.oauth().map(|oauth| FrontendOAuth {
			domain: self.domain.hosted_domain(region),
			scope: oauth.scopes.clone(),
			redirect_sign_in: oauth.callback_urls.join(","),
			redirect_sign_out: oauth.logout_urls.join(","),
			response_type: "code".to_string(),
		});

		FrontendAuthConfig {
			region: region.to_string(),
			user_pool_id: user_pool_id.to_string(),
			user_pool_web_client_id: client_id.to_string(),
			oauth,
		}
	}
}

/// Collects provisioning inputs and validates them as a whole in
/// [`build`](Self::build).
#[derive(Debug)]
pub struct ProvisioningPlanBuilder {
	namespace: String,
	environment: String,
	federation: Option<FederationConfig>,
	callback_urls: Vec<String>,
	logout_urls: Vec<String>,
	hooks: EventRouterBuilder,
}

impl ProvisioningPlanBuilder {
	pub fn new(namespace: impl Into<String>) -> Self {
		Self {
			namespace: namespace.into(),
			environment: "dev".to_string(),
			federation: None,
			callback_urls: Vec::new(),
			logout_urls: Vec::new(),
			hooks: EventRouterBuilder::new(),
		}
	}

	pub fn environment(mut self, environment: impl Into<String>) -> Self {
		self.environment = environment.into();
		self
	}

	pub fn federation(mut self, federation: Option<FederationConfig>) -> Self {
		self.federation = federation;
		self
	}

	pub fn callback_urls(mut self, urls: Vec<String>) -> Self {
		self.callback_urls = urls;
		self
	}

	pub fn logout_urls(mut self, urls: Vec<String>) -> Self {
		self.logout_urls = urls;
		self
	}

	pub fn hooks(mut self, hooks: EventRouterBuilder) -> Self {
		self.hooks = hooks;
		self
	}

	pub fn build(self) -> Result<ProvisioningPlan, ProvisioningError> {
		validate_namespace(&self.namespace)?;

		if let Some(federation) = &self.federation {
			federation.validate()?;
			if self.callback_urls.is_empty() {
				return Err(ProvisioningError::MissingCallbackUrls);
			}
			for url in self.callback_urls.iter().chain(&self.logout_urls) {
				parse_url(url)?;
			}
		}

		let routing = self.hooks.build()?;

		let user_pool = UserPoolDescriptor {
			name: format!("{}-user-pool", self.namespace),
			self_sign_up_enabled: false,
			sign_in_case_sensitive: false,
			sign_in_aliases: vec!["email".to_string()],
			auto_verify_email: true,
			account_recovery: "email_only".to_string(),
			custom_sender_key: routing.sender_key().cloned(),
			removal_policy: if self.environment == PRODUCTION_ENVIRONMENT {
				RemovalPolicy::Retain
			} else {
				RemovalPolicy::Destroy
			},
		};

		let domain = DomainDescriptor {
			domain_prefix: self.namespace.clone(),
		};

		let (broker, providers) = match &self.federation {
			Some(federation) => {
				let broker = BrokerDescriptor::declare(federation);
				let providers = ClientProviders::Federated {
					broker: broker.reference(),
					oauth: OAuthSettings {
						flows: vec![OAuthFlow::AuthorizationCode],
						scopes: OAUTH_SCOPES.iter().map(|s| s.to_string()).collect(),
						callback_urls: self.callback_urls.clone(),
						logout_urls: self.logout_urls.clone(),
					},
				};
				(Some(broker), providers)
			}
			None => (None, ClientProviders::Native),
		};

		let client = ClientDescriptor {
			name: format!("{}-client", self.namespace),
			generate_secret: true,
			prevent_user_existence_errors: true,
			auth_flows: vec!["user_srp".to_string()],
			providers,
		};

		let group = GroupDescriptor {
			name: SYSTEM_ADMIN_GROUP.to_string(),
			precedence: 0,
		};

		info!(
			namespace = %self.namespace,
			environment = %self.environment,
			federated = broker.is_some(),
			hooks = routing.len(),
			"provisioning plan built"
		);

		Ok(ProvisioningPlan {
			namespace: self.namespace,
			environment: self.environment,
			user_pool,
			domain,
			broker,
			client,
			group,
			routing,
		})
	}
}

fn validate_namespace(namespace: &str) -> Result<(), ProvisioningError> {
	let valid = !namespace.is_empty()
		&& namespace.len() <= MAX_NAMESPACE_LEN
		&& !namespace.starts_with('-')
		&& !namespace.ends_with('-')
		&& namespace
			.chars()
			.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
	if valid {
		Ok(())
	} else {
		Err(ProvisioningError::InvalidNamespace(namespace.to_string()))
	}
}
