// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for idgate.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. Config file (`/etc/idgate/idgate.toml`, or a custom path)
//! 3. Environment variables (`IDGATE_*`)
//!
//! Secrets (`IDGATE_DIRECTORY_TOKEN`, `IDGATE_FEDERATION_CLIENT_SECRET`) are
//! read from the environment only and support the `_FILE` suffix.
//!
//! ```ignore
//! use idgate_config::load_config;
//!
//! let config = load_config()?;
//! println!("deploying {} to {}", config.deployment.namespace, config.deployment.region);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::IdgateConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved idgate configuration.
#[derive(Debug, Clone, Default)]
pub struct IdgateConfig {
	pub deployment: DeploymentConfig,
	pub gate: GateConfig,
	pub directory: Option<DirectoryConfig>,
	pub federation: Option<FederationConfig>,
	pub client: ClientConfig,
	pub hooks: HooksConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
pub fn load_config() -> Result<IdgateConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only.
pub fn load_config_from_env() -> Result<IdgateConfig, ConfigError> {
	let mut merged = IdgateConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<IdgateConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<IdgateConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = IdgateConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: IdgateConfigLayer) -> Result<IdgateConfig, ConfigError> {
	let deployment = layer.deployment.unwrap_or_default().finalize();
	let gate = layer.gate.unwrap_or_default().finalize();
	let directory = layer.directory.and_then(|l| l.finalize());
	let federation = layer.federation.unwrap_or_default().build()?;
	let client = layer.client.unwrap_or_default().finalize();
	let hooks = layer.hooks.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	let config = IdgateConfig {
		deployment,
		gate,
		directory,
		federation,
		client,
		hooks,
		logging,
	};
	validate_config(&config)?;

	info!(
		namespace = %config.deployment.namespace,
		region = %config.deployment.region,
		environment = %config.deployment.environment,
		directory_configured = config.directory.is_some(),
		federation_configured = config.federation.is_some(),
		hook_routes = config.hooks.routes.len(),
		"idgate configuration loaded"
	);

	Ok(config)
}

/// Validate cross-field configuration rules.
fn validate_config(config: &IdgateConfig) -> Result<(), ConfigError> {
	if config.gate.lookup_timeout_ms == 0 {
		return Err(ConfigError::InvalidValue {
			key: "gate.lookup_timeout_ms".to_string(),
			message: "must be greater than zero".to_string(),
		});
	}

	if config.federation.is_some() && config.client.callback_urls.is_empty() {
		return Err(ConfigError::Validation(
			"federation is configured but client.callback_urls is empty. \
			 Set IDGATE_CALLBACK_URLS or [client] callback_urls."
				.to_string(),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use idgate_common_config::SecretString;
	use std::io::Write;

	fn federation_layer() -> FederationConfigLayer {
		FederationConfigLayer {
			client_id: Some("client-123".to_string()),
			client_secret: Some(SecretString::new("s3cret".to_string())),
			issuer_url: Some("https://idp.example.com".to_string()),
			..Default::default()
		}
	}

	#[test]
	fn test_empty_layer_finalizes_to_defaults() {
		let config = finalize(IdgateConfigLayer::default()).unwrap();
		assert_eq!(config.deployment, DeploymentConfig::default());
		assert_eq!(config.gate, GateConfig::default());
		assert!(config.directory.is_none());
		assert!(config.federation.is_none());
	}

	#[test]
	fn test_zero_timeout_is_rejected() {
		let layer = IdgateConfigLayer {
			gate: Some(GateConfigLayer {
				lookup_timeout_ms: Some(0),
			}),
			..Default::default()
		};
		assert!(matches!(
			finalize(layer),
			Err(ConfigError::InvalidValue { .. })
		));
	}

	#[test]
	fn test_federation_without_callbacks_is_rejected() {
		let layer = IdgateConfigLayer {
			federation: Some(federation_layer()),
			..Default::default()
		};
		let err = finalize(layer).unwrap_err();
		assert!(err.to_string().contains("callback_urls"));
	}

	#[test]
	fn test_federation_with_callbacks_is_accepted() {
		let layer = IdgateConfigLayer {
			federation: Some(federation_layer()),
			client: Some(ClientConfigLayer {
				callback_urls: Some(vec!["https://app.example.com/callback".to_string()]),
				logout_urls: None,
			}),
			..Default::default()
		};
		let config = finalize(layer).unwrap();
		assert_eq!(config.federation.unwrap().provider_name, "oidc");
	}

	#[test]
	fn test_file_layer_under_env_layer() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			r#"
[deployment]
namespace = "from-file"
region = "eu-west-1"
"#
		)
		.unwrap();

		let mut merged = DefaultsSource.load().unwrap();
		merged.merge(TomlSource::new(file.path()).load().unwrap());
		merged.merge(IdgateConfigLayer {
			deployment: Some(DeploymentConfigLayer {
				namespace: Some("from-env".to_string()),
				..Default::default()
			}),
			..Default::default()
		});

		let config = finalize(merged).unwrap();
		assert_eq!(config.deployment.namespace, "from-env");
		assert_eq!(config.deployment.region, "eu-west-1");
	}
}
