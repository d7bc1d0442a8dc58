// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use idgate_common_config::load_secret_env;
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::IdgateConfigLayer;
use crate::sections::{
	ClientConfigLayer, DeploymentConfigLayer, DirectoryConfigLayer, FederationConfigLayer,
	GateConfigLayer, HooksConfigLayer, LoggingConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<IdgateConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<IdgateConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(IdgateConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file yields an empty layer.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/idgate/idgate.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<IdgateConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(IdgateConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: IdgateConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: IDGATE_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<IdgateConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(IdgateConfigLayer {
			deployment: Some(load_deployment_from_env()),
			gate: Some(load_gate_from_env()?),
			directory: Some(load_directory_from_env()?),
			federation: Some(load_federation_from_env()?),
			client: Some(load_client_from_env()),
			hooks: Some(load_hooks_from_env()),
			logging: Some(load_logging_from_env()),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_u64(name: &str) -> Result<Option<u64>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u64 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn env_list(name: &str) -> Option<Vec<String>> {
	env_var(name).map(|s| split_list(&s))
}

pub(crate) fn split_list(raw: &str) -> Vec<String> {
	raw.split(',')
		.map(|s| s.trim().to_string())
		.filter(|s| !s.is_empty())
		.collect()
}

fn load_deployment_from_env() -> DeploymentConfigLayer {
	DeploymentConfigLayer {
		namespace: env_var("IDGATE_NAMESPACE"),
		region: env_var("IDGATE_REGION"),
		environment: env_var("IDGATE_ENV"),
	}
}

fn load_gate_from_env() -> Result<GateConfigLayer, ConfigError> {
	Ok(GateConfigLayer {
		lookup_timeout_ms: env_u64("IDGATE_GATE_LOOKUP_TIMEOUT_MS")?,
	})
}

fn load_directory_from_env() -> Result<DirectoryConfigLayer, ConfigError> {
	Ok(DirectoryConfigLayer {
		base_url: env_var("IDGATE_DIRECTORY_URL"),
		token: load_secret_env("IDGATE_DIRECTORY_TOKEN")
			.map_err(|e| ConfigError::Secret(e.to_string()))?,
	})
}

fn load_federation_from_env() -> Result<FederationConfigLayer, ConfigError> {
	Ok(FederationConfigLayer {
		provider_name: env_var("IDGATE_FEDERATION_PROVIDER_NAME"),
		client_id: env_var("IDGATE_FEDERATION_CLIENT_ID"),
		client_secret: load_secret_env("IDGATE_FEDERATION_CLIENT_SECRET")
			.map_err(|e| ConfigError::Secret(e.to_string()))?,
		issuer_url: env_var("IDGATE_FEDERATION_ISSUER_URL"),
		attribute_request_method: env_var("IDGATE_FEDERATION_ATTRIBUTE_REQUEST_METHOD"),
	})
}

fn load_client_from_env() -> ClientConfigLayer {
	ClientConfigLayer {
		callback_urls: env_list("IDGATE_CALLBACK_URLS"),
		logout_urls: env_list("IDGATE_LOGOUT_URLS"),
	}
}

fn load_hooks_from_env() -> HooksConfigLayer {
	HooksConfigLayer {
		routes: None,
		sender_key: env_var("IDGATE_SENDER_KEY"),
	}
}

fn load_logging_from_env() -> LoggingConfigLayer {
	LoggingConfigLayer {
		level: env_var("IDGATE_LOG_LEVEL"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use std::io::Write;

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.deployment.is_none());
		assert!(layer.federation.is_none());
	}

	#[test]
	fn test_toml_source_missing_file_returns_empty() {
		let layer = TomlSource::new("/nonexistent/idgate.toml").load().unwrap();
		assert!(layer.deployment.is_none());
	}

	#[test]
	fn test_toml_source_parses_sections() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			r#"
[deployment]
namespace = "acme"
environment = "prod"

[gate]
lookup_timeout_ms = 1500

[client]
callback_urls = ["https://app.example.com/callback"]
"#
		)
		.unwrap();

		let layer = TomlSource::new(file.path()).load().unwrap();
		let deployment = layer.deployment.unwrap();
		assert_eq!(deployment.namespace.as_deref(), Some("acme"));
		assert_eq!(deployment.environment.as_deref(), Some("prod"));
		assert_eq!(layer.gate.unwrap().lookup_timeout_ms, Some(1500));
		assert_eq!(
			layer.client.unwrap().callback_urls,
			Some(vec!["https://app.example.com/callback".to_string()])
		);
	}

	#[test]
	fn test_toml_source_reports_parse_errors() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[gate]\nlookup_timeout_ms = \"soon\"").unwrap();

		let err = TomlSource::new(file.path()).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn test_split_list_trims_and_drops_empties() {
		assert_eq!(
			split_list(" https://a.example.com/cb , ,http://localhost:3000/cb,"),
			vec!["https://a.example.com/cb", "http://localhost:3000/cb"]
		);
	}

	proptest! {
		#[test]
		fn split_list_entries_are_trimmed_and_nonempty(raw in "[a-z ,:/.]{0,60}") {
			for entry in split_list(&raw) {
				prop_assert!(!entry.is_empty());
				prop_assert_eq!(entry.trim(), entry.as_str());
				prop_assert!(!entry.contains(','));
			}
		}
	}
}
