// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Deployment identity: namespace, region and environment.

use serde::{Deserialize, Serialize};

fn default_namespace() -> String {
	"idgate".to_string()
}

fn default_region() -> String {
	"us-east-1".to_string()
}

fn default_environment() -> String {
	"dev".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeploymentConfigLayer {
	pub namespace: Option<String>,
	pub region: Option<String>,
	pub environment: Option<String>,
}

impl DeploymentConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.namespace.is_some() {
			self.namespace = other.namespace;
		}
		if other.region.is_some() {
			self.region = other.region;
		}
		if other.environment.is_some() {
			self.environment = other.environment;
		}
	}

	pub fn finalize(self) -> DeploymentConfig {
		DeploymentConfig {
			namespace: self.namespace.unwrap_or_else(default_namespace),
			region: self.region.unwrap_or_else(default_region),
			environment: self.environment.unwrap_or_else(default_environment),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeploymentConfig {
	/// Prefix for the pool name and hosted domain.
	pub namespace: String,
	pub region: String,
	/// `prod` retains the pool on teardown.
	pub environment: String,
}

impl Default for DeploymentConfig {
	fn default() -> Self {
		DeploymentConfigLayer::default().finalize()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_values() {
		let config = DeploymentConfig::default();
		assert_eq!(config.namespace, "idgate");
		assert_eq!(config.region, "us-east-1");
		assert_eq!(config.environment, "dev");
	}

	#[test]
	fn test_deserialize_layer_partial() {
		let layer: DeploymentConfigLayer = toml::from_str(r#"namespace = "acme""#).unwrap();
		let config = layer.finalize();
		assert_eq!(config.namespace, "acme");
		assert_eq!(config.region, "us-east-1");
	}
}
