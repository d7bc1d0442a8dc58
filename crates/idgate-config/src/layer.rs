// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration layer for merging from multiple sources.

use serde::Deserialize;

use crate::sections::{
	ClientConfigLayer, DeploymentConfigLayer, DirectoryConfigLayer, FederationConfigLayer,
	GateConfigLayer, HooksConfigLayer, LoggingConfigLayer,
};

/// idgate configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdgateConfigLayer {
	#[serde(default)]
	pub deployment: Option<DeploymentConfigLayer>,
	#[serde(default)]
	pub gate: Option<GateConfigLayer>,
	#[serde(default)]
	pub directory: Option<DirectoryConfigLayer>,
	#[serde(default)]
	pub federation: Option<FederationConfigLayer>,
	#[serde(default)]
	pub client: Option<ClientConfigLayer>,
	#[serde(default)]
	pub hooks: Option<HooksConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl IdgateConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: IdgateConfigLayer) {
		merge_option(
			&mut self.deployment,
			other.deployment,
			DeploymentConfigLayer::merge,
		);
		merge_option(&mut self.gate, other.gate, GateConfigLayer::merge);
		merge_option(
			&mut self.directory,
			other.directory,
			DirectoryConfigLayer::merge,
		);
		merge_option(
			&mut self.federation,
			other.federation,
			FederationConfigLayer::merge,
		);
		merge_option(&mut self.client, other.client, ClientConfigLayer::merge);
		merge_option(&mut self.hooks, other.hooks, HooksConfigLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_merge_empty_layers() {
		let mut base = IdgateConfigLayer::default();
		base.merge(IdgateConfigLayer::default());
		assert!(base.deployment.is_none());
		assert!(base.federation.is_none());
	}

	#[test]
	fn test_merge_other_overwrites_field_by_field() {
		let mut base = IdgateConfigLayer {
			deployment: Some(DeploymentConfigLayer {
				namespace: Some("acme".to_string()),
				region: Some("eu-west-1".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		let other = IdgateConfigLayer {
			deployment: Some(DeploymentConfigLayer {
				region: Some("us-west-2".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		base.merge(other);

		let deployment = base.deployment.unwrap();
		assert_eq!(deployment.namespace.as_deref(), Some("acme"));
		assert_eq!(deployment.region.as_deref(), Some("us-west-2"));
	}

	#[test]
	fn test_merge_adds_missing_sections() {
		let mut base = IdgateConfigLayer::default();
		let other = IdgateConfigLayer {
			gate: Some(GateConfigLayer {
				lookup_timeout_ms: Some(500),
			}),
			..Default::default()
		};
		base.merge(other);
		assert_eq!(base.gate.unwrap().lookup_timeout_ms, Some(500));
	}
}
