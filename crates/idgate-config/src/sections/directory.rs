// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User directory service configuration section.

use idgate_common_config::SecretString;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryConfigLayer {
	/// Base URL of the directory service.
	pub base_url: Option<String>,
	/// Bearer token. Loaded from the environment only.
	#[serde(skip)]
	pub token: Option<SecretString>,
}

impl DirectoryConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.token.is_some() {
			self.token = other.token;
		}
	}

	/// Returns None when no base URL is configured.
	pub fn finalize(self) -> Option<DirectoryConfig> {
		let base_url = self.base_url.filter(|s| !s.trim().is_empty())?;
		Some(DirectoryConfig {
			base_url,
			token: self.token,
		})
	}
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
	pub base_url: String,
	pub token: Option<SecretString>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_unconfigured_directory_is_none() {
		assert!(DirectoryConfigLayer::default().finalize().is_none());
		let blank = DirectoryConfigLayer {
			base_url: Some("  ".to_string()),
			token: None,
		};
		assert!(blank.finalize().is_none());
	}

	#[test]
	fn test_token_is_not_read_from_toml() {
		let layer: DirectoryConfigLayer = toml::from_str(
			r#"
base_url = "https://directory.internal/api"
token = "from-file"
"#,
		)
		.unwrap();
		let config = layer.finalize().unwrap();
		assert_eq!(config.base_url, "https://directory.internal/api");
		assert!(config.token.is_none());
	}
}
