// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Pool client redirect configuration section.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientConfigLayer {
	pub callback_urls: Option<Vec<String>>,
	pub logout_urls: Option<Vec<String>>,
}

impl ClientConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.callback_urls.is_some() {
			self.callback_urls = other.callback_urls;
		}
		if other.logout_urls.is_some() {
			self.logout_urls = other.logout_urls;
		}
	}

	pub fn finalize(self) -> ClientConfig {
		ClientConfig {
			callback_urls: self.callback_urls.unwrap_or_default(),
			logout_urls: self.logout_urls.unwrap_or_default(),
		}
	}
}

/// Redirect sets advertised when federation is configured.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
	pub callback_urls: Vec<String>,
	pub logout_urls: Vec<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_lists_replace_rather_than_append() {
		let mut base = ClientConfigLayer {
			callback_urls: Some(vec!["https://a.example.com/cb".to_string()]),
			logout_urls: Some(vec!["https://a.example.com/".to_string()]),
		};
		base.merge(ClientConfigLayer {
			callback_urls: Some(vec!["https://b.example.com/cb".to_string()]),
			logout_urls: None,
		});
		let config = base.finalize();
		assert_eq!(config.callback_urls, vec!["https://b.example.com/cb"]);
		assert_eq!(config.logout_urls, vec!["https://a.example.com/"]);
	}
}
